// src/web/painel_handlers.rs
//
// Página inicial e derivações de leitura do painel: estatísticas, gestão
// à vista por NF, alertas de prazo e eventos do calendário.

use crate::{
    error::{AppError, AppResult},
    models::{
        alerta::{Alerta, EventoCalendario},
        registro::{ConsultaServidor, Estatisticas},
    },
    services::{alerta_service, horas, registro_service, servidor_service},
    state::AppState,
    templates::IndexPage,
};
use askama::Template;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::Local;

// GET /
pub async fn handle_index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let total_servidores: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM servidores")
        .fetch_one(&state.db_pool)
        .await?;
    let total_registros: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dias_trabalhados")
        .fetch_one(&state.db_pool)
        .await?;

    let template = IndexPage {
        total_servidores,
        total_registros,
    };
    template.render().map(Html).map_err(|e| {
        tracing::error!("Erro ao renderizar template: {}", e);
        AppError::Internal
    })
}

// GET /api/estatisticas
pub async fn handle_estatisticas(State(state): State<AppState>) -> AppResult<Json<Estatisticas>> {
    let stats = registro_service::estatisticas(&state.db_pool).await?;
    Ok(Json(stats))
}

// GET /api/consulta/{nf}
pub async fn handle_consulta(
    State(state): State<AppState>,
    Path(nf): Path<String>,
) -> AppResult<Json<ConsultaServidor>> {
    let consulta = registro_service::consulta_por_nf(&state.db_pool, &nf).await?;
    Ok(Json(consulta))
}

// GET /api/alertas — recalculado do zero a cada chamada
pub async fn handle_alertas(State(state): State<AppState>) -> AppResult<Json<Vec<Alerta>>> {
    let servidores = servidor_service::listar_servidores(&state.db_pool).await?;
    let registros = registro_service::listar_registros(&state.db_pool).await?;
    let hoje = Local::now().date_naive();

    Ok(Json(alerta_service::calcular_alertas(
        &servidores,
        &registros,
        hoje,
    )))
}

// GET /api/calendario/{data} — aceita YYYY-MM-DD ou DD/MM/YYYY
pub async fn handle_calendario(
    State(state): State<AppState>,
    Path(data): Path<String>,
) -> AppResult<Json<Vec<EventoCalendario>>> {
    let data = horas::parse_data_flexivel(&data)
        .ok_or_else(|| AppError::BadRequest("Data inválida".to_string()))?;

    let servidores = servidor_service::listar_servidores(&state.db_pool).await?;
    let registros = registro_service::listar_registros(&state.db_pool).await?;

    Ok(Json(alerta_service::eventos_no_dia(
        &servidores,
        &registros,
        data,
    )))
}
