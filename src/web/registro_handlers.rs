// src/web/registro_handlers.rs
use crate::{
    error::AppResult,
    models::registro::{
        AtualizarRegistroPayload, DiaTrabalhado, NovoRegistroPayload, RegistroView,
    },
    services::registro_service,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde_json::{json, Value};

// GET /api/dias-trabalhados
pub async fn handle_listar(State(state): State<AppState>) -> AppResult<Json<Vec<RegistroView>>> {
    let hoje = Local::now().date_naive();
    let registros = registro_service::listar_registros(&state.db_pool)
        .await?
        .into_iter()
        .map(|r| RegistroView::derivar(r, hoje))
        .collect();
    Ok(Json(registros))
}

// GET /api/dias-trabalhados/{id}
pub async fn handle_buscar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiaTrabalhado>> {
    let registro = registro_service::buscar_registro(&state.db_pool, id).await?;
    Ok(Json(registro))
}

// GET /api/dias-trabalhados/servidor/{nf}
pub async fn handle_listar_por_servidor(
    State(state): State<AppState>,
    Path(nf): Path<String>,
) -> AppResult<Json<Vec<RegistroView>>> {
    let hoje = Local::now().date_naive();
    let registros = registro_service::listar_por_servidor(&state.db_pool, &nf)
        .await?
        .into_iter()
        .map(|r| RegistroView::derivar(r, hoje))
        .collect();
    Ok(Json(registros))
}

// POST /api/dias-trabalhados
pub async fn handle_criar(
    State(state): State<AppState>,
    Json(payload): Json<NovoRegistroPayload>,
) -> AppResult<(StatusCode, Json<DiaTrabalhado>)> {
    let registro = registro_service::criar_registro(&state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(registro)))
}

// PUT /api/dias-trabalhados/{id}
pub async fn handle_atualizar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AtualizarRegistroPayload>,
) -> AppResult<Json<DiaTrabalhado>> {
    let registro = registro_service::atualizar_registro(&state.db_pool, id, payload).await?;
    Ok(Json(registro))
}

// DELETE /api/dias-trabalhados/{id}
pub async fn handle_deletar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    registro_service::deletar_registro(&state.db_pool, id).await?;
    Ok(Json(json!({ "message": "Registro deletado com sucesso" })))
}
