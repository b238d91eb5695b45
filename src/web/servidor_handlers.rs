// src/web/servidor_handlers.rs
use crate::{
    error::AppResult,
    models::servidor::{AtualizarServidorPayload, NovoServidorPayload, Servidor},
    services::servidor_service,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

// GET /api/servidores
pub async fn handle_listar(State(state): State<AppState>) -> AppResult<Json<Vec<Servidor>>> {
    let servidores = servidor_service::listar_servidores(&state.db_pool).await?;
    Ok(Json(servidores))
}

// GET /api/servidores/{nf}
pub async fn handle_buscar_por_nf(
    State(state): State<AppState>,
    Path(nf): Path<String>,
) -> AppResult<Json<Servidor>> {
    let servidor = servidor_service::buscar_por_nf(&state.db_pool, &nf).await?;
    Ok(Json(servidor))
}

// POST /api/servidores
pub async fn handle_criar(
    State(state): State<AppState>,
    Json(payload): Json<NovoServidorPayload>,
) -> AppResult<(StatusCode, Json<Servidor>)> {
    let servidor = servidor_service::criar_servidor(&state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(servidor)))
}

// PUT /api/servidores/{id}
pub async fn handle_atualizar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AtualizarServidorPayload>,
) -> AppResult<Json<Servidor>> {
    let servidor = servidor_service::atualizar_servidor(&state.db_pool, id, payload).await?;
    Ok(Json(servidor))
}

// DELETE /api/servidores/{id}
pub async fn handle_deletar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    servidor_service::deletar_servidor(&state.db_pool, id).await?;
    Ok(Json(json!({ "message": "Servidor deletado com sucesso" })))
}
