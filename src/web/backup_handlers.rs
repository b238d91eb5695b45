// src/web/backup_handlers.rs
use crate::{
    error::AppResult,
    services::backup_service::{self, BackupInfo},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

// POST /api/backup/criar
pub async fn handle_criar(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let caminho = backup_service::criar_backup(&state.db_path, &state.backup_dir).await?;
    let arquivo = caminho
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Backup criado com sucesso", "arquivo": arquivo })),
    ))
}

// GET /api/backup/listar
pub async fn handle_listar(State(state): State<AppState>) -> AppResult<Json<Vec<BackupInfo>>> {
    let backups = backup_service::listar_backups(&state.backup_dir).await?;
    Ok(Json(backups))
}

// GET /api/backup/download/{arquivo}
pub async fn handle_download(
    State(state): State<AppState>,
    Path(arquivo): Path<String>,
) -> AppResult<impl IntoResponse> {
    let bytes = backup_service::ler_backup(&state.backup_dir, &arquivo).await?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{arquivo}\""),
            ),
        ],
        bytes,
    ))
}
