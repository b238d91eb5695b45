// src/web/dados_handlers.rs
//
// Exportação/importação de todos os dados em JSON. A importação aceita o
// mesmo formato que a exportação produz (round-trip) e ignora servidores
// cujo NF já exista.

use crate::{
    error::{AppError, AppResult},
    models::{
        registro::{DiaTrabalhado, NovoRegistroPayload},
        servidor::{NovoServidorPayload, Servidor},
    },
    services::{backup_service, registro_service, servidor_service},
    state::AppState,
};
use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct ExportacaoDados {
    pub servidores: Vec<Servidor>,
    #[serde(rename = "diasTrabalhados")]
    pub dias_trabalhados: Vec<DiaTrabalhado>,
    pub exportado_em: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportacaoPayload {
    #[serde(default)]
    pub servidores: Vec<NovoServidorPayload>,
    #[serde(rename = "diasTrabalhados", default)]
    pub dias_trabalhados: Vec<NovoRegistroPayload>,
}

// GET /api/exportar/json
pub async fn handle_exportar(State(state): State<AppState>) -> AppResult<Json<ExportacaoDados>> {
    let servidores = servidor_service::listar_servidores(&state.db_pool).await?;
    let dias_trabalhados = registro_service::listar_registros(&state.db_pool).await?;

    Ok(Json(ExportacaoDados {
        servidores,
        dias_trabalhados,
        exportado_em: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
    }))
}

// POST /api/importar/json
pub async fn handle_importar(
    State(state): State<AppState>,
    Json(payload): Json<ImportacaoPayload>,
) -> AppResult<Json<Value>> {
    let mut servidores_novos = 0;
    for servidor in payload.servidores {
        match servidor_service::criar_servidor(&state.db_pool, servidor).await {
            Ok(_) => servidores_novos += 1,
            // NF repetido não é erro na importação: mantém o existente
            Err(AppError::BadRequest(_)) => {}
            Err(e) => return Err(e),
        }
    }

    let mut registros_novos = 0;
    for registro in payload.dias_trabalhados {
        registro_service::criar_registro(&state.db_pool, registro).await?;
        registros_novos += 1;
    }

    tracing::info!(
        "Importação concluída: {} servidores, {} registros",
        servidores_novos,
        registros_novos
    );

    // Backup logo após mexer em massa nos dados
    backup_service::criar_backup(&state.db_path, &state.backup_dir).await?;

    Ok(Json(json!({ "message": "Dados importados com sucesso" })))
}
