// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao processar password")]
    PasswordHashing,

    #[error("Usuário ou senha inválidos")]
    InvalidCredentials,

    #[error("Acesso negado")]
    Forbidden,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("Erro interno inesperado")]
    Internal,
}

// A API fala JSON; erros também: {"error": "..."}
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Erro processado: {:?}", self);

        let (status, mensagem) = match &self {
            AppError::Sqlx(_) | AppError::SqlxMigrate(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao aceder aos dados.".to_string(),
            ),
            AppError::EnvVar(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro de configuração.".to_string(),
            ),
            AppError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro de armazenamento.".to_string(),
            ),
            AppError::PasswordHashing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao processar credenciais.".to_string(),
            ),
            // Mensagem genérica de propósito
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Usuário ou senha inválidos".to_string(),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Acesso negado".to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Ocorreu um erro inesperado.".to_string(),
            ),
        };

        (status, Json(json!({ "error": mensagem }))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
