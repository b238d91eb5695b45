// src/models/servidor.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Servidor do órgão, dono de um banco de horas. O `nf` é a chave de
/// negócio: todo registro de dia trabalhado aponta para ele.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Servidor {
    pub id: i64,
    pub nf: String,
    pub nome: String,
    pub setor: String,
    pub criado_em: Option<NaiveDateTime>,
    pub atualizado_em: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct NovoServidorPayload {
    pub nf: String,
    pub nome: String,
    pub setor: String,
}

// Atualização parcial: campo ausente mantém o valor atual
#[derive(Debug, Deserialize)]
pub struct AtualizarServidorPayload {
    pub nome: Option<String>,
    pub setor: Option<String>,
}
