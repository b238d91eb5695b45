// src/models/usuario.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Usuário de acesso ao painel. Gate de demonstração com bcrypt — NÃO é a
/// fronteira de segurança do sistema (a autoridade é a API/BD).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsuarioSistema {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String, // admin | user
    pub email: Option<String>,
    pub ativo: bool,
    #[serde(skip_serializing)]
    pub criado_em: Option<NaiveDateTime>,
    #[serde(skip_serializing)]
    pub atualizado_em: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RedefinirSenhaPayload {
    pub username: String,
    pub token: String,
    #[serde(rename = "new_password")]
    pub nova_senha: String,
}

/// Credenciais de admin enviadas no corpo, como a API sempre fez
/// (não há sessão; cada ação administrativa se autentica sozinha).
#[derive(Debug, Deserialize)]
pub struct AdminPayload {
    pub admin_user: String,
    pub admin_password: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct TokenRedefinicao {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expira_em: NaiveDateTime,
    pub usado: bool,
    pub criado_por: Option<String>,
    pub criado_em: Option<NaiveDateTime>,
}
