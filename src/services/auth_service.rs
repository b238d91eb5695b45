// src/services/auth_service.rs
//
// Acesso ao painel. É um gate de demonstração (usuários semeados, senha
// padrão via env) — serve para separar admin de consulta, não é a
// fronteira de segurança do sistema.

use crate::{
    error::{AppError, AppResult},
    models::usuario::{TokenRedefinicao, UsuarioSistema},
};
use chrono::{Duration, NaiveDateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &stored_hash))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
            AppError::Internal
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
            AppError::PasswordHashing
        })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
            AppError::Internal
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
            AppError::PasswordHashing
        })
}

/// Semeia o usuário admin de demonstração, se ainda não existir.
/// Credenciais via ADMIN_USER / ADMIN_PASSWORD (padrão admin/admin).
pub async fn semear_usuarios_iniciais(pool: &SqlitePool) -> AppResult<()> {
    let username = std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
    let senha = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());

    let existe: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM usuarios_sistema WHERE username = ?)")
            .bind(&username)
            .fetch_one(pool)
            .await?;
    if existe {
        return Ok(());
    }

    let hash = hash_password(&senha).await?;
    sqlx::query("INSERT INTO usuarios_sistema (username, password_hash, role) VALUES (?, ?, 'admin')")
        .bind(&username)
        .bind(&hash)
        .execute(pool)
        .await?;

    tracing::info!("Usuário admin de demonstração '{}' semeado", username);
    Ok(())
}

async fn buscar_usuario_ativo(
    pool: &SqlitePool,
    username: &str,
) -> AppResult<Option<UsuarioSistema>> {
    let usuario = sqlx::query_as::<_, UsuarioSistema>(
        "SELECT * FROM usuarios_sistema WHERE username = ? AND ativo = 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(usuario)
}

/// Login: usuário ativo com senha correta, senão credenciais inválidas
/// (mensagem genérica de propósito).
pub async fn login(pool: &SqlitePool, username: &str, password: &str) -> AppResult<UsuarioSistema> {
    let usuario = buscar_usuario_ativo(pool, username.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(password, &usuario.password_hash).await? {
        return Err(AppError::InvalidCredentials);
    }
    Ok(usuario)
}

/// Valida as credenciais de admin enviadas no corpo do pedido.
pub async fn verificar_admin(
    pool: &SqlitePool,
    admin_user: &str,
    admin_password: &str,
) -> AppResult<UsuarioSistema> {
    let admin = buscar_usuario_ativo(pool, admin_user.trim())
        .await?
        .filter(|u| u.role == "admin")
        .ok_or(AppError::Forbidden)?;

    if !verify_password(admin_password, &admin.password_hash).await? {
        return Err(AppError::Forbidden);
    }
    Ok(admin)
}

pub async fn listar_usuarios(pool: &SqlitePool) -> AppResult<Vec<UsuarioSistema>> {
    let usuarios =
        sqlx::query_as::<_, UsuarioSistema>("SELECT * FROM usuarios_sistema ORDER BY username ASC")
            .fetch_all(pool)
            .await?;
    Ok(usuarios)
}

/// Gera um token de redefinição de senha para um usuário, válido por 24h.
pub async fn gerar_token_redefinicao(
    pool: &SqlitePool,
    admin: &UsuarioSistema,
    username: &str,
) -> AppResult<(String, NaiveDateTime)> {
    let usuario = buscar_usuario_ativo(pool, username)
        .await?
        .ok_or(AppError::NotFound("Usuário não encontrado"))?;

    let token = Uuid::new_v4().to_string();
    let expira_em = Utc::now().naive_utc() + Duration::hours(24);

    sqlx::query(
        "INSERT INTO tokens_redefinicao (user_id, token, expira_em, criado_por) VALUES (?, ?, ?, ?)",
    )
    .bind(usuario.id)
    .bind(&token)
    .bind(expira_em)
    .bind(&admin.username)
    .execute(pool)
    .await?;

    tracing::info!(
        "Token de redefinição gerado para '{}' por '{}'",
        username,
        admin.username
    );
    Ok((token, expira_em))
}

/// Redefine a senha de um usuário mediante token válido e não usado.
pub async fn redefinir_senha(
    pool: &SqlitePool,
    username: &str,
    token: &str,
    nova_senha: &str,
) -> AppResult<()> {
    let usuario = buscar_usuario_ativo(pool, username.trim())
        .await?
        .ok_or(AppError::NotFound("Usuário não encontrado"))?;

    let registro = sqlx::query_as::<_, TokenRedefinicao>(
        "SELECT * FROM tokens_redefinicao WHERE user_id = ? AND token = ? AND usado = 0",
    )
    .bind(usuario.id)
    .bind(token.trim())
    .fetch_optional(pool)
    .await?;

    let registro = match registro {
        Some(t) if t.expira_em > Utc::now().naive_utc() => t,
        _ => return Err(AppError::BadRequest("Token inválido ou expirado".to_string())),
    };

    let hash = hash_password(nova_senha).await?;
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE usuarios_sistema SET password_hash = ?, atualizado_em = datetime('now') WHERE id = ?",
    )
    .bind(&hash)
    .bind(usuario.id)
    .execute(&mut *tx)
    .await?;
    sqlx::query("UPDATE tokens_redefinicao SET usado = 1 WHERE id = ?")
        .bind(registro.id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    tracing::info!("Senha redefinida para '{}'", username);
    Ok(())
}
