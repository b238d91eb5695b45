// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::{AdminPayload, LoginPayload, RedefinirSenhaPayload, UsuarioSistema},
    services::auth_service,
    state::AppState,
};
use axum::{extract::State, Json};
use serde_json::{json, Value};

// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<Json<Value>> {
    // Garante o usuário semeado mesmo em base recém-criada
    auth_service::semear_usuarios_iniciais(&state.db_pool).await?;

    let usuario = auth_service::login(&state.db_pool, &payload.username, &payload.password).await?;
    tracing::info!("Login de '{}' ({})", usuario.username, usuario.role);

    Ok(Json(json!({
        "username": usuario.username,
        "role": usuario.role,
        "email": usuario.email,
    })))
}

// POST /api/auth/reset-password
pub async fn handle_reset_password(
    State(state): State<AppState>,
    Json(payload): Json<RedefinirSenhaPayload>,
) -> AppResult<Json<Value>> {
    auth_service::redefinir_senha(
        &state.db_pool,
        &payload.username,
        &payload.token,
        &payload.nova_senha,
    )
    .await?;
    Ok(Json(json!({ "message": "Senha redefinida com sucesso" })))
}

// POST /api/admin/users — credenciais de admin no corpo, como sempre foi
pub async fn handle_admin_users(
    State(state): State<AppState>,
    Json(payload): Json<AdminPayload>,
) -> AppResult<Json<Vec<UsuarioSistema>>> {
    auth_service::verificar_admin(&state.db_pool, &payload.admin_user, &payload.admin_password)
        .await?;
    let usuarios = auth_service::listar_usuarios(&state.db_pool).await?;
    Ok(Json(usuarios))
}

// POST /api/admin/token
pub async fn handle_admin_token(
    State(state): State<AppState>,
    Json(payload): Json<AdminPayload>,
) -> AppResult<Json<Value>> {
    let admin = auth_service::verificar_admin(
        &state.db_pool,
        &payload.admin_user,
        &payload.admin_password,
    )
    .await?;

    let username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("Informe o usuário".to_string()))?;

    let (token, expira_em) =
        auth_service::gerar_token_redefinicao(&state.db_pool, &admin, username).await?;

    Ok(Json(json!({
        "username": username,
        "token": token,
        "expira_em": expira_em.format("%Y-%m-%dT%H:%M:%S").to_string(),
    })))
}
