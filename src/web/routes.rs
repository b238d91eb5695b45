// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, backup_handlers, dados_handlers, painel_handlers, registro_handlers,
        servidor_handlers,
    },
};
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Página do painel ---
    let painel_routes = Router::new().route("/", get(painel_handlers::handle_index));

    // --- Autenticação e administração (gate de demonstração) ---
    let auth_routes = Router::new()
        .route("/api/auth/login", post(auth_handlers::handle_login))
        .route(
            "/api/auth/reset-password",
            post(auth_handlers::handle_reset_password),
        )
        .route("/api/admin/users", post(auth_handlers::handle_admin_users))
        .route("/api/admin/token", post(auth_handlers::handle_admin_token));

    // --- Servidores ---
    // GET busca por NF (chave de negócio); PUT/DELETE usam o id numérico
    let servidor_routes = Router::new()
        .route(
            "/api/servidores",
            get(servidor_handlers::handle_listar).post(servidor_handlers::handle_criar),
        )
        .route(
            "/api/servidores/{id}",
            get(servidor_handlers::handle_buscar_por_nf)
                .put(servidor_handlers::handle_atualizar)
                .delete(servidor_handlers::handle_deletar),
        );

    // --- Dias trabalhados ---
    let registro_routes = Router::new()
        .route(
            "/api/dias-trabalhados",
            get(registro_handlers::handle_listar).post(registro_handlers::handle_criar),
        )
        .route(
            "/api/dias-trabalhados/servidor/{nf}",
            get(registro_handlers::handle_listar_por_servidor),
        )
        .route(
            "/api/dias-trabalhados/{id}",
            get(registro_handlers::handle_buscar)
                .put(registro_handlers::handle_atualizar)
                .delete(registro_handlers::handle_deletar),
        );

    // --- Derivações de leitura ---
    let derivacao_routes = Router::new()
        .route("/api/estatisticas", get(painel_handlers::handle_estatisticas))
        .route("/api/consulta/{nf}", get(painel_handlers::handle_consulta))
        .route("/api/alertas", get(painel_handlers::handle_alertas))
        .route(
            "/api/calendario/{data}",
            get(painel_handlers::handle_calendario),
        );

    // --- Backup e importação/exportação ---
    let dados_routes = Router::new()
        .route("/api/backup/criar", post(backup_handlers::handle_criar))
        .route("/api/backup/listar", get(backup_handlers::handle_listar))
        .route(
            "/api/backup/download/{arquivo}",
            get(backup_handlers::handle_download),
        )
        .route("/api/exportar/json", get(dados_handlers::handle_exportar))
        .route("/api/importar/json", post(dados_handlers::handle_importar));

    Router::new()
        .merge(painel_routes)
        .merge(auth_routes)
        .merge(servidor_routes)
        .merge(registro_routes)
        .merge(derivacao_routes)
        .merge(dados_routes)
        .with_state(app_state)
}
