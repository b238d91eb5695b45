// src/main.rs

// --- Declaração dos Módulos ---
mod db;
mod error;
mod models;
mod services;
mod state;
mod templates;
mod web;

// --- Imports ---
use crate::state::AppState;
use axum::serve;
use std::{env, net::SocketAddr, path::PathBuf};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                env::var("RUST_LOG")
                    .unwrap_or_else(|_| "banco_horas=debug,tower_http=info,sqlx=warn".into())
                    .into()
            }),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando Sistema de Banco de Horas...");

    // --- Base de Dados ---
    let db_pool = match db::create_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
            return Err(anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e));
        }
    };

    // Usuário admin de demonstração (não é fronteira de segurança)
    services::auth_service::semear_usuarios_iniciais(&db_pool).await?;

    // --- Backups ---
    let db_path = db::caminho_db();
    let backup_dir = PathBuf::from(env::var("BACKUP_DIR").unwrap_or_else(|_| "backups".into()));

    if let Err(e) = services::backup_service::criar_backup(&db_path, &backup_dir).await {
        tracing::warn!("⚠️ Não foi possível criar o backup inicial: {:?}", e);
    }

    tokio::spawn(services::backup_service::tarefa_backup(
        db_path.clone(),
        backup_dir.clone(),
    ));
    tracing::info!("💾 Backup automático a cada 6 horas ativado.");

    // --- Checagem de alertas de prazo ---
    tokio::spawn(services::alerta_service::tarefa_alertas(db_pool.clone()));
    tracing::info!("⏰ Checagem horária de alertas de prazo ativada.");

    // --- Estado da Aplicação ---
    let app_state = AppState {
        db_pool,
        db_path,
        backup_dir,
    };

    // --- Endereço e Listener ---
    let porta: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], porta));
    tracing::info!("📡 Servidor escutando em http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener na porta {}: {}", porta, e);
            return Err(e.into());
        }
    };

    // --- Router e Camadas ---
    let app = web::routes::create_router(app_state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    // --- Início do Servidor ---
    tracing::info!("👂 Servidor pronto para aceitar conexões...");
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
