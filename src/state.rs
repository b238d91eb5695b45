// src/state.rs
use sqlx::SqlitePool;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    /// Caminho do ficheiro SQLite, usado pelo backup (cópia do arquivo).
    pub db_path: PathBuf,
    /// Pasta onde os backups são gravados.
    pub backup_dir: PathBuf,
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}
