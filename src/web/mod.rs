// src/web/mod.rs
pub mod auth_handlers;
pub mod backup_handlers;
pub mod dados_handlers;
pub mod painel_handlers;
pub mod registro_handlers;
pub mod routes;
pub mod servidor_handlers;
