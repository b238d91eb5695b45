// src/services/mod.rs
pub mod alerta_service;
pub mod auth_service;
pub mod backup_service;
pub mod horas;
pub mod registro_service;
pub mod servidor_service;
