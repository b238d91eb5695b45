// src/models/mod.rs
pub mod alerta;
pub mod registro;
pub mod servidor;
pub mod usuario;
