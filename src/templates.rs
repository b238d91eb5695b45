// src/templates.rs
use askama::Template;

// Struct para o template `index.html` (ficheiro em templates/)
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub total_servidores: i64,
    pub total_registros: i64,
}
