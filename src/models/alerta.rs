// src/models/alerta.rs
use chrono::NaiveDate;
use serde::Serialize;

/// Quantos dias antes do prazo máximo o lembrete dispara.
/// O disparo é por IGUALDADE EXATA: cada registro alerta num único dia.
pub const DIAS_AVISO_PRAZO: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TipoAlerta {
    #[serde(rename = "urgent")]
    Urgente,
    #[serde(rename = "warning")]
    Aviso,
}

impl TipoAlerta {
    /// Urgência pela proximidade do vencimento.
    pub fn por_dias_restantes(dias: i64) -> Self {
        if dias <= 7 {
            TipoAlerta::Urgente
        } else {
            TipoAlerta::Aviso
        }
    }
}

/// Alerta de prazo derivado a cada carga de dados — nunca persistido,
/// não há estado de "alerta visto".
#[derive(Debug, Clone, Serialize)]
pub struct Alerta {
    pub id: i64,
    pub nf: String,
    pub nome: String,
    pub setor: String,
    pub prazo_max: NaiveDate,
    #[serde(rename = "diasRestantes")]
    pub dias_restantes: i64,
    pub tipo: TipoAlerta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TipoEvento {
    #[serde(rename = "reminder")]
    Lembrete,
    #[serde(rename = "deadline")]
    PrazoMaximo,
}

/// Evento derivado para uma data consultada do calendário.
#[derive(Debug, Clone, Serialize)]
pub struct EventoCalendario {
    pub nf: String,
    pub nome: String,
    pub tipo: TipoEvento,
    pub label: String,
}
