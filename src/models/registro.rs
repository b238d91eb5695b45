// src/models/registro.rs
use crate::services::horas::{self, ClasseSaldo, StatusPrazo};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Um dia trabalhado que gera direito a compensação.
///
/// As colunas `h_trab` e `h_descontadas` saem no JSON com os nomes
/// históricos da API (`h_trabalhada`, `horas_descontadas`). Horas são
/// strings "HH:MM"; datas vão no fio como ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DiaTrabalhado {
    pub id: i64,
    pub nf: String,
    pub nome: String,
    pub setor: String,
    pub vinculo: Option<String>,
    pub dia_trabalhado: Option<NaiveDate>,
    pub entrada: Option<String>,
    pub saida: Option<String>,
    #[sqlx(rename = "h_trab")]
    #[serde(rename = "h_trabalhada")]
    pub h_trabalhada: Option<String>,
    pub h_direito: Option<String>,
    pub prazo_max: Option<NaiveDate>,
    pub h_totais: Option<String>,
    pub hora_dia: Option<String>,
    pub dias_gozar: Option<String>,
    pub dias_gozados: Option<String>,
    #[sqlx(rename = "h_descontadas")]
    #[serde(rename = "horas_descontadas")]
    pub horas_descontadas: Option<String>,
    pub saldo: Option<String>,
    pub observacao: Option<String>,
    pub criado_em: Option<NaiveDateTime>,
    pub atualizado_em: Option<NaiveDateTime>,
}

/// Registro acompanhado das classificações de exibição, derivadas na
/// leitura: situação do prazo e classe do saldo.
#[derive(Debug, Serialize)]
pub struct RegistroView {
    #[serde(flatten)]
    pub registro: DiaTrabalhado,
    pub status_prazo: StatusPrazo,
    pub classe_saldo: ClasseSaldo,
}

impl RegistroView {
    pub fn derivar(registro: DiaTrabalhado, hoje: NaiveDate) -> Self {
        let status_prazo = horas::status_prazo(registro.prazo_max, hoje);
        let classe_saldo = horas::classe_saldo(registro.saldo.as_deref());
        Self {
            registro,
            status_prazo,
            classe_saldo,
        }
    }
}

/// Payload de criação. Campos derivados (`h_trabalhada`, `h_direito`,
/// `prazo_max`, `saldo`) podem vir preenchidos; em falta, o serviço calcula.
#[derive(Debug, Default, Deserialize)]
pub struct NovoRegistroPayload {
    pub nf: String,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub setor: Option<String>,
    #[serde(default)]
    pub vinculo: Option<String>,
    #[serde(default)]
    pub dia_trabalhado: Option<String>,
    #[serde(default)]
    pub entrada: Option<String>,
    #[serde(default)]
    pub saida: Option<String>,
    #[serde(default, rename = "h_trabalhada")]
    pub h_trabalhada: Option<String>,
    #[serde(default)]
    pub h_direito: Option<String>,
    #[serde(default)]
    pub prazo_max: Option<String>,
    #[serde(default)]
    pub h_totais: Option<String>,
    #[serde(default)]
    pub hora_dia: Option<String>,
    #[serde(default)]
    pub dias_gozar: Option<String>,
    #[serde(default)]
    pub dias_gozados: Option<String>,
    #[serde(default, rename = "horas_descontadas")]
    pub horas_descontadas: Option<String>,
    #[serde(default)]
    pub saldo: Option<String>,
    #[serde(default)]
    pub observacao: Option<String>,
}

/// Atualização parcial: só o subconjunto mutável. Campo ausente mantém o
/// valor gravado; o saldo é sempre recalculado no serviço.
#[derive(Debug, Default, Deserialize)]
pub struct AtualizarRegistroPayload {
    pub nome: Option<String>,
    pub setor: Option<String>,
    pub vinculo: Option<String>,
    pub dia_trabalhado: Option<String>,
    pub entrada: Option<String>,
    pub saida: Option<String>,
    #[serde(rename = "h_trabalhada")]
    pub h_trabalhada: Option<String>,
    pub h_direito: Option<String>,
    pub prazo_max: Option<String>,
    pub h_totais: Option<String>,
    pub hora_dia: Option<String>,
    pub dias_gozar: Option<String>,
    pub dias_gozados: Option<String>,
    #[serde(rename = "horas_descontadas")]
    pub horas_descontadas: Option<String>,
    pub observacao: Option<String>,
}

/// Resumo geral exibido nos cartões do painel.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estatisticas {
    pub total_servidores: i64,
    pub total_registros: i64,
    pub media_horas: String,
    pub total_dias_folga: f64,
}

/// Gestão à vista: totais de um servidor consultado por NF.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultaServidor {
    pub servidor: super::servidor::Servidor,
    pub horas_direito: String,
    pub horas_descontadas: String,
    pub saldo: String,
    pub saldo_negativo: bool,
    pub dias_gozar: f64,
    pub hora_dia: String,
    pub total_registros: usize,
    pub registros: Vec<DiaTrabalhado>,
}
