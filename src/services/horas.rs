// src/services/horas.rs
//
// Aritmética de horas do banco (formato HH:MM) e derivação de prazos.
// Todas as funções são TOTAIS: entrada em falta ou malformada degrada para
// um valor padrão ("00:00", "-", None) em vez de erro — um campo ruim deve
// estragar uma célula da tela, nunca a tela inteira.

use chrono::{Months, NaiveDate};
use serde::Serialize;

pub const MINUTOS_POR_DIA: i64 = 24 * 60;

/// Horas de expediente padrão (8h/dia) usadas na conversão horas -> dias.
pub const HORAS_POR_DIA_PADRAO: f64 = 8.0;

/// Meses de prazo legal para gozar o banco de horas.
pub const MESES_PRAZO: u32 = 6;

// --- Conversões básicas ---

/// Converte "HH:MM" (ou "HH:MM:SS") em minutos. Exige o separador ':';
/// qualquer outra forma retorna None.
pub fn tempo_para_minutos(tempo: &str) -> Option<i64> {
    let mut partes = tempo.trim().split(':');
    let horas: i64 = partes.next()?.parse().ok()?;
    let minutos: i64 = partes.next()?.parse().ok()?;
    if horas < 0 || !(0..60).contains(&minutos) {
        return None;
    }
    Some(horas * 60 + minutos)
}

/// Formata minutos como "HH:MM", com sinal '-' à frente quando negativo.
/// Horas não são limitadas a 24 (totais acumulados passam disso).
pub fn minutos_para_tempo(minutos: i64) -> String {
    let sinal = if minutos < 0 { "-" } else { "" };
    let abs = minutos.abs();
    format!("{}{:02}:{:02}", sinal, abs / 60, abs % 60)
}

/// Converte um saldo "HH:MM" possivelmente negativo ("-02:00") em minutos.
pub fn saldo_para_minutos(saldo: &str) -> Option<i64> {
    let saldo = saldo.trim();
    match saldo.strip_prefix('-') {
        Some(resto) => tempo_para_minutos(resto).map(|m| -m),
        None => tempo_para_minutos(saldo),
    }
}

// --- Regras do banco de horas ---

/// Horas trabalhadas entre entrada e saída.
///
/// Saída "antes" da entrada significa turno que virou a madrugada: soma-se
/// 24h à diferença, nunca é erro. Entrada em falta rende "00:00".
pub fn calcular_horas(entrada: Option<&str>, saida: Option<&str>) -> String {
    let (Some(entrada), Some(saida)) = (entrada, saida) else {
        return "00:00".to_string();
    };
    let (Some(inicio), Some(fim)) = (tempo_para_minutos(entrada), tempo_para_minutos(saida))
    else {
        return "00:00".to_string();
    };

    let mut diferenca = fim - inicio;
    if diferenca < 0 {
        diferenca += MINUTOS_POR_DIA;
    }
    minutos_para_tempo(diferenca)
}

/// Horas de direito: 1 hora trabalhada = 2 horas de compensação.
pub fn dobrar_horas(hora: Option<&str>) -> String {
    let minutos = hora.and_then(tempo_para_minutos).unwrap_or(0);
    minutos_para_tempo(minutos * 2)
}

/// Soma uma sequência de horas "HH:MM", ignorando em silêncio entradas
/// vazias ou malformadas. A soma independe da ordem.
pub fn somar_horas<'a, I>(horas: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let total: i64 = horas
        .into_iter()
        .flatten()
        .filter_map(tempo_para_minutos)
        .sum();
    minutos_para_tempo(total)
}

/// Prazo máximo legal: dia trabalhado + 6 meses de calendário.
/// Fim de mês é ajustado para o último dia válido (31/08 + 6 -> 28/02).
pub fn calcular_prazo(dia_trabalhado: Option<NaiveDate>) -> Option<NaiveDate> {
    dia_trabalhado.and_then(|dia| dia.checked_add_months(Months::new(MESES_PRAZO)))
}

/// Converte "HH:MM" em dias de folga, na base de horas-por-dia informada.
pub fn horas_para_dias(hora: Option<&str>, horas_por_dia: f64) -> f64 {
    let Some(minutos) = hora.and_then(tempo_para_minutos) else {
        return 0.0;
    };
    (minutos as f64 / 60.0) / horas_por_dia
}

// --- Saldo ---

/// Classificação do saldo para exibição.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClasseSaldo {
    #[serde(rename = "positive")]
    Positivo,
    #[serde(rename = "negative")]
    Negativo,
    #[serde(rename = "neutral")]
    Neutro,
}

/// Saldo = horas de direito - horas descontadas, como "HH:MM" com sinal.
pub fn calcular_saldo(direito: Option<&str>, descontadas: Option<&str>) -> String {
    let direito = direito.and_then(tempo_para_minutos).unwrap_or(0);
    let descontadas = descontadas.and_then(tempo_para_minutos).unwrap_or(0);
    minutos_para_tempo(direito - descontadas)
}

/// Classifica um saldo já formatado. Decide pelo TOTAL de minutos
/// (um saldo de "-00:30" é negativo, mesmo com zero na casa das horas).
pub fn classe_saldo(saldo: Option<&str>) -> ClasseSaldo {
    match saldo.and_then(saldo_para_minutos) {
        Some(m) if m > 0 => ClasseSaldo::Positivo,
        Some(m) if m < 0 => ClasseSaldo::Negativo,
        _ => ClasseSaldo::Neutro,
    }
}

// --- Status do prazo ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassePrazo {
    #[serde(rename = "expired")]
    Expirado,
    #[serde(rename = "pending")]
    Pendente,
    #[serde(rename = "active")]
    Ativo,
    #[serde(rename = "neutral")]
    Neutro,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPrazo {
    #[serde(rename = "class")]
    pub classe: ClassePrazo,
    #[serde(rename = "daysRemaining")]
    pub dias_restantes: Option<i64>,
}

impl StatusPrazo {
    pub fn texto(&self) -> String {
        match (self.classe, self.dias_restantes) {
            (ClassePrazo::Expirado, _) => "Expirado".to_string(),
            (ClassePrazo::Pendente, Some(dias)) => format!("{} dias", dias),
            (ClassePrazo::Ativo, _) => "OK".to_string(),
            _ => "-".to_string(),
        }
    }
}

/// Situação do prazo em relação a hoje: vencido, a vencer em até 30 dias
/// (com contagem) ou tranquilo. Sem prazo, fica neutro.
pub fn status_prazo(prazo: Option<NaiveDate>, hoje: NaiveDate) -> StatusPrazo {
    let Some(prazo) = prazo else {
        return StatusPrazo {
            classe: ClassePrazo::Neutro,
            dias_restantes: None,
        };
    };

    let dias = (prazo - hoje).num_days();
    let classe = if dias < 0 {
        ClassePrazo::Expirado
    } else if dias <= 30 {
        ClassePrazo::Pendente
    } else {
        ClassePrazo::Ativo
    };
    StatusPrazo {
        classe,
        dias_restantes: Some(dias),
    }
}

// --- Datas e formatação de exibição ---

/// Aceita "DD/MM/YYYY" ou "YYYY-MM-DD"; qualquer outra forma rende None.
pub fn parse_data_flexivel(texto: &str) -> Option<NaiveDate> {
    let texto = texto.trim();
    NaiveDate::parse_from_str(texto, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(texto, "%Y-%m-%d"))
        .ok()
}

/// Data em estilo local "DD/MM/YYYY"; sem data, "-".
pub fn formatar_data(data: Option<NaiveDate>) -> String {
    match data {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}

/// Hora de exibição: "HH:MM:SS" do banco vira "HH:MM"; sem hora, "-".
pub fn formatar_hora(hora: Option<&str>) -> String {
    match hora {
        Some(h) if !h.is_empty() => h.get(..5).unwrap_or(h).to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    #[test]
    fn calcula_horas_de_turno_normal() {
        assert_eq!(calcular_horas(Some("08:00"), Some("17:00")), "09:00");
        assert_eq!(calcular_horas(Some("07:30"), Some("12:45")), "05:15");
    }

    #[test]
    fn turno_que_vira_a_madrugada_soma_24h() {
        assert_eq!(calcular_horas(Some("22:00"), Some("06:00")), "08:00");
        // saída um minuto "antes" da entrada é o turno mais longo possível
        assert_eq!(calcular_horas(Some("08:00"), Some("07:59")), "23:59");
    }

    #[test]
    fn horas_em_falta_ou_invalidas_rendem_zero() {
        assert_eq!(calcular_horas(Some(""), Some("17:00")), "00:00");
        assert_eq!(calcular_horas(None, None), "00:00");
        assert_eq!(calcular_horas(Some("-"), Some("17:00")), "00:00");
        assert_eq!(calcular_horas(Some("abc"), Some("17:00")), "00:00");
    }

    #[test]
    fn dobrar_horas_aplica_regra_de_direito() {
        assert_eq!(dobrar_horas(Some("09:00")), "18:00");
        assert_eq!(dobrar_horas(Some("00:45")), "01:30");
        assert_eq!(dobrar_horas(Some("")), "00:00");
        assert_eq!(dobrar_horas(None), "00:00");
    }

    #[test]
    fn somar_horas_ignora_entradas_invalidas() {
        let horas = [Some("01:30"), Some("00:45"), Some(""), None];
        assert_eq!(somar_horas(horas), "02:15");
    }

    #[test]
    fn somar_horas_independe_da_ordem() {
        let a = somar_horas([Some("02:10"), Some("00:55"), Some("13:05")]);
        let b = somar_horas([Some("13:05"), Some("02:10"), Some("00:55")]);
        assert_eq!(a, b);
        assert_eq!(a, "16:10");
    }

    #[test]
    fn total_acumulado_passa_de_24_horas() {
        assert_eq!(somar_horas([Some("20:00"), Some("20:00")]), "40:00");
    }

    #[test]
    fn prazo_e_seis_meses_de_calendario() {
        assert_eq!(
            calcular_prazo(Some(data(2024, 1, 31))),
            Some(data(2024, 7, 31))
        );
        // fim de mês ajustado ao último dia válido
        assert_eq!(
            calcular_prazo(Some(data(2024, 8, 31))),
            Some(data(2025, 2, 28))
        );
        assert_eq!(calcular_prazo(None), None);
    }

    #[test]
    fn saldo_negativo_leva_sinal_e_classe() {
        let saldo = calcular_saldo(Some("10:00"), Some("12:00"));
        assert_eq!(saldo, "-02:00");
        assert_eq!(classe_saldo(Some(&saldo)), ClasseSaldo::Negativo);
    }

    #[test]
    fn saldo_zerado_e_neutro() {
        let saldo = calcular_saldo(Some("10:00"), Some("10:00"));
        assert_eq!(saldo, "00:00");
        assert_eq!(classe_saldo(Some(&saldo)), ClasseSaldo::Neutro);
    }

    #[test]
    fn meia_hora_negativa_ainda_e_negativa() {
        // a casa das horas é zero; a classificação tem de olhar os minutos
        assert_eq!(calcular_saldo(Some("08:00"), Some("08:30")), "-00:30");
        assert_eq!(classe_saldo(Some("-00:30")), ClasseSaldo::Negativo);
        assert_eq!(classe_saldo(Some("00:30")), ClasseSaldo::Positivo);
    }

    #[test]
    fn saldo_ilegivel_e_neutro() {
        assert_eq!(classe_saldo(Some("-")), ClasseSaldo::Neutro);
        assert_eq!(classe_saldo(None), ClasseSaldo::Neutro);
    }

    #[test]
    fn status_prazo_classifica_pelos_dias_restantes() {
        let hoje = data(2025, 3, 1);

        let pendente = status_prazo(Some(data(2025, 3, 11)), hoje);
        assert_eq!(pendente.classe, ClassePrazo::Pendente);
        assert_eq!(pendente.dias_restantes, Some(10));
        assert_eq!(pendente.texto(), "10 dias");

        let expirado = status_prazo(Some(data(2025, 2, 28)), hoje);
        assert_eq!(expirado.classe, ClassePrazo::Expirado);

        let ativo = status_prazo(Some(data(2025, 4, 30)), hoje);
        assert_eq!(ativo.classe, ClassePrazo::Ativo);
        assert_eq!(ativo.texto(), "OK");
    }

    #[test]
    fn status_prazo_sem_data_e_neutro() {
        let status = status_prazo(None, data(2025, 3, 1));
        assert_eq!(status.classe, ClassePrazo::Neutro);
        assert_eq!(status.texto(), "-");
    }

    #[test]
    fn limites_do_status_pendente() {
        let hoje = data(2025, 3, 1);
        assert_eq!(status_prazo(Some(hoje), hoje).classe, ClassePrazo::Pendente);
        assert_eq!(
            status_prazo(Some(data(2025, 3, 31)), hoje).classe,
            ClassePrazo::Pendente
        );
        assert_eq!(
            status_prazo(Some(data(2025, 4, 1)), hoje).classe,
            ClassePrazo::Ativo
        );
    }

    #[test]
    fn parse_data_aceita_os_dois_formatos() {
        assert_eq!(parse_data_flexivel("31/01/2024"), Some(data(2024, 1, 31)));
        assert_eq!(parse_data_flexivel("2024-01-31"), Some(data(2024, 1, 31)));
        assert_eq!(parse_data_flexivel("31-01-2024"), None);
        assert_eq!(parse_data_flexivel(""), None);
    }

    #[test]
    fn formatar_e_reparsear_preserva_o_dia() {
        let original = parse_data_flexivel("31/01/2024");
        let exibida = formatar_data(original);
        assert_eq!(parse_data_flexivel(&exibida), original);
    }

    #[test]
    fn formatar_hora_trunca_segundos() {
        assert_eq!(formatar_hora(Some("08:30:00")), "08:30");
        assert_eq!(formatar_hora(Some("08:30")), "08:30");
        assert_eq!(formatar_hora(None), "-");
        assert_eq!(formatar_hora(Some("")), "-");
    }

    #[test]
    fn horas_para_dias_na_base_de_oito_horas() {
        assert_eq!(horas_para_dias(Some("16:00"), HORAS_POR_DIA_PADRAO), 2.0);
        assert_eq!(horas_para_dias(Some("04:00"), HORAS_POR_DIA_PADRAO), 0.5);
        assert_eq!(horas_para_dias(None, HORAS_POR_DIA_PADRAO), 0.0);
    }
}
