// src/services/alerta_service.rs
//
// Derivação dos alertas de prazo. Tudo aqui é recalculado do zero a cada
// chamada, em cima das coleções carregadas — não existe alerta persistido
// nem estado de "lido". O disparo é no dia em que faltam EXATAMENTE 30
// dias para o prazo: cada registro alerta uma única vez; se ninguém
// consultar o sistema naquele dia, o alerta daquele registro passa em
// branco. Escolha de política do órgão, não alargar para intervalo.

use crate::{
    error::AppResult,
    models::{
        alerta::{Alerta, EventoCalendario, TipoAlerta, TipoEvento, DIAS_AVISO_PRAZO},
        registro::DiaTrabalhado,
        servidor::Servidor,
    },
    services::{horas, registro_service, servidor_service},
};
use chrono::{Days, Local, NaiveDate};
use sqlx::SqlitePool;

/// Resolve o servidor dono de um registro, exigindo nome não vazio.
/// NF órfã degrada em silêncio: o registro simplesmente não alerta.
fn resolver_servidor<'a>(servidores: &'a [Servidor], nf: &str) -> Option<&'a Servidor> {
    servidores
        .iter()
        .find(|s| s.nf == nf)
        .filter(|s| !s.nome.trim().is_empty())
}

/// Alertas do dia: registros cujo prazo máximo vence em exatos 30 dias.
pub fn calcular_alertas(
    servidores: &[Servidor],
    registros: &[DiaTrabalhado],
    hoje: NaiveDate,
) -> Vec<Alerta> {
    let mut alertas: Vec<Alerta> = registros
        .iter()
        .filter_map(|registro| {
            let prazo = registro.prazo_max?;
            let dias_restantes = (prazo - hoje).num_days();
            if dias_restantes != DIAS_AVISO_PRAZO {
                return None;
            }
            let servidor = resolver_servidor(servidores, &registro.nf)?;

            Some(Alerta {
                id: registro.id,
                nf: registro.nf.clone(),
                nome: servidor.nome.clone(),
                setor: if servidor.setor.is_empty() {
                    "-".to_string()
                } else {
                    servidor.setor.clone()
                },
                prazo_max: prazo,
                dias_restantes,
                tipo: TipoAlerta::por_dias_restantes(dias_restantes),
            })
        })
        .collect();

    alertas.sort_by_key(|a| a.dias_restantes);
    alertas
}

/// Eventos de uma data consultada no calendário: o lembrete cai em
/// `prazo - 30 dias`; o vencimento em si cai no próprio prazo.
pub fn eventos_no_dia(
    servidores: &[Servidor],
    registros: &[DiaTrabalhado],
    data: NaiveDate,
) -> Vec<EventoCalendario> {
    let mut eventos = Vec::new();

    for registro in registros {
        let Some(prazo) = registro.prazo_max else {
            continue;
        };
        let Some(servidor) = resolver_servidor(servidores, &registro.nf) else {
            continue;
        };

        let dia_lembrete = prazo.checked_sub_days(Days::new(DIAS_AVISO_PRAZO as u64));
        if dia_lembrete == Some(data) {
            eventos.push(EventoCalendario {
                nf: registro.nf.clone(),
                nome: servidor.nome.clone(),
                tipo: TipoEvento::Lembrete,
                label: format!("Lembrete: {} dias para o prazo", DIAS_AVISO_PRAZO),
            });
        }

        if prazo == data {
            eventos.push(EventoCalendario {
                nf: registro.nf.clone(),
                nome: servidor.nome.clone(),
                tipo: TipoEvento::PrazoMaximo,
                label: "Prazo Máximo".to_string(),
            });
        }
    }

    eventos
}

// --- Checagem periódica ---

/// Deriva os alertas de hoje e emite cada um no log, no máximo uma vez por
/// dia por registro (dedupe pela tabela log_alerta).
pub async fn processar_alertas_do_dia(pool: &SqlitePool) -> AppResult<usize> {
    let hoje = Local::now().date_naive();
    let servidores = servidor_service::listar_servidores(pool).await?;
    let registros = registro_service::listar_registros(pool).await?;

    let alertas = calcular_alertas(&servidores, &registros, hoje);
    let mut emitidos = 0;

    for alerta in &alertas {
        let res = sqlx::query(
            "INSERT OR IGNORE INTO log_alerta (registro_id, data_alerta) VALUES (?, ?)",
        )
        .bind(alerta.id)
        .bind(hoje)
        .execute(pool)
        .await?;

        if res.rows_affected() > 0 {
            tracing::warn!(
                "⏰ Prazo a {} dias: {} (NF {}) vence em {}",
                alerta.dias_restantes,
                alerta.nome,
                alerta.nf,
                horas::formatar_data(Some(alerta.prazo_max))
            );
            emitidos += 1;
        }
    }

    Ok(emitidos)
}

/// Tarefa de fundo: checa os alertas de prazo a cada hora.
pub async fn tarefa_alertas(pool: SqlitePool) {
    loop {
        match processar_alertas_do_dia(&pool).await {
            Ok(0) => {}
            Ok(n) => tracing::info!("{} alerta(s) de prazo emitidos", n),
            Err(e) => tracing::error!("Erro na checagem de alertas: {:?}", e),
        }
        tokio::time::sleep(std::time::Duration::from_secs(60 * 60)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn servidor(nf: &str, nome: &str, setor: &str) -> Servidor {
        Servidor {
            id: 1,
            nf: nf.to_string(),
            nome: nome.to_string(),
            setor: setor.to_string(),
            criado_em: None,
            atualizado_em: None,
        }
    }

    fn registro(id: i64, nf: &str, prazo: Option<NaiveDate>) -> DiaTrabalhado {
        DiaTrabalhado {
            id,
            nf: nf.to_string(),
            nome: String::new(),
            setor: String::new(),
            vinculo: None,
            dia_trabalhado: None,
            entrada: None,
            saida: None,
            h_trabalhada: None,
            h_direito: None,
            prazo_max: prazo,
            h_totais: None,
            hora_dia: None,
            dias_gozar: None,
            dias_gozados: None,
            horas_descontadas: None,
            saldo: None,
            observacao: None,
            criado_em: None,
            atualizado_em: None,
        }
    }

    fn hoje() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn alerta_dispara_em_exatos_30_dias() {
        let servidores = vec![servidor("123", "Maria Silva", "RH")];
        let registros = vec![registro(
            7,
            "123",
            hoje().checked_add_days(Days::new(30)),
        )];

        let alertas = calcular_alertas(&servidores, &registros, hoje());
        assert_eq!(alertas.len(), 1);
        assert_eq!(alertas[0].dias_restantes, 30);
        assert_eq!(alertas[0].nome, "Maria Silva");
        assert_eq!(alertas[0].tipo, TipoAlerta::Aviso);
    }

    #[test]
    fn fora_do_dia_exato_nao_ha_alerta() {
        // Igualdade exata: 29 e 31 dias ficam mudos. É a fragilidade
        // conhecida do disparo pontual — um dia sem consulta perde o aviso.
        let servidores = vec![servidor("123", "Maria Silva", "RH")];
        let registros = vec![
            registro(1, "123", hoje().checked_add_days(Days::new(29))),
            registro(2, "123", hoje().checked_add_days(Days::new(31))),
        ];

        assert!(calcular_alertas(&servidores, &registros, hoje()).is_empty());
    }

    #[test]
    fn servidor_irresoluvel_nao_alerta() {
        // NF órfã e nome vazio degradam em silêncio
        let servidores = vec![servidor("999", "", "RH")];
        let registros = vec![
            registro(1, "123", hoje().checked_add_days(Days::new(30))),
            registro(2, "999", hoje().checked_add_days(Days::new(30))),
        ];

        assert!(calcular_alertas(&servidores, &registros, hoje()).is_empty());
    }

    #[test]
    fn registro_sem_prazo_e_ignorado() {
        let servidores = vec![servidor("123", "Maria Silva", "RH")];
        let registros = vec![registro(1, "123", None)];

        assert!(calcular_alertas(&servidores, &registros, hoje()).is_empty());
    }

    #[test]
    fn setor_vazio_vira_tracinho() {
        let servidores = vec![servidor("123", "Maria Silva", "")];
        let registros = vec![registro(
            1,
            "123",
            hoje().checked_add_days(Days::new(30)),
        )];

        let alertas = calcular_alertas(&servidores, &registros, hoje());
        assert_eq!(alertas[0].setor, "-");
    }

    #[test]
    fn lembrete_cai_30_dias_antes_do_prazo() {
        let prazo = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let servidores = vec![servidor("123", "Maria Silva", "RH")];
        let registros = vec![registro(1, "123", Some(prazo))];

        let dia_lembrete = prazo.checked_sub_days(Days::new(30)).unwrap();
        let eventos = eventos_no_dia(&servidores, &registros, dia_lembrete);
        assert_eq!(eventos.len(), 1);
        assert_eq!(eventos[0].tipo, TipoEvento::Lembrete);

        // na véspera e no dia seguinte, nada
        let vespera = dia_lembrete.pred_opt().unwrap();
        assert!(eventos_no_dia(&servidores, &registros, vespera).is_empty());
        let seguinte = dia_lembrete.succ_opt().unwrap();
        assert!(eventos_no_dia(&servidores, &registros, seguinte).is_empty());
    }

    #[test]
    fn vencimento_aparece_no_proprio_prazo() {
        let prazo = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let servidores = vec![servidor("123", "Maria Silva", "RH")];
        let registros = vec![registro(1, "123", Some(prazo))];

        let eventos = eventos_no_dia(&servidores, &registros, prazo);
        assert_eq!(eventos.len(), 1);
        assert_eq!(eventos[0].tipo, TipoEvento::PrazoMaximo);
        assert_eq!(eventos[0].label, "Prazo Máximo");
    }
}
