// src/services/registro_service.rs
//
// CRUD dos dias trabalhados. Os campos derivados (h_trabalhada, h_direito,
// prazo_max, saldo) são sempre recalculados aqui pelas regras de
// `services::horas` — o cliente nunca é a autoridade sobre eles.

use crate::{
    error::{AppError, AppResult},
    models::registro::{
        AtualizarRegistroPayload, ConsultaServidor, DiaTrabalhado, Estatisticas,
        NovoRegistroPayload,
    },
    services::{horas, servidor_service},
};
use sqlx::SqlitePool;

pub async fn listar_registros(pool: &SqlitePool) -> AppResult<Vec<DiaTrabalhado>> {
    let registros = sqlx::query_as::<_, DiaTrabalhado>(
        "SELECT * FROM dias_trabalhados ORDER BY dia_trabalhado DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(registros)
}

pub async fn buscar_registro(pool: &SqlitePool, id: i64) -> AppResult<DiaTrabalhado> {
    sqlx::query_as::<_, DiaTrabalhado>("SELECT * FROM dias_trabalhados WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Registro não encontrado"))
}

pub async fn listar_por_servidor(pool: &SqlitePool, nf: &str) -> AppResult<Vec<DiaTrabalhado>> {
    let registros = sqlx::query_as::<_, DiaTrabalhado>(
        "SELECT * FROM dias_trabalhados WHERE nf = ? ORDER BY dia_trabalhado DESC",
    )
    .bind(nf)
    .fetch_all(pool)
    .await?;
    Ok(registros)
}

pub async fn criar_registro(
    pool: &SqlitePool,
    payload: NovoRegistroPayload,
) -> AppResult<DiaTrabalhado> {
    let dia_trabalhado = payload
        .dia_trabalhado
        .as_deref()
        .and_then(horas::parse_data_flexivel);

    // Horários podem chegar como HH:MM:SS; só HH:MM é gravado
    let entrada = payload
        .entrada
        .filter(|e| !e.is_empty())
        .map(|e| horas::formatar_hora(Some(&e)));
    let saida = payload
        .saida
        .filter(|s| !s.is_empty())
        .map(|s| horas::formatar_hora(Some(&s)));

    // Horas trabalhadas: aceita o valor enviado; senão deriva de entrada/saída
    let h_trabalhada = match payload.h_trabalhada.filter(|h| !h.is_empty()) {
        Some(h) => Some(h),
        None => match (entrada.as_deref(), saida.as_deref()) {
            (Some(e), Some(s)) => Some(horas::calcular_horas(Some(e), Some(s))),
            _ => None,
        },
    };

    // Direito = 2x trabalhadas
    let h_direito = match payload.h_direito.filter(|h| !h.is_empty()) {
        Some(h) => Some(h),
        None => h_trabalhada
            .as_deref()
            .map(|h| horas::dobrar_horas(Some(h))),
    };

    // Prazo máximo = dia trabalhado + 6 meses, salvo valor explícito
    let prazo_max = payload
        .prazo_max
        .as_deref()
        .and_then(horas::parse_data_flexivel)
        .or_else(|| horas::calcular_prazo(dia_trabalhado));

    let saldo = match payload.saldo.filter(|s| !s.is_empty()) {
        Some(s) => Some(s),
        None => Some(horas::calcular_saldo(
            h_direito.as_deref(),
            payload.horas_descontadas.as_deref(),
        )),
    };

    let res = sqlx::query(
        r#"
        INSERT INTO dias_trabalhados
            (nf, nome, setor, vinculo, dia_trabalhado, entrada, saida, h_trab,
             h_direito, prazo_max, h_totais, hora_dia, dias_gozar, dias_gozados,
             h_descontadas, saldo, observacao)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.nf)
    .bind(payload.nome.unwrap_or_default())
    .bind(payload.setor.unwrap_or_default())
    .bind(&payload.vinculo)
    .bind(dia_trabalhado)
    .bind(&entrada)
    .bind(&saida)
    .bind(&h_trabalhada)
    .bind(&h_direito)
    .bind(prazo_max)
    .bind(&payload.h_totais)
    .bind(payload.hora_dia.unwrap_or_else(|| "08:00".to_string()))
    .bind(&payload.dias_gozar)
    .bind(&payload.dias_gozados)
    .bind(&payload.horas_descontadas)
    .bind(&saldo)
    .bind(&payload.observacao)
    .execute(pool)
    .await?;

    buscar_registro(pool, res.last_insert_rowid()).await
}

pub async fn atualizar_registro(
    pool: &SqlitePool,
    id: i64,
    payload: AtualizarRegistroPayload,
) -> AppResult<DiaTrabalhado> {
    let mut registro = buscar_registro(pool, id).await?;

    if let Some(nome) = payload.nome {
        registro.nome = nome;
    }
    if let Some(setor) = payload.setor {
        registro.setor = setor;
    }
    if payload.vinculo.is_some() {
        registro.vinculo = payload.vinculo;
    }

    // Mudou o dia trabalhado: o prazo de 6 meses acompanha
    if let Some(dia) = payload.dia_trabalhado.as_deref() {
        registro.dia_trabalhado = horas::parse_data_flexivel(dia);
        registro.prazo_max = horas::calcular_prazo(registro.dia_trabalhado);
    }

    // Vazio limpa o horário; preenchido entra truncado a HH:MM
    if let Some(entrada) = payload.entrada {
        registro.entrada = (!entrada.is_empty()).then(|| horas::formatar_hora(Some(&entrada)));
    }
    if let Some(saida) = payload.saida {
        registro.saida = (!saida.is_empty()).then(|| horas::formatar_hora(Some(&saida)));
    }

    // Com entrada e saída presentes, as horas derivadas mandam;
    // sem elas, aceita valores informados diretamente
    match (registro.entrada.as_deref(), registro.saida.as_deref()) {
        (Some(e), Some(s)) if !e.is_empty() && !s.is_empty() => {
            let h_trab = horas::calcular_horas(Some(e), Some(s));
            registro.h_direito = Some(horas::dobrar_horas(Some(&h_trab)));
            registro.h_trabalhada = Some(h_trab);
        }
        _ => {
            if payload.h_trabalhada.is_some() {
                registro.h_trabalhada = payload.h_trabalhada;
            }
            if payload.h_direito.is_some() {
                registro.h_direito = payload.h_direito;
            }
        }
    }

    // Prazo informado explicitamente vence o derivado
    if let Some(prazo) = payload.prazo_max.as_deref() {
        if let Some(data) = horas::parse_data_flexivel(prazo) {
            registro.prazo_max = Some(data);
        }
    }

    if payload.h_totais.is_some() {
        registro.h_totais = payload.h_totais;
    }
    if payload.hora_dia.is_some() {
        registro.hora_dia = payload.hora_dia;
    }
    if payload.dias_gozar.is_some() {
        registro.dias_gozar = payload.dias_gozar;
    }
    if payload.dias_gozados.is_some() {
        registro.dias_gozados = payload.dias_gozados;
    }
    if payload.horas_descontadas.is_some() {
        registro.horas_descontadas = payload.horas_descontadas;
    }
    if payload.observacao.is_some() {
        registro.observacao = payload.observacao;
    }

    // Saldo nunca vem do cliente: direito - descontadas, com sinal
    registro.saldo = Some(horas::calcular_saldo(
        registro.h_direito.as_deref(),
        registro.horas_descontadas.as_deref(),
    ));

    sqlx::query(
        r#"
        UPDATE dias_trabalhados SET
            nome = ?, setor = ?, vinculo = ?, dia_trabalhado = ?, entrada = ?,
            saida = ?, h_trab = ?, h_direito = ?, prazo_max = ?, h_totais = ?,
            hora_dia = ?, dias_gozar = ?, dias_gozados = ?, h_descontadas = ?,
            saldo = ?, observacao = ?, atualizado_em = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(&registro.nome)
    .bind(&registro.setor)
    .bind(&registro.vinculo)
    .bind(registro.dia_trabalhado)
    .bind(&registro.entrada)
    .bind(&registro.saida)
    .bind(&registro.h_trabalhada)
    .bind(&registro.h_direito)
    .bind(registro.prazo_max)
    .bind(&registro.h_totais)
    .bind(&registro.hora_dia)
    .bind(&registro.dias_gozar)
    .bind(&registro.dias_gozados)
    .bind(&registro.horas_descontadas)
    .bind(&registro.saldo)
    .bind(&registro.observacao)
    .bind(id)
    .execute(pool)
    .await?;

    buscar_registro(pool, id).await
}

pub async fn deletar_registro(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let res = sqlx::query("DELETE FROM dias_trabalhados WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if res.rows_affected() == 0 {
        return Err(AppError::NotFound("Registro não encontrado"));
    }
    Ok(())
}

// --- Derivações de leitura ---

/// Resumo geral: totais, média de horas trabalhadas e dias de folga.
pub async fn estatisticas(pool: &SqlitePool) -> AppResult<Estatisticas> {
    let total_servidores: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM servidores")
        .fetch_one(pool)
        .await?;

    let registros = listar_registros(pool).await?;

    let com_horas: Vec<&str> = registros
        .iter()
        .filter_map(|r| r.h_trabalhada.as_deref())
        .collect();
    let media_horas = if com_horas.is_empty() {
        "00:00".to_string()
    } else {
        let total: i64 = com_horas
            .iter()
            .filter_map(|h| horas::tempo_para_minutos(h))
            .sum();
        horas::minutos_para_tempo(total / com_horas.len() as i64)
    };

    let total_dias_folga: f64 = registros
        .iter()
        .filter_map(|r| r.dias_gozar.as_deref())
        .filter_map(|d| d.trim().parse::<f64>().ok())
        .sum();

    Ok(Estatisticas {
        total_servidores,
        total_registros: registros.len() as i64,
        media_horas,
        total_dias_folga: (total_dias_folga * 100.0).round() / 100.0,
    })
}

/// Gestão à vista: consulta rápida por NF com os totais do servidor.
pub async fn consulta_por_nf(pool: &SqlitePool, nf: &str) -> AppResult<ConsultaServidor> {
    let servidor = servidor_service::buscar_por_nf(pool, nf).await?;
    let registros = listar_por_servidor(pool, nf).await?;

    let total_direito = horas::somar_horas(registros.iter().map(|r| r.h_direito.as_deref()));
    let total_descontadas =
        horas::somar_horas(registros.iter().map(|r| r.horas_descontadas.as_deref()));

    let saldo_minutos = horas::tempo_para_minutos(&total_direito).unwrap_or(0)
        - horas::tempo_para_minutos(&total_descontadas).unwrap_or(0);

    // Dias a gozar só fazem sentido com saldo positivo (base de 8h/dia)
    let dias_gozar = if saldo_minutos > 0 {
        let dias = (saldo_minutos as f64 / 60.0) / horas::HORAS_POR_DIA_PADRAO;
        (dias * 100.0).round() / 100.0
    } else {
        0.0
    };

    Ok(ConsultaServidor {
        servidor,
        horas_direito: total_direito,
        horas_descontadas: total_descontadas,
        saldo: horas::minutos_para_tempo(saldo_minutos.abs()),
        saldo_negativo: saldo_minutos < 0,
        dias_gozar,
        hora_dia: "08:00".to_string(),
        total_registros: registros.len(),
        registros,
    })
}
