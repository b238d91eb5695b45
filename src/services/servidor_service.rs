// src/services/servidor_service.rs
use crate::{
    error::{AppError, AppResult},
    models::servidor::{AtualizarServidorPayload, NovoServidorPayload, Servidor},
};
use sqlx::SqlitePool;

pub async fn listar_servidores(pool: &SqlitePool) -> AppResult<Vec<Servidor>> {
    let servidores = sqlx::query_as::<_, Servidor>("SELECT * FROM servidores ORDER BY nome ASC")
        .fetch_all(pool)
        .await?;
    Ok(servidores)
}

pub async fn buscar_por_nf(pool: &SqlitePool, nf: &str) -> AppResult<Servidor> {
    sqlx::query_as::<_, Servidor>("SELECT * FROM servidores WHERE nf = ?")
        .bind(nf)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Servidor não encontrado"))
}

pub async fn criar_servidor(pool: &SqlitePool, payload: NovoServidorPayload) -> AppResult<Servidor> {
    // NF é chave de negócio única
    let existe: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM servidores WHERE nf = ?)")
        .bind(&payload.nf)
        .fetch_one(pool)
        .await?;
    if existe {
        return Err(AppError::BadRequest("NF já cadastrado".to_string()));
    }

    let res = sqlx::query("INSERT INTO servidores (nf, nome, setor) VALUES (?, ?, ?)")
        .bind(&payload.nf)
        .bind(&payload.nome)
        .bind(&payload.setor)
        .execute(pool)
        .await?;

    tracing::info!("Servidor criado: {} (NF {})", payload.nome, payload.nf);

    sqlx::query_as::<_, Servidor>("SELECT * FROM servidores WHERE id = ?")
        .bind(res.last_insert_rowid())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

pub async fn atualizar_servidor(
    pool: &SqlitePool,
    id: i64,
    payload: AtualizarServidorPayload,
) -> AppResult<Servidor> {
    let atual = sqlx::query_as::<_, Servidor>("SELECT * FROM servidores WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Servidor não encontrado"))?;

    let nome = payload.nome.unwrap_or(atual.nome);
    let setor = payload.setor.unwrap_or(atual.setor);

    sqlx::query(
        "UPDATE servidores SET nome = ?, setor = ?, atualizado_em = datetime('now') WHERE id = ?",
    )
    .bind(&nome)
    .bind(&setor)
    .bind(id)
    .execute(pool)
    .await?;

    sqlx::query_as::<_, Servidor>("SELECT * FROM servidores WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

/// Apaga o servidor e, em cascata, os dias trabalhados dele.
pub async fn deletar_servidor(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let nf: Option<String> = sqlx::query_scalar("SELECT nf FROM servidores WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(nf) = nf else {
        return Err(AppError::NotFound("Servidor não encontrado"));
    };

    sqlx::query("DELETE FROM dias_trabalhados WHERE nf = ?")
        .bind(&nf)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM servidores WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("Servidor NF {} removido (com registros)", nf);
    Ok(())
}
