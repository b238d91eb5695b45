// src/services/backup_service.rs
//
// Backup do ficheiro SQLite: cópia simples com timestamp no nome, mantendo
// só os 30 mais recentes. Roda a pedido (API) e numa tarefa a cada 6 horas.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const MANTER_BACKUPS: usize = 30;

#[derive(Debug, Serialize)]
pub struct BackupInfo {
    pub arquivo: String,
    pub tamanho: u64,
    pub criado_em: String,
}

fn nome_de_backup(nome: &str) -> bool {
    nome.starts_with("backup_") && nome.ends_with(".db")
}

pub async fn criar_backup(db_path: &Path, backup_dir: &Path) -> AppResult<PathBuf> {
    tokio::fs::create_dir_all(backup_dir).await?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let destino = backup_dir.join(format!("backup_{timestamp}.db"));
    tokio::fs::copy(db_path, &destino).await?;
    tracing::info!("Backup criado: {}", destino.display());

    limpar_backups_antigos(backup_dir, MANTER_BACKUPS).await?;
    Ok(destino)
}

/// Remove backups antigos, mantendo apenas os N mais recentes
/// (nomes com timestamp ordenam cronologicamente).
pub async fn limpar_backups_antigos(backup_dir: &Path, manter: usize) -> AppResult<()> {
    let mut nomes = Vec::new();
    let mut entradas = tokio::fs::read_dir(backup_dir).await?;
    while let Some(entrada) = entradas.next_entry().await? {
        let nome = entrada.file_name().to_string_lossy().into_owned();
        if nome_de_backup(&nome) {
            nomes.push(nome);
        }
    }

    nomes.sort();
    if nomes.len() > manter {
        let excedentes = nomes.len() - manter;
        for nome in nomes.into_iter().take(excedentes) {
            tokio::fs::remove_file(backup_dir.join(&nome)).await?;
            tracing::debug!("Backup antigo removido: {}", nome);
        }
    }
    Ok(())
}

/// Lista os backups disponíveis, do mais recente para o mais antigo.
pub async fn listar_backups(backup_dir: &Path) -> AppResult<Vec<BackupInfo>> {
    let mut backups = Vec::new();

    let mut entradas = match tokio::fs::read_dir(backup_dir).await {
        Ok(e) => e,
        // pasta ainda não existe: nenhum backup foi feito
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(backups),
        Err(e) => return Err(e.into()),
    };

    while let Some(entrada) = entradas.next_entry().await? {
        let nome = entrada.file_name().to_string_lossy().into_owned();
        if !nome_de_backup(&nome) {
            continue;
        }
        let meta = entrada.metadata().await?;
        let criado_em = meta
            .modified()
            .map(|t| {
                let dt: DateTime<Local> = t.into();
                dt.format("%Y-%m-%dT%H:%M:%S").to_string()
            })
            .unwrap_or_default();
        backups.push(BackupInfo {
            arquivo: nome,
            tamanho: meta.len(),
            criado_em,
        });
    }

    backups.sort_by(|a, b| b.arquivo.cmp(&a.arquivo));
    Ok(backups)
}

/// Lê um backup para download. O nome é validado contra o padrão de backup
/// para não servir caminhos arbitrários.
pub async fn ler_backup(backup_dir: &Path, arquivo: &str) -> AppResult<Vec<u8>> {
    if !nome_de_backup(arquivo) || arquivo.contains('/') || arquivo.contains('\\') {
        return Err(AppError::NotFound("Backup não encontrado"));
    }
    match tokio::fs::read(backup_dir.join(arquivo)).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::NotFound("Backup não encontrado"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Tarefa de fundo: backup automático a cada 6 horas.
pub async fn tarefa_backup(db_path: PathBuf, backup_dir: PathBuf) {
    loop {
        tokio::time::sleep(std::time::Duration::from_secs(6 * 60 * 60)).await;
        if let Err(e) = criar_backup(&db_path, &backup_dir).await {
            tracing::error!("Erro no backup automático: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconhece_nomes_de_backup() {
        assert!(nome_de_backup("backup_20250601_120000.db"));
        assert!(!nome_de_backup("banco_horas.db"));
        assert!(!nome_de_backup("backup_20250601_120000.db.txt"));
    }
}
