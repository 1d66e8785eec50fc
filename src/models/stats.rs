//! Dashboard statistics and service status

use serde::{Deserialize, Serialize};

/// Body of `GET /biblioteca/estatisticas`. Missing counters read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryStats {
    #[serde(rename = "totalLivros")]
    pub total_books: i64,
    #[serde(rename = "livrosDisponiveis")]
    pub available_books: i64,
    #[serde(rename = "livrosIndisponiveis")]
    pub unavailable_books: i64,
    #[serde(rename = "emprestimosAtivos")]
    pub active_loans: i64,
    #[serde(rename = "emprestimosAtrasados")]
    pub overdue_loans: i64,
}

/// Body of `GET /biblioteca/status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    pub status: Option<String>,
    #[serde(rename = "versao")]
    pub version: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}
