//! Shared fixtures for controller tests against a mock API server
#![allow(dead_code)]

use biblioteca_client::{AppConfig, Controller};
use chrono::NaiveDateTime;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Clock pinned for every controller built here
pub const NOW: &str = "2024-01-10T12:00:00";

pub fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str(NOW, "%Y-%m-%dT%H:%M:%S").unwrap()
}

pub fn controller(server: &MockServer) -> Controller {
    let mut config = AppConfig::default();
    config.api.base_url = server.uri();
    Controller::from_config(config)
        .expect("mock server URI is a valid base URL")
        .with_clock(now())
}

pub fn book_json(id: i32, title: &str, available: bool) -> Value {
    json!({
        "id": id,
        "titulo": title,
        "autor": "Machado de Assis",
        "isbn": format!("97885000000{id:02}"),
        "anoPublicacao": 1899,
        "editora": null,
        "descricao": null,
        "urlCapa": null,
        "disponivel": available,
        "dataCadastro": "2023-12-01T09:30:00"
    })
}

pub fn loan_json(id: i32, book_id: i32, status: &str, date: &str, due: &str) -> Value {
    json!({
        "id": id,
        "livro": book_json(book_id, "Dom Casmurro", status != "ATIVO"),
        "nomePessoa": "Ana Souza",
        "emailPessoa": "ana@example.com",
        "telefonePessoa": null,
        "dataEmprestimo": date,
        "dataPrevistaDevolucao": due,
        "dataDevolucao": null,
        "status": status,
        "observacoes": null
    })
}
