//! Book, search and dashboard flows against a mock API server

mod common;

use biblioteca_client::{
    models::{BookFilter, BookInput, SearchKind},
    notify::Severity,
    state::{ConnectionStatus, Tab},
    views::View,
    AppError, Command,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{book_json, controller, loan_json};

fn dom_casmurro() -> BookInput {
    BookInput {
        title: "  Dom Casmurro ".into(),
        author: "Machado de Assis".into(),
        isbn: "9788500000001".into(),
        publication_year: Some(1899),
        publisher: Some("   ".into()),
        description: None,
    }
}

// ── Connection ──────────────────────────────────────────────────

#[tokio::test]
async fn check_connection_online() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/biblioteca/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "online",
            "versao": "1.0.0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    assert_eq!(ctl.check_connection().await, ConnectionStatus::Online);
    assert_eq!(ctl.state().connection, ConnectionStatus::Online);
}

#[tokio::test]
async fn check_connection_offline_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/biblioteca/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    let view = ctl.dispatch(Command::CheckConnection).await;
    assert_eq!(view, View::Connection(ConnectionStatus::Offline));
}

// ── Books ───────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_marks_available_book_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/livros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([book_json(1, "Dom Casmurro", true)])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/livros/1/marcar-indisponivel"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/livros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([book_json(1, "Dom Casmurro", false)])))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.dispatch(Command::SwitchTab(Tab::Books)).await;
    assert!(ctl.state().books[0].available);

    let now_available = ctl.toggle_availability(1).await.unwrap();
    assert!(!now_available);
    assert!(!ctl.state().books[0].available);

    let notes = ctl.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Success);
    assert_eq!(notes[0].message, "Book marked as unavailable");
}

#[tokio::test]
async fn toggle_marks_unavailable_book_available() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/livros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([book_json(4, "Helena", false)])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/livros/4/marcar-disponivel"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.dispatch(Command::SwitchTab(Tab::Books)).await;
    assert!(ctl.toggle_availability(4).await.unwrap());
}

#[tokio::test]
async fn toggle_of_unloaded_book_sends_nothing() {
    let server = MockServer::start().await;
    let mut ctl = controller(&server);

    let err = ctl.toggle_availability(5).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_book_reloads_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/livros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/livros"))
        .and(body_partial_json(json!({
            "titulo": "Dom Casmurro",
            "autor": "Machado de Assis",
            "editora": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(book_json(1, "Dom Casmurro", true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/livros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([book_json(1, "Dom Casmurro", true)])))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.dispatch(Command::SwitchTab(Tab::Books)).await;
    assert!(ctl.state().books.is_empty());

    let view = ctl.dispatch(Command::CreateBook(dom_casmurro())).await;
    match view {
        View::Books(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].book.title, "Dom Casmurro");
        }
        other => panic!("unexpected view: {other:?}"),
    }
    let sent = dom_casmurro().normalized();
    assert!(ctl.state().books.iter().any(|b| b.matches(&sent)));

    let notes = ctl.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Book created");
}

#[tokio::test]
async fn failed_create_keeps_cache_and_reports_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/livros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([book_json(1, "Dom Casmurro", true)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/livros"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "ISBN já cadastrado" })),
        )
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.dispatch(Command::SwitchTab(Tab::Books)).await;
    let before = ctl.state().books.clone();

    let view = ctl.dispatch(Command::CreateBook(dom_casmurro())).await;
    assert_eq!(view, View::Unchanged);
    assert_eq!(ctl.state().books, before);

    let notes = ctl.take_notifications();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].is_error());
    assert_eq!(notes[0].message, "Error: ISBN já cadastrado");
}

#[tokio::test]
async fn create_book_without_title_is_refused_locally() {
    let server = MockServer::start().await;
    let mut ctl = controller(&server);

    let input = BookInput {
        title: "   ".into(),
        ..dom_casmurro()
    };
    ctl.dispatch(Command::CreateBook(input)).await;

    let notes = ctl.take_notifications();
    assert_eq!(notes[0].severity, Severity::Warning);
    assert_eq!(notes[0].message, "Title is required");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn enrich_isbn_not_found_is_a_warning() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/livros/1/buscar-informacoes"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "ISBN não encontrado nas fontes externas"
        })))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.dispatch(Command::EnrichBook { id: 1 }).await;

    let notes = ctl.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Warning);
    assert!(notes[0].message.starts_with("ISBN not found"));
}

#[tokio::test]
async fn enrich_with_nothing_new_is_info() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/livros/1/buscar-informacoes"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("Nenhuma informação nova encontrada"),
        )
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.dispatch(Command::EnrichBook { id: 1 }).await;

    let notes = ctl.take_notifications();
    assert_eq!(notes[0].severity, Severity::Info);
}

#[tokio::test]
async fn book_rows_route_covers_through_proxy() {
    let server = MockServer::start().await;
    let mut book = book_json(2, "Iracema", true);
    book["urlCapa"] = json!("http://covers.example/iracema.jpg");
    Mock::given(method("GET"))
        .and(path("/livros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([book, book_json(3, "Helena", false)])))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.load_books().await.unwrap();

    let rows = ctl.book_rows(BookFilter::All);
    assert_eq!(
        rows[0].cover.as_deref(),
        Some(
            format!(
                "{}/api/images/proxy?url=http%3A%2F%2Fcovers.example%2Firacema.jpg",
                server.uri()
            )
            .as_str()
        )
    );
    assert_eq!(rows[1].cover, None);
    assert_eq!(ctl.book_rows(BookFilter::Unavailable).len(), 1);
}

#[tokio::test]
async fn show_missing_book_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/livros/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ctl = controller(&server);
    assert!(matches!(ctl.get_book(99).await, Err(AppError::NotFound(_))));
}

// ── Search ──────────────────────────────────────────────────────

#[tokio::test]
async fn search_by_title_uses_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/livros/titulo"))
        .and(query_param("titulo", "Dom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([book_json(1, "Dom Casmurro", true)])))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    let results = ctl.search(" Dom ", SearchKind::Title).await.unwrap();
    assert_eq!(results.books.len(), 1);
    assert_eq!(results.term, "Dom");
    assert_eq!(ctl.state().search.as_ref(), Some(&results));
}

#[tokio::test]
async fn search_by_author_and_general() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/livros/autor"))
        .and(query_param("autor", "Machado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/livros/buscar"))
        .and(query_param("termo", "casmurro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([book_json(1, "Dom Casmurro", true)])))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    assert!(ctl.search("Machado", SearchKind::Author).await.unwrap().books.is_empty());
    assert_eq!(ctl.search("casmurro", SearchKind::General).await.unwrap().books.len(), 1);
}

#[tokio::test]
async fn isbn_search_miss_is_an_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/livros/isbn/000"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/livros/isbn/111"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/livros/isbn/9788500000001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(book_json(1, "Dom Casmurro", true)))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    assert!(ctl.search("000", SearchKind::Isbn).await.unwrap().books.is_empty());
    assert!(ctl.search("111", SearchKind::Isbn).await.unwrap().books.is_empty());
    assert_eq!(ctl.search("9788500000001", SearchKind::Isbn).await.unwrap().books.len(), 1);
    assert!(ctl.take_notifications().is_empty());
}

#[tokio::test]
async fn blank_search_is_refused_locally() {
    let server = MockServer::start().await;
    let mut ctl = controller(&server);

    let view = ctl
        .dispatch(Command::Search {
            term: "  ".into(),
            kind: SearchKind::General,
        })
        .await;
    assert_eq!(view, View::Unchanged);

    let notes = ctl.take_notifications();
    assert_eq!(notes[0].severity, Severity::Warning);
    assert_eq!(notes[0].message, "Enter a search term");
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Dashboard ───────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_loads_all_sections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/biblioteca/estatisticas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalLivros": 2,
            "livrosDisponiveis": 1,
            "emprestimosAtivos": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/livros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            book_json(1, "Dom Casmurro", false),
            book_json(2, "Iracema", true)
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/emprestimos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            loan_json(1, 1, "DEVOLVIDO", "2024-01-02T10:00:00", "2024-01-09T10:00:00"),
            loan_json(2, 1, "ATIVO", "2024-01-05T10:00:00", "2024-01-12T10:00:00")
        ])))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    let view = ctl.load_dashboard().await;

    let stats = view.stats.expect("stats loaded");
    assert_eq!(stats.total_books, 2);
    assert_eq!(stats.overdue_loans, 0);
    assert_eq!(view.recent_activity.len(), 2);
    assert_eq!(view.recent_activity[0].loan_id, 2);
    assert_eq!(view.recent_activity[0].date, "05/01/2024");
    assert_eq!(ctl.state().books.len(), 2);
    assert!(ctl.take_notifications().is_empty());
}

#[tokio::test]
async fn dashboard_section_failure_is_isolated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/biblioteca/estatisticas"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Internal Server Error" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/livros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([book_json(1, "Dom Casmurro", true)])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/emprestimos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            loan_json(1, 1, "DEVOLVIDO", "2024-01-02T10:00:00", "2024-01-09T10:00:00")
        ])))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    let view = ctl.load_dashboard().await;

    assert_eq!(view.stats, None);
    assert_eq!(view.recent_activity.len(), 1);
    assert_eq!(ctl.state().loans.len(), 1);

    let notes = ctl.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Error: Internal Server Error");
}
