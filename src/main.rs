//! Biblioteca Digital command-line client.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblioteca_client::{notify::Notification, state::Tab, AppConfig, Command, Controller};

mod cli;

use clap::Parser;
use cli::{BookCommand, Cli, CliCommand, LoanCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = level;
    }

    init_tracing(&config);
    tracing::debug!("Biblioteca client v{} -> {}", env!("CARGO_PKG_VERSION"), config.api.base_url);

    let default_days = config.loans.default_days;
    let mut controller = Controller::from_config(config)?;

    let mut last_view = None;
    for command in commands_for(cli.command, default_days) {
        last_view = Some(controller.dispatch(command).await);
    }

    let notifications = controller.take_notifications();
    for notification in &notifications {
        eprintln!("{}", notification);
    }

    if let Some(view) = last_view {
        println!("{}", serde_json::to_string_pretty(&view)?);
    }

    if notifications.iter().any(Notification::is_error) {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "biblioteca_client={level},biblioteca={level}",
            level = config.logging.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Translate one CLI invocation into controller commands.
///
/// Each run starts with an empty cache, so commands that act on cached
/// entries load them first.
fn commands_for(command: CliCommand, default_days: u32) -> Vec<Command> {
    match command {
        CliCommand::Status => vec![Command::CheckConnection],
        CliCommand::Dashboard => vec![Command::CheckConnection, Command::SwitchTab(Tab::Dashboard)],
        CliCommand::Books { filter } => vec![Command::LoadBooks, Command::FilterBooks(filter)],
        CliCommand::Book(book) => match book {
            BookCommand::Show { id } => vec![Command::ShowBook { id }],
            BookCommand::Add(args) => vec![
                Command::SwitchTab(Tab::Books),
                Command::CreateBook(args.into()),
            ],
            BookCommand::Update { id, book } => vec![
                Command::SwitchTab(Tab::Books),
                Command::UpdateBook {
                    id,
                    input: book.into(),
                },
            ],
            BookCommand::Toggle { id } => vec![
                Command::SwitchTab(Tab::Books),
                Command::ToggleAvailability { id },
            ],
            BookCommand::Delete { id } => {
                vec![Command::SwitchTab(Tab::Books), Command::DeleteBook { id }]
            }
            BookCommand::Enrich { id } => {
                vec![Command::SwitchTab(Tab::Books), Command::EnrichBook { id }]
            }
            BookCommand::Preview { isbn } => vec![Command::PreviewIsbn { isbn }],
        },
        CliCommand::Loans { filter, email } => match email {
            Some(email) => vec![Command::LoansByEmail { email }],
            None => vec![Command::LoadLoans, Command::FilterLoans(filter)],
        },
        CliCommand::Loan(loan) => match loan {
            LoanCommand::New { book } => {
                let form = match book {
                    Some(book_id) => Command::QuickLoan { book_id },
                    None => Command::NewLoan,
                };
                vec![Command::LoadBooks, form]
            }
            LoanCommand::Create { book, borrower } => vec![
                Command::SwitchTab(Tab::Loans),
                Command::CreateLoan(borrower.into_request(book, default_days)),
            ],
            LoanCommand::Edit { id } => vec![
                Command::LoadBooks,
                Command::SwitchTab(Tab::Loans),
                Command::EditLoan { id },
            ],
            LoanCommand::Update { id, borrower } => vec![
                Command::SwitchTab(Tab::Loans),
                Command::UpdateLoan {
                    id,
                    update: borrower.into_update(),
                },
            ],
            LoanCommand::Return { id } => {
                vec![Command::SwitchTab(Tab::Loans), Command::ReturnLoan { id }]
            }
            LoanCommand::ReturnBook { book_id } => vec![
                Command::SwitchTab(Tab::Loans),
                Command::ReturnByBook { book_id },
            ],
            LoanCommand::Delete { id } => vec![
                Command::SwitchTab(Tab::Loans),
                Command::DeleteLoan { id },
            ],
        },
        CliCommand::Search { term, kind } => vec![
            Command::SwitchTab(Tab::Search),
            Command::Search { term, kind },
        ],
    }
}
