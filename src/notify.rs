//! User-facing notifications

use serde::Serialize;

use crate::error::AppError;

const ISBN_NOT_FOUND: &str = "ISBN não encontrado";
const NOTHING_NEW: &str = "Nenhuma informação nova encontrada";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Convert a failure into what the user sees.
    ///
    /// Two server messages from the external ISBN lookup get friendlier
    /// wording; the rest are shown verbatim.
    pub fn from_error(error: &AppError) -> Self {
        match error {
            AppError::Network(_) => Self::error("Connection error"),
            AppError::Validation(msg) | AppError::BusinessRule(msg) => Self::warning(msg.clone()),
            other => {
                let message = other.user_message();
                if message.contains(ISBN_NOT_FOUND) {
                    Self::warning("ISBN not found in external sources. Check that the ISBN is correct.")
                } else if message.contains(NOTHING_NEW) {
                    Self::info("The book already has all available information.")
                } else {
                    Self::error(format!("Error: {message}"))
                }
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.severity {
            Severity::Success => "ok",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(message: &str) -> AppError {
        AppError::Api {
            status: 500,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_isbn_not_found_is_warning() {
        let n = Notification::from_error(&api(
            "ISBN não encontrado nas APIs externas. Verifique se o ISBN está correto: 123",
        ));
        assert_eq!(n.severity, Severity::Warning);
        assert!(n.message.starts_with("ISBN not found"));
    }

    #[test]
    fn test_nothing_new_is_info() {
        let n = Notification::from_error(&api(
            "Nenhuma informação nova encontrada para atualizar o livro",
        ));
        assert_eq!(n.severity, Severity::Info);
    }

    #[test]
    fn test_other_server_errors_are_shown_verbatim() {
        let n = Notification::from_error(&api("Livro não está disponível para empréstimo"));
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.message, "Error: Livro não está disponível para empréstimo");
    }

    #[test]
    fn test_local_refusal_is_warning() {
        let n = Notification::from_error(&AppError::BusinessRule("no".into()));
        assert_eq!(n.severity, Severity::Warning);
        assert!(!n.is_error());
    }
}
