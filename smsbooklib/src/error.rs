//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmsBookError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Источник сообщений недоступен (нет файла, нет прав и т.п.).
    #[error("message source unavailable: {0}")]
    SourceUnavailable(String),

    /// Нарушены границы пагинации: это дефект логики, а не ошибка пользователя.
    #[error("pagination invariant violated: window {window}, range {from}..{to}, total {total}")]
    InvariantViolation {
        window: usize,
        from: usize,
        to: usize,
        total: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SmsBookError>;
