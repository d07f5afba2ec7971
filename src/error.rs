// src/error.rs
//! Ошибки шаблона сценария

use thiserror::Error;

/// Ошибки загрузки, проверки и подготовки шаблона
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Случайных рас запрошено больше, чем осталось свободных играбельных рас
    #[error(
        "too many players requesting random race: {random_slots} random slot(s), {available} distinct playable race(s) left"
    )]
    ResolutionExhausted { random_slots: usize, available: usize },

    #[error("invalid template settings: {0}")]
    InvalidSettings(String),

    #[error("invalid identifier '{0}'")]
    InvalidId(String),

    #[error("malformed record: {0}")]
    Record(String),

    #[error("failed to read template: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse template: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
