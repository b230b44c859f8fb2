use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("System error: {0}")]
    System(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Wrap an IO error together with the path it happened on
    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        AppError::Io(format!("{}: {}", path.display(), err))
    }
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::Io(msg) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
        AppError::Config(msg) => {
            eprintln!("⚙️  {}", OutputStyle::error(&format!("Config: {}", msg)));
        }
        AppError::System(msg) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
    }
}
