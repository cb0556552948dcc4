use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolidscoreError {
    #[error("io error: {0}")]
    Io(String),
    #[error("config parse error: {0}")]
    ConfigParse(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("cli error: {0}")]
    Cli(String),
    #[error("process error: {0}")]
    Process(String),
    #[error("report error: {0}")]
    Report(String),
    #[error("missing run context: {0}")]
    Context(String),
}
