use dine_client::ClientError;
use dine_printer::PrintError;
use shared::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("invalid printer target `{0}`; use stdout, file:<path> or <host>:<port>")]
    InvalidPrinter(String),
    #[error("printer setup failed: {0}")]
    Printer(#[from] PrintError),
    #[error("invalid item `{0}`; expected <dish-id>:<quantity>")]
    InvalidItem(String),
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AppError> for CliError {
    fn from(err: AppError) -> Self {
        Self::Client(err.into())
    }
}

impl CliError {
    pub fn is_token_expired(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_token_expired())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_cancelled())
    }
}

pub type CliResult<T> = Result<T, CliError>;
