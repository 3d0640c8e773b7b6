use thiserror::Error;

/// Errors raised while talking to the ProRank backend or the local store.
///
/// Views never surface these to the user; they log them and fall back to an
/// empty state. The CLI only reports them for commands that have no empty
/// state to fall back to (e.g. saving a session token).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Rejected transitions in the new-job wizard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Select a folder before continuing")]
    NoFolderSelected,

    #[error("Job name must not be blank")]
    BlankJobName,

    #[error("Action not available on step {0}")]
    WrongStep(u8),

    #[error("A job is already being submitted")]
    AlreadySubmitting,
}
