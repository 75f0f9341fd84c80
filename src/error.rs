//! Error type shared by the credential store, data loaders, access gate and
//! dataset replacement.

/// Dashboard errors.
///
/// The `String` payloads carry detail for the log (file paths, parser output)
/// and never reach the browser; pages show [`DashboardError::user_message`].
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Credential file missing, unreadable or not valid JSON.
    StoreUnavailable(String, String),
    /// Data file missing or unreadable.
    DataUnavailable(String, String),
    /// File parsed but does not have the expected columns or value types.
    SchemaMismatch(String, String),
    InvalidCredentials,
    Unauthenticated,
    Forbidden,
    NotFound(String),
    /// I/O failure while writing or swapping in an uploaded dataset.
    UploadFailed(String),
    /// Upload target is not one of the known datasets.
    InvalidTarget(String),
    /// The production chart could not be drawn.
    ChartFailed(String),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::StoreUnavailable(path, err) => {
                write!(f, "Credential store unavailable at {}: {}", path, err)
            }
            DashboardError::DataUnavailable(path, err) => {
                write!(f, "Data file unavailable at {}: {}", path, err)
            }
            DashboardError::SchemaMismatch(path, err) => {
                write!(f, "Schema mismatch in {}: {}", path, err)
            }
            DashboardError::InvalidCredentials => write!(f, "Invalid username or password"),
            DashboardError::Unauthenticated => write!(f, "Not logged in"),
            DashboardError::Forbidden => write!(f, "Admin role required"),
            DashboardError::NotFound(what) => write!(f, "{} not found", what),
            DashboardError::UploadFailed(err) => write!(f, "Upload failed: {}", err),
            DashboardError::InvalidTarget(kind) => write!(f, "Invalid upload target: {}", kind),
            DashboardError::ChartFailed(err) => write!(f, "Chart rendering failed: {}", err),
        }
    }
}

impl DashboardError {
    /// Returns a user-facing error message without exposing filesystem paths.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::StoreUnavailable(_, _) => "Login is currently unavailable".to_string(),
            DashboardError::DataUnavailable(_, _) => "Data file is not available".to_string(),
            DashboardError::SchemaMismatch(_, err) => {
                format!("Data file does not have the expected format ({})", err)
            }
            DashboardError::InvalidCredentials => "Invalid username or password".to_string(),
            DashboardError::Unauthenticated => "Please log in".to_string(),
            DashboardError::Forbidden => "Admin access required".to_string(),
            DashboardError::NotFound(what) => format!("{} not found.", what),
            DashboardError::UploadFailed(_) => "Failed to save the uploaded file".to_string(),
            DashboardError::InvalidTarget(_) => "Unknown dataset type".to_string(),
            DashboardError::ChartFailed(_) => "The chart could not be drawn".to_string(),
        }
    }
}

impl std::error::Error for DashboardError {}

pub type Result<T> = std::result::Result<T, DashboardError>;
