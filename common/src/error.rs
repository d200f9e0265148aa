use thiserror::Error;

/// Errors that abort a run before any probing begins.
///
/// Everything past startup is absorbed per target: an unreachable or slow
/// host is a non-match, never a scan failure.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid CIDR block '{0}'")]
    InvalidCidr(String),

    #[error("cannot read target list '{0}'")]
    ListUnreadable(String),

    #[error("SHODAN_API_KEY is not set; required for passive mode")]
    MissingApiKey,
}
