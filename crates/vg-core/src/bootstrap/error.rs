use std::time::Duration;

/// Errors that end a bootstrap attempt in `Failed`.
///
/// The display string is what the user sees next to the retry action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapError {
    /// The setup status provider reported an error; its message is kept verbatim.
    #[error("{0}")]
    Initialization(String),
    #[error("setup status check timed out after {}", humanize(.0))]
    Timeout(Duration),
}

impl BootstrapError {
    pub fn initialization(err: &anyhow::Error) -> Self {
        Self::Initialization(err.to_string())
    }
}

fn humanize(duration: &Duration) -> String {
    if duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
