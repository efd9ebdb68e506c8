use serde::Deserialize;

/// Template for one sentinel error
///
/// ```toml
/// [errors.not_found]
/// status = 404
/// message = "resource missing"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorConfig {
    /// HTTP status code written for this error
    pub status: u16,
    /// Message exposed to API consumers
    pub message: String,
}
