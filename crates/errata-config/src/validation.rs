use serde::Deserialize;

/// Status range every configured error must fall into
///
/// Defaults to client and server errors (`400..=599`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    pub enabled: bool,
    pub min_status: u16,
    pub max_status: u16,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_status: 400,
            max_status: 599,
        }
    }
}
