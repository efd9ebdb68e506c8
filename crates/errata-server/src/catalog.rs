use errata_config::Config;
use errata_core::Sentinel;
use errata_dispatch::{ErrorDescriptor, Registry, StatusRange};
use http::StatusCode;

use crate::ServerError;

/// Build the error registry declared in the `[errors]` table
///
/// Each entry is registered under a [`Sentinel`] carrying its table name.
/// When `[validation]` is enabled every status must fall inside the
/// configured range.
///
/// # Errors
///
/// Returns an error if a status code is invalid or the registry rejects
/// an entry
pub fn build_registry(config: &Config) -> Result<Registry, ServerError> {
    let mut builder = Registry::builder();

    for (name, error) in &config.errors {
        let status = StatusCode::from_u16(error.status).map_err(|_| ServerError::InvalidStatus {
            name: name.clone(),
            status: error.status,
        })?;

        builder = builder.register(
            Sentinel::named(name.clone()),
            ErrorDescriptor::new(status, error.message.clone()),
        );
    }

    let validation = &config.validation;
    if validation.enabled {
        builder = builder.validator(StatusRange::new(validation.min_status, validation.max_status));
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use errata_config::{ErrorConfig, ValidationConfig};
    use errata_dispatch::RegistryError;

    use super::*;

    fn config(errors: &[(&str, u16, &str)]) -> Config {
        Config {
            errors: errors
                .iter()
                .map(|&(name, status, message)| {
                    (
                        name.to_string(),
                        ErrorConfig {
                            status,
                            message: message.to_string(),
                        },
                    )
                })
                .collect(),
            ..Config::default()
        }
    }

    #[test]
    fn registers_every_configured_error() {
        let registry = build_registry(&config(&[
            ("not_found", 404, "resource missing"),
            ("conflict", 409, "already exists"),
        ]))
        .unwrap();

        assert_eq!(registry.len(), 2);

        let descriptor = registry.get(&Sentinel::named("not_found")).unwrap();
        assert_eq!(descriptor.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            descriptor.serialized().unwrap().as_ref(),
            br#"{"status-code":404,"message":"resource missing"}"#
        );
    }

    #[test]
    fn validation_range_is_applied() {
        let err = build_registry(&config(&[("redirect", 302, "moved")])).unwrap_err();

        assert!(matches!(err, ServerError::Registry(RegistryError::Validation { .. })));
    }

    #[test]
    fn disabled_validation_accepts_any_status() {
        let mut config = config(&[("redirect", 302, "moved")]);
        config.validation = ValidationConfig {
            enabled: false,
            ..ValidationConfig::default()
        };

        let registry = build_registry(&config).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn invalid_status_is_reported_by_name() {
        let err = build_registry(&config(&[("broken", 42, "nope")])).unwrap_err();

        assert!(matches!(err, ServerError::InvalidStatus { ref name, status: 42 } if name == "broken"));
    }
}
