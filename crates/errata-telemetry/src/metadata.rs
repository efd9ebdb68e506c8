use errata_config::TelemetryConfig;
use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource as semconv;

/// Resource attributes attached to every exported span and metric
pub(crate) fn build_resource(config: &TelemetryConfig) -> Resource {
    let attributes = [
        KeyValue::new(semconv::SERVICE_NAME, config.service_name.clone()),
        KeyValue::new(semconv::SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
    ]
    .into_iter()
    .chain(
        config
            .resource_attributes
            .iter()
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone())),
    );

    Resource::builder().with_attributes(attributes).build()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use opentelemetry::{Key, Value};

    use super::*;

    #[test]
    fn resource_carries_service_and_custom_attributes() {
        let config = TelemetryConfig {
            service_name: "errata-preview".to_string(),
            resource_attributes: HashMap::from([("deployment.environment".to_string(), "test".to_string())]),
            ..TelemetryConfig::default()
        };

        let resource = build_resource(&config);

        assert_eq!(
            resource.get(&Key::from_static_str(semconv::SERVICE_NAME)),
            Some(Value::from("errata-preview"))
        );
        assert_eq!(
            resource.get(&Key::from_static_str("deployment.environment")),
            Some(Value::from("test"))
        );
        assert!(resource.get(&Key::from_static_str(semconv::SERVICE_VERSION)).is_some());
    }
}
