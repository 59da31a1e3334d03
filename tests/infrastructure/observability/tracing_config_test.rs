use transcribe_gateway::infrastructure::observability::TracingConfig;
use transcribe_gateway::presentation::config::{Environment, LoggingSettings};

#[test]
fn given_json_logging_when_building_from_settings_then_json_format_is_enabled() {
    let config = TracingConfig::from_settings(Environment::Prod, &LoggingSettings { json: true });

    assert!(config.json_format);
    assert_eq!(config.environment, "Prod");
}

#[test]
fn given_default_logging_when_building_from_settings_then_uses_text_output() {
    let config = TracingConfig::from_settings(Environment::Local, &LoggingSettings::default());

    assert!(!config.json_format);
    assert_eq!(config.environment, "Local");
}
