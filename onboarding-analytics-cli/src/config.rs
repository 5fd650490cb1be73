//! Script configuration loading and parsing

use anyhow::{Context, Result};
use onboarding_analytics::{
    EventType, Extension, OnboardingAction, OnboardingEvent, Parameters, Screen,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tracking script (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScriptConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output file for JSON lines (default: stdout)
    pub path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub include_timestamp: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            include_timestamp: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Which tracker entry point a scripted step goes through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackMode {
    #[default]
    Track,
    Start,
    End,
}

/// One step of a tracking script
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScriptedEvent {
    pub category: String,
    pub action: String,
    pub screen: Option<Screen>,
    pub extension: Option<Extension>,
    #[serde(default)]
    pub mode: TrackMode,
    pub parameters: Option<Parameters>,
}

impl ScriptedEvent {
    /// Resolve the step to a taxonomy value
    pub fn event_type(&self) -> onboarding_analytics::Result<EventType> {
        let action = OnboardingAction::from_parts(&self.action, self.screen, self.extension)?;
        Ok(OnboardingEvent::from_category(&self.category, action)?.into())
    }
}

/// Load a tracking script from a TOML file
pub fn load_config(path: &Path) -> Result<ScriptConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    parse_config(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Parse a tracking script and check that every step names a real event
pub fn parse_config(content: &str) -> Result<ScriptConfig> {
    let config: ScriptConfig = toml::from_str(content)?;

    for (index, step) in config.events.iter().enumerate() {
        step.event_type()
            .with_context(|| format!("Invalid event #{} ({})", index + 1, step.action))?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboarding_analytics::ParameterValue;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [output]
            path = "events.jsonl"

            [[events]]
            category = "first_start"
            action = "start"
            mode = "start"

            [[events]]
            category = "general"
            action = "screen_shown"
            screen = "Keyboard Install"
            [events.parameters]
            extra = "x"
            attempt = 2

            [[events]]
            category = "general"
            action = "install_confirmed"
            extension = "iMessage"
        "#;

        let config = parse_config(toml_content).unwrap();
        assert_eq!(config.output.path, Some(PathBuf::from("events.jsonl")));
        assert!(config.output.include_timestamp);
        assert_eq!(config.events.len(), 3);

        assert_eq!(config.events[0].mode, TrackMode::Start);
        assert_eq!(config.events[0].event_type().unwrap().key(), "FIRST_OPEN_INTRO_start");

        let shown = &config.events[1];
        assert_eq!(shown.mode, TrackMode::Track);
        assert_eq!(shown.screen, Some(Screen::KeyboardInstall));
        let params = shown.parameters.as_ref().unwrap();
        assert_eq!(params["extra"], ParameterValue::from("x"));
        assert_eq!(params["attempt"], ParameterValue::Integer(2));

        assert_eq!(config.events[2].extension, Some(Extension::IMessage));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.events.is_empty());
        assert!(config.output.path.is_none());
        assert!(config.output.include_timestamp);
    }

    #[test]
    fn test_missing_payload_is_rejected() {
        let toml_content = r#"
            [[events]]
            category = "general"
            action = "back_selected"
        "#;

        let err = parse_config(toml_content).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid event #1"));
        assert!(format!("{:#}", err).contains("requires a screen payload"));
    }

    #[test]
    fn test_unknown_screen_label_is_rejected() {
        let toml_content = r#"
            [[events]]
            category = "general"
            action = "screen_shown"
            screen = "Settings"
        "#;

        assert!(parse_config(toml_content).is_err());
    }
}
