pub mod cart;
pub mod config;
pub mod questions;
pub mod recommend;
pub mod table;

use glowcart_core::config::{AppConfig, LoadOptions};
use glowcart_core::errors::{ApplicationError, DomainError};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with_data(command, message, None)
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: impl Into<Option<Value>>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: data.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn domain_failure(command: &str, error: DomainError) -> Self {
        Self::application_failure(command, "domain", ApplicationError::from(error), 1)
    }

    /// Maps a failure through the interface error layer so the message is
    /// user-safe and carries a correlation id.
    pub fn application_failure(
        command: &str,
        error_class: &str,
        error: ApplicationError,
        exit_code: u8,
    ) -> Self {
        let interface = error.into_interface(Uuid::new_v4().to_string());
        let message = format!(
            "{} ({interface}; correlation_id={})",
            interface.user_message(),
            interface.correlation_id()
        );
        Self::failure(command, error_class, message, exit_code)
    }
}

pub(crate) fn load_config(command: &str) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions::default()).map_err(|error| {
        let error = ApplicationError::Configuration(error.to_string());
        CommandResult::application_failure(command, "config_validation", error, 2)
    })
}

pub(crate) fn to_data<T: Serialize>(command: &str, value: &T) -> Result<Value, CommandResult> {
    serde_json::to_value(value).map_err(|error| {
        CommandResult::failure(command, "serialization", error.to_string(), 3)
    })
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            concat!(
                "{{\"command\":\"unknown\",\"status\":\"error\",",
                "\"error_class\":\"serialization\",\"message\":\"{}\"}}"
            ),
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
