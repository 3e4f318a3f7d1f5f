//! Plugin host integration
//!
//! Types for the event the host pushes when the user enters the plugin.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload the host delivers on plugin entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnterEvent {
    /// Feature code the plugin was entered through
    #[serde(default)]
    pub code: String,
    /// Kind of payload (`"text"`, `"img"`, ...)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Entry payload, shape depending on `kind`
    #[serde(default)]
    pub payload: Value,
    /// Extra option data for list-style entries
    #[serde(default)]
    pub option: Value,
}

/// Retains the most recent enter event for the UI to query.
#[derive(Debug, Default)]
pub struct HostSession {
    enter: Option<EnterEvent>,
}

impl HostSession {
    /// Create a session with no enter event yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the enter event the host just delivered
    pub fn on_plugin_enter(&mut self, event: EnterEvent) {
        log::debug!("Plugin entered with code {}", event.code);
        self.enter = Some(event);
    }

    /// The most recent enter event, if the plugin has been entered
    pub fn enter_data(&self) -> Option<&EnterEvent> {
        self.enter.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_retains_latest_event() {
        let mut session = HostSession::new();
        assert!(session.enter_data().is_none());

        session.on_plugin_enter(EnterEvent {
            code: "open".into(),
            kind: "text".into(),
            payload: json!("hello"),
            option: Value::Null,
        });
        session.on_plugin_enter(EnterEvent {
            code: "open".into(),
            kind: "img".into(),
            payload: json!("data:image/png;base64,AAAA"),
            option: Value::Null,
        });

        assert_eq!(session.enter_data().unwrap().kind, "img");
    }

    #[test]
    fn test_enter_event_decodes_host_json() {
        let event: EnterEvent = serde_json::from_value(json!({
            "code": "open",
            "type": "over",
            "payload": "selected text"
        }))
        .unwrap();
        assert_eq!(event.kind, "over");
        assert_eq!(event.option, Value::Null);
    }
}
