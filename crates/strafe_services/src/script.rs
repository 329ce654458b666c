//! Script file loading.
//!
//! A script is a JSON array of timed records (see
//! [`strafe_core::msg::ScriptEvent`]); loading turns them into messages
//! ready for [`MessageQueue::load`](strafe_core::msg::MessageQueue::load).
//! Records may carry ticks in the past — the queue treats those as due,
//! which is how sources replay historic events offset by a base time.

use std::path::Path;

use thiserror::Error;

use strafe_core::msg::{Message, ScriptEvent};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("script is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a JSON script into messages.
pub fn load_str(text: &str) -> Result<Vec<Message>, ScriptError> {
    let events: Vec<ScriptEvent> = serde_json::from_str(text)?;
    Ok(events
        .into_iter()
        .map(<Message as From<ScriptEvent>>::from)
        .collect())
}

/// Read and parse a script file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Message>, ScriptError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let messages = load_str(&text)?;
    tracing::info!(
        path = %path.as_ref().display(),
        count = messages.len(),
        "script loaded"
    );
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_records_become_messages() {
        let text = r#"[
            {"timer": 60, "system": "spawner", "cmd": "new", "args": "asteroid;10;20"},
            {"system": "system", "cmd": "exit", "args": ""}
        ]"#;

        let messages = load_str(text).unwrap();
        assert_eq!(messages.len(), 2);

        assert_eq!(messages[0].timer(), Some(60));
        assert_eq!(messages[0].system(), "spawner");
        assert_eq!(messages[0].args(), ["asteroid", "10", "20"]);

        // Immediate record with the empty-args quirk: one empty element.
        assert_eq!(messages[1].timer(), None);
        assert_eq!(messages[1].args(), [""]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(load_str("not json").is_err());
    }
}
