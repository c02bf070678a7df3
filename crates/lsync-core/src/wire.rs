//! JSON wire boundary.
//!
//! A wire action is `{"type": "<TAG>", "payload": <value>}`. The payload shape
//! decides batch vs single: a JSON array is a batch, anything else is one
//! record (or one key for `REMOVE`). This is the only place where shape is
//! inspected at runtime; past [`decode`] everything is a typed [`Action`].
//!
//! Tags that are not an [`ActionKind`] decode to [`Decoded::Unknown`] so that
//! producers can add kinds without breaking older consumers.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{Action, ActionKind, FieldKey, ListReducer, Payload, UnknownActionPolicy};

/// Action as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WireAction {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub payload: Value,
}

impl WireAction {
    pub fn new(kind: ActionKind, payload: Value) -> Self {
        Self {
            tag: kind.as_str().to_string(),
            payload,
        }
    }
}

/// JSON records keyed by the canonical rendering of one field.
pub type JsonAction = Action<Value, String>;

#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    Known(JsonAction),
    Unknown(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WireError {
    /// `RESET` carried something other than an array.
    ResetRequiresArray,
    /// Unknown tag under [`UnknownActionPolicy::Fail`].
    UnknownAction { tag: String },
    /// Input could not be parsed as wire actions. `line` is 1-based.
    Malformed { line: usize, message: String },
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireError::ResetRequiresArray => {
                write!(f, "RESET payload must be an array of records")
            }
            WireError::UnknownAction { tag } => write!(f, "unknown action type '{tag}'"),
            WireError::Malformed { line, message } => {
                write!(f, "malformed wire action at line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for WireError {}

/// Turn a wire action into a typed action.
pub fn decode(wire: WireAction) -> Result<Decoded, WireError> {
    let Some(kind) = ActionKind::from_tag(&wire.tag) else {
        return Ok(Decoded::Unknown(wire.tag));
    };

    let action = match kind {
        ActionKind::Add => Action::Add(records(wire.payload)),
        ActionKind::Update => Action::Update(records(wire.payload)),
        ActionKind::AddOrUpdate => Action::AddOrUpdate(records(wire.payload)),
        ActionKind::Remove => Action::Remove(match wire.payload {
            Value::Array(keys) => {
                Payload::Many(keys.iter().map(FieldKey::canonical_key).collect())
            }
            key => Payload::One(FieldKey::canonical_key(&key)),
        }),
        ActionKind::Reset => match wire.payload {
            Value::Array(items) => Action::Reset(items),
            _ => return Err(WireError::ResetRequiresArray),
        },
    };
    Ok(Decoded::Known(action))
}

fn records(payload: Value) -> Payload<Value> {
    match payload {
        Value::Array(items) => Payload::Many(items),
        one => Payload::One(one),
    }
}

/// Parse wire actions from either a JSON array document or JSON Lines.
///
/// Blank lines are skipped in JSON Lines mode.
pub fn read_actions(input: &str) -> Result<Vec<WireAction>, WireError> {
    if input.trim_start().starts_with('[') {
        return serde_json::from_str(input).map_err(|e| WireError::Malformed {
            line: e.line(),
            message: e.to_string(),
        });
    }

    let mut out = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let action = serde_json::from_str(line).map_err(|e| WireError::Malformed {
            line: idx + 1,
            message: e.to_string(),
        })?;
        out.push(action);
    }
    Ok(out)
}

impl ListReducer<FieldKey> {
    /// Decode and apply one wire action.
    ///
    /// Unknown tags are an identity transition under
    /// [`UnknownActionPolicy::Ignore`] and an error under `Fail`.
    pub fn apply_wire(
        &self,
        state: &[Value],
        wire: WireAction,
        policy: UnknownActionPolicy,
    ) -> Result<Vec<Value>, WireError> {
        match decode(wire)? {
            Decoded::Known(action) => Ok(self.transition(state, action)),
            Decoded::Unknown(tag) => match policy {
                UnknownActionPolicy::Ignore => {
                    debug!(tag = %tag, "ignoring unknown action type");
                    Ok(state.to_vec())
                }
                UnknownActionPolicy::Fail => Err(WireError::UnknownAction { tag }),
            },
        }
    }
}
