use anyhow::{bail, Context, Result};
use lsync_core::{DuplicateKeyPolicy, FieldKey, ListReducer, UnknownActionPolicy};
use serde_json::Value;

/// Reducer settings read from the merged config tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReducerConfig {
    pub key_field: String,
    pub duplicate_keys: DuplicateKeyPolicy,
    pub unknown_actions: UnknownActionPolicy,
}

impl ReducerConfig {
    /// Build from canonical config JSON (produced by `load_layered_yaml*`).
    ///
    /// Required:
    /// - reducer.key_field (non-empty string)
    ///
    /// Optional:
    /// - reducer.duplicate_keys: allow | warn | fail (default warn)
    /// - reducer.unknown_actions: ignore | fail (default ignore)
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let key_field = cfg
            .pointer("/reducer/key_field")
            .and_then(Value::as_str)
            .context("config missing reducer.key_field")?
            .trim();
        if key_field.is_empty() {
            bail!("reducer.key_field must not be empty");
        }

        let duplicate_keys = match optional_str(cfg, "/reducer/duplicate_keys")? {
            None => DuplicateKeyPolicy::default(),
            Some(s) => match s.to_ascii_lowercase().as_str() {
                "allow" => DuplicateKeyPolicy::Allow,
                "warn" => DuplicateKeyPolicy::Warn,
                "fail" => DuplicateKeyPolicy::Fail,
                other => bail!(
                    "invalid reducer.duplicate_keys '{}'. expected one of: allow | warn | fail",
                    other
                ),
            },
        };

        let unknown_actions = match optional_str(cfg, "/reducer/unknown_actions")? {
            None => UnknownActionPolicy::default(),
            Some(s) => match s.to_ascii_lowercase().as_str() {
                "ignore" => UnknownActionPolicy::Ignore,
                "fail" => UnknownActionPolicy::Fail,
                other => bail!(
                    "invalid reducer.unknown_actions '{}'. expected one of: ignore | fail",
                    other
                ),
            },
        };

        Ok(Self {
            key_field: key_field.to_string(),
            duplicate_keys,
            unknown_actions,
        })
    }

    pub fn reducer(&self) -> ListReducer<FieldKey> {
        ListReducer::new(FieldKey::new(self.key_field.clone()))
    }
}

fn optional_str<'a>(cfg: &'a Value, pointer: &str) -> Result<Option<&'a str>> {
    match cfg.pointer(pointer) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim())),
        Some(other) => bail!("{} must be a string (got {})", pointer, other),
    }
}
