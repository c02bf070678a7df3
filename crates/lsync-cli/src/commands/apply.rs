use anyhow::{bail, Context, Result};
use lsync_config::{load_layered_yaml, report_unused_keys, ReducerConfig, UnusedKeyPolicy};
use lsync_core::wire::read_actions;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use tracing::{debug, info, warn};

use super::read_text;

pub struct ApplyArgs {
    pub config_paths: Vec<String>,
    pub state: Option<String>,
    pub actions: String,
    pub out: Option<String>,
    pub strict_config: bool,
}

pub fn run(args: ApplyArgs) -> Result<()> {
    let loaded = load_layered_yaml(&args.config_paths)?;

    let policy = if args.strict_config {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(&loaded.config_json, policy)?;
    for pointer in &report.unused_leaf_pointers {
        warn!(pointer = %pointer, "unused config key");
    }

    let rc = ReducerConfig::from_config_json(&loaded.config_json)?;
    info!(
        config_hash = %loaded.config_hash,
        key_field = %rc.key_field,
        duplicate_keys = rc.duplicate_keys.as_str(),
        unknown_actions = rc.unknown_actions.as_str(),
        "config loaded"
    );
    let reducer = rc.reducer();

    let mut state = match &args.state {
        Some(path) => read_state(path)?,
        None => Vec::new(),
    };
    let initial_len = state.len();

    let actions = read_actions(&read_text(&args.actions)?)
        .with_context(|| format!("failed to parse actions: {}", args.actions))?;

    let mut applied: BTreeMap<String, usize> = BTreeMap::new();
    for (idx, wire) in actions.into_iter().enumerate() {
        let tag = wire.tag.clone();
        let before = state.len();
        state = reducer
            .apply_wire(&state, wire, rc.unknown_actions)
            .with_context(|| format!("action #{} ({}) rejected", idx + 1, tag))?;
        debug!(index = idx + 1, tag = %tag, before, after = state.len(), "applied action");
        *applied.entry(tag).or_default() += 1;
    }

    reducer.check_unique(&state, rc.duplicate_keys)?;

    let rendered = serde_json::to_string_pretty(&state).context("serialize state failed")?;
    match &args.out {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("write failed: {}", path))?;
        }
        None => println!("{rendered}"),
    }

    info!(
        initial = initial_len,
        records = state.len(),
        actions = applied.values().sum::<usize>(),
        by_type = ?applied,
        "apply complete"
    );
    Ok(())
}

fn read_state(path: &str) -> Result<Vec<Value>> {
    let raw = read_text(path)?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let parsed: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} must contain valid JSON", path))?;
    match parsed {
        Value::Array(items) => Ok(items),
        other => bail!(
            "{} must contain a JSON array of records (got {})",
            path,
            json_type(&other)
        ),
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
