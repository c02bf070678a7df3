use std::fmt::Debug;
use std::hash::Hash;

use serde_json::Value;

/// Extracts the identifying key of a record.
///
/// A selector is fixed for the lifetime of a [`crate::ListReducer`].
/// `None` means the record carries no usable key: such a record never
/// matches anything (kept by Remove, dropped by Update, appended by AddOrUpdate).
pub trait KeySelector<T> {
    type Key: Clone + Eq + Hash + Debug;

    fn key_of(&self, record: &T) -> Option<Self::Key>;
}

/// Adapter turning a plain accessor closure into a [`KeySelector`].
///
/// Every record has a key under a closure selector.
#[derive(Clone, Copy, Debug)]
pub struct KeyFn<F>(pub F);

impl<T, K, F> KeySelector<T> for KeyFn<F>
where
    F: Fn(&T) -> K,
    K: Clone + Eq + Hash + Debug,
{
    type Key = K;

    fn key_of(&self, record: &T) -> Option<K> {
        Some((self.0)(record))
    }
}

/// Selects a top-level field of a JSON object record.
///
/// The key is the compact JSON rendering of the field value, so `1` and `"1"`
/// are different keys and `null` is a valid key. Numbers compare by value:
/// `1`, `1.0` and `-0.0`/`0` render the same. Non-object records and objects
/// without the field have no key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldKey {
    field: String,
}

impl FieldKey {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Canonical key for a raw JSON value, used for both record fields and
    /// the key payloads of Remove.
    pub fn canonical_key(value: &Value) -> String {
        match value {
            Value::Number(n) => canonical_number(n),
            other => other.to_string(),
        }
    }
}

/// Integral floats in i64/u64 range render as integers; `-0.0` renders as `0`.
fn canonical_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 => (f as u64).to_string(),
        _ => n.to_string(),
    }
}

impl KeySelector<Value> for FieldKey {
    type Key = String;

    fn key_of(&self, record: &Value) -> Option<String> {
        record
            .as_object()?
            .get(&self.field)
            .map(Self::canonical_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_key_distinguishes_json_types() {
        let sel = FieldKey::new("id");
        assert_eq!(sel.key_of(&json!({"id": 1})), Some("1".to_string()));
        assert_eq!(sel.key_of(&json!({"id": "1"})), Some("\"1\"".to_string()));
        assert_ne!(
            sel.key_of(&json!({"id": 1})),
            sel.key_of(&json!({"id": "1"}))
        );
    }

    #[test]
    fn field_key_missing_or_non_object_has_no_key() {
        let sel = FieldKey::new("id");
        assert_eq!(sel.key_of(&json!({"name": "x"})), None);
        assert_eq!(sel.key_of(&json!([1, 2])), None);
        assert_eq!(sel.key_of(&json!(7)), None);
    }

    #[test]
    fn field_key_null_is_a_key() {
        let sel = FieldKey::new("id");
        assert_eq!(sel.key_of(&json!({"id": null})), Some("null".to_string()));
    }

    #[test]
    fn integral_floats_share_the_integer_key() {
        let sel = FieldKey::new("id");
        assert_eq!(sel.key_of(&json!({"id": 1.0})), Some("1".to_string()));
        assert_eq!(sel.key_of(&json!({"id": -0.0})), Some("0".to_string()));
        assert_eq!(sel.key_of(&json!({"id": -3.0})), Some("-3".to_string()));
        assert_eq!(sel.key_of(&json!({"id": 1.5})), Some("1.5".to_string()));
        assert_eq!(
            sel.key_of(&json!({"id": 1.0e19})),
            Some("10000000000000000000".to_string())
        );
    }

    #[test]
    fn key_fn_always_yields_a_key() {
        let sel = KeyFn(|r: &(u32, char)| r.0);
        assert_eq!(sel.key_of(&(4, 'x')), Some(4));
    }
}
