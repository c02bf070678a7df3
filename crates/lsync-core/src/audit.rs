use std::collections::HashSet;
use std::fmt::Debug;

use tracing::warn;

use crate::key::KeySelector;
use crate::{DuplicateKeyPolicy, ListReducer};

/// Returned by [`ListReducer::check_unique`] under [`DuplicateKeyPolicy::Fail`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateKeys<K> {
    /// Each offending key once, in order of its second occurrence.
    pub keys: Vec<K>,
}

impl<K: Debug> std::fmt::Display for DuplicateKeys<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LIST_DUPLICATE_KEYS: {} key(s) occur more than once: {:?}",
            self.keys.len(),
            self.keys
        )
    }
}

impl<K: Debug> std::error::Error for DuplicateKeys<K> {}

impl<S> ListReducer<S> {
    /// Keys that occur more than once in `state`.
    ///
    /// Only Add can produce these. Keyless records are ignored.
    pub fn duplicate_keys<T>(&self, state: &[T]) -> Vec<S::Key>
    where
        S: KeySelector<T>,
    {
        let mut seen: HashSet<S::Key> = HashSet::with_capacity(state.len());
        let mut reported: HashSet<S::Key> = HashSet::new();
        let mut dups = Vec::new();
        for record in state {
            let Some(key) = self.selector().key_of(record) else {
                continue;
            };
            if seen.contains(&key) {
                if reported.insert(key.clone()) {
                    dups.push(key);
                }
            } else {
                seen.insert(key);
            }
        }
        dups
    }

    /// Enforce the key uniqueness invariant on `state` according to `policy`.
    pub fn check_unique<T>(
        &self,
        state: &[T],
        policy: DuplicateKeyPolicy,
    ) -> Result<(), DuplicateKeys<S::Key>>
    where
        S: KeySelector<T>,
    {
        if policy == DuplicateKeyPolicy::Allow {
            return Ok(());
        }

        let keys = self.duplicate_keys(state);
        if keys.is_empty() {
            return Ok(());
        }

        match policy {
            DuplicateKeyPolicy::Fail => Err(DuplicateKeys { keys }),
            _ => {
                for key in &keys {
                    warn!(key = ?key, "duplicate key in list state");
                }
                Ok(())
            }
        }
    }
}
