use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::key::{KeyFn, KeySelector};
use crate::{Action, Payload};

/// Reconciles a keyed, ordered list against incoming actions.
///
/// The reducer owns nothing but its key selector. Every call to
/// [`ListReducer::transition`] borrows the caller's state and returns a fresh
/// `Vec`; the borrowed slice is never modified. Unchanged records are cloned
/// into the result, so records that are expensive to clone should be wrapped in
/// `Rc`/`Arc` by the caller.
#[derive(Clone, Debug)]
pub struct ListReducer<S> {
    selector: S,
}

impl<S> ListReducer<S> {
    pub fn new(selector: S) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }
}

impl<F> ListReducer<KeyFn<F>> {
    /// Build a reducer keyed by an accessor closure, e.g. `|r: &Row| r.id`.
    pub fn by_key(accessor: F) -> Self {
        Self::new(KeyFn(accessor))
    }
}

impl<S> ListReducer<S> {
    /// Apply one action to `state` and return the next state.
    ///
    /// Total over every [`Action`]; never fails.
    pub fn transition<T>(&self, state: &[T], action: Action<T, S::Key>) -> Vec<T>
    where
        S: KeySelector<T>,
        T: Clone,
    {
        let kind = action.kind();
        let payload_len = action.payload_len();

        let next = match action {
            Action::Add(payload) => self.add(state, payload),
            Action::Update(payload) => self.update(state, payload),
            Action::AddOrUpdate(payload) => self.add_or_update(state, payload),
            Action::Remove(keys) => self.remove(state, keys),
            Action::Reset(records) => records,
        };

        trace!(
            kind = kind.as_str(),
            payload_len,
            before = state.len(),
            after = next.len(),
            "list transition"
        );
        next
    }

    /// Fold `actions` left to right starting from `initial`.
    pub fn replay<T, I>(&self, initial: &[T], actions: I) -> Vec<T>
    where
        S: KeySelector<T>,
        T: Clone,
        I: IntoIterator<Item = Action<T, S::Key>>,
    {
        let mut state = initial.to_vec();
        for action in actions {
            state = self.transition(&state, action);
        }
        state
    }

    fn add<T>(&self, state: &[T], payload: Payload<T>) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(state.len() + payload.len());
        out.extend_from_slice(state);
        match payload {
            Payload::One(record) => out.push(record),
            Payload::Many(records) => out.extend(records),
        }
        out
    }

    fn update<T>(&self, state: &[T], payload: Payload<T>) -> Vec<T>
    where
        S: KeySelector<T>,
        T: Clone,
    {
        let mut out = state.to_vec();
        match payload {
            Payload::One(record) => {
                if let Some(pos) = self.position(state, &record) {
                    out[pos] = record;
                }
            }
            Payload::Many(records) => {
                // Positions come from the input state, so an earlier replacement
                // can never redirect a later entry. Later entries win.
                let index = self.first_positions(state);
                for record in records {
                    let pos = self
                        .selector
                        .key_of(&record)
                        .and_then(|key| index.get(&key).copied());
                    if let Some(pos) = pos {
                        out[pos] = record;
                    }
                }
            }
        }
        out
    }

    fn add_or_update<T>(&self, state: &[T], payload: Payload<T>) -> Vec<T>
    where
        S: KeySelector<T>,
        T: Clone,
    {
        let records = match payload {
            Payload::One(record) => {
                let mut out = state.to_vec();
                match self.position(state, &record) {
                    Some(pos) => out[pos] = record,
                    None => out.push(record),
                }
                return out;
            }
            Payload::Many(records) => records,
        };

        // One slot per distinct key, ordered by first appearance in the payload.
        // A repeated key overwrites its slot. Keyless records get their own slot.
        let mut slots: Vec<Option<T>> = Vec::with_capacity(records.len());
        let mut slot_of: HashMap<S::Key, usize> = HashMap::with_capacity(records.len());
        for record in records {
            match self.selector.key_of(&record) {
                Some(key) => match slot_of.get(&key).copied() {
                    Some(slot) => slots[slot] = Some(record),
                    None => {
                        slot_of.insert(key, slots.len());
                        slots.push(Some(record));
                    }
                },
                None => slots.push(Some(record)),
            }
        }

        let mut out = Vec::with_capacity(state.len() + slots.len());
        for existing in state {
            // Removing the key consumes it: a later state record with the same
            // key is left alone.
            let replacement = self
                .selector
                .key_of(existing)
                .and_then(|key| slot_of.remove(&key))
                .and_then(|slot| slots[slot].take());
            match replacement {
                Some(record) => out.push(record),
                None => out.push(existing.clone()),
            }
        }
        out.extend(slots.into_iter().flatten());
        out
    }

    fn remove<T>(&self, state: &[T], keys: Payload<S::Key>) -> Vec<T>
    where
        S: KeySelector<T>,
        T: Clone,
    {
        match keys {
            Payload::One(key) => state
                .iter()
                .filter(|&r| self.selector.key_of(r).as_ref() != Some(&key))
                .cloned()
                .collect(),
            Payload::Many(keys) => {
                let doomed: HashSet<S::Key> = keys.into_iter().collect();
                state
                    .iter()
                    .filter(|&r| match self.selector.key_of(r) {
                        Some(key) => !doomed.contains(&key),
                        None => true,
                    })
                    .cloned()
                    .collect()
            }
        }
    }

    /// Index of the first state record sharing `record`'s key.
    fn position<T>(&self, state: &[T], record: &T) -> Option<usize>
    where
        S: KeySelector<T>,
    {
        let key = self.selector.key_of(record)?;
        state
            .iter()
            .position(|r| self.selector.key_of(r).as_ref() == Some(&key))
    }

    /// Key -> index of its first occurrence in `state`.
    fn first_positions<T>(&self, state: &[T]) -> HashMap<S::Key, usize>
    where
        S: KeySelector<T>,
    {
        let mut index = HashMap::with_capacity(state.len());
        for (pos, record) in state.iter().enumerate() {
            if let Some(key) = self.selector.key_of(record) {
                index.entry(key).or_insert(pos);
            }
        }
        index
    }
}
