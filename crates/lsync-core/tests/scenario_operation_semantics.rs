//! Scenario: per-operation reconciliation semantics
//!
//! # Invariants under test
//!
//! 1. Add appends in payload order with no de-duplication.
//! 2. Update replaces in place, never inserts, preserves length and order.
//! 3. AddOrUpdate replaces known keys in place and appends new keys in
//!    payload order; duplicate payload keys collapse to the last entry.
//! 4. Remove drops listed keys and ignores unknown ones.
//! 5. Reset takes the payload verbatim.
//!
//! All tests are pure; no IO.

use lsync_core::{Action, KeyFn, ListReducer};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Row {
    id: u32,
    v: &'static str,
}

fn row(id: u32, v: &'static str) -> Row {
    Row { id, v }
}

type RowReducer = ListReducer<KeyFn<fn(&Row) -> u32>>;

fn reducer() -> RowReducer {
    fn id(r: &Row) -> u32 {
        r.id
    }
    ListReducer::by_key(id as fn(&Row) -> u32)
}

fn ids(rows: &[Row]) -> Vec<u32> {
    rows.iter().map(|r| r.id).collect()
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[test]
fn add_batch_appends_in_payload_order() {
    let s = vec![row(1, "a"), row(2, "b")];
    let out = reducer().transition(&s, Action::add_many(vec![row(4, "d"), row(3, "c")]));
    assert_eq!(ids(&out), vec![1, 2, 4, 3]);
}

#[test]
fn add_does_not_deduplicate() {
    let s = vec![row(1, "a")];
    let out = reducer().transition(&s, Action::add_one(row(1, "again")));
    assert_eq!(out, vec![row(1, "a"), row(1, "again")]);
}

#[test]
fn add_empty_batch_is_identity() {
    let s = vec![row(1, "a")];
    let out = reducer().transition(&s, Action::add_many(vec![]));
    assert_eq!(out, s);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_replaces_in_place_and_drops_unmatched() {
    let s = vec![row(1, "a"), row(2, "b"), row(3, "c")];
    let out = reducer().transition(
        &s,
        Action::update_many(vec![row(3, "C"), row(9, "nope"), row(1, "A")]),
    );
    assert_eq!(out, vec![row(1, "A"), row(2, "b"), row(3, "C")]);
}

#[test]
fn update_single_unmatched_is_identity() {
    let s = vec![row(1, "a")];
    let out = reducer().transition(&s, Action::update_one(row(2, "b")));
    assert_eq!(out, s);
}

#[test]
fn update_batch_later_entry_wins_on_same_key() {
    let s = vec![row(1, "a"), row(2, "b")];
    let out = reducer().transition(
        &s,
        Action::update_many(vec![row(2, "first"), row(2, "second")]),
    );
    assert_eq!(out, vec![row(1, "a"), row(2, "second")]);
}

#[test]
fn update_targets_first_of_duplicated_keys() {
    // Duplicates can only come from Add.
    let s = vec![row(1, "a"), row(1, "dup")];
    let out = reducer().transition(&s, Action::update_one(row(1, "X")));
    assert_eq!(out, vec![row(1, "X"), row(1, "dup")]);

    let out = reducer().transition(&s, Action::update_many(vec![row(1, "Y")]));
    assert_eq!(out, vec![row(1, "Y"), row(1, "dup")]);
}

// ---------------------------------------------------------------------------
// AddOrUpdate
// ---------------------------------------------------------------------------

#[test]
fn upsert_batch_replaces_known_and_appends_new() {
    let s = vec![row(1, "a"), row(2, "b")];
    let out = reducer().transition(&s, Action::upsert_many(vec![row(2, "B"), row(3, "c")]));
    assert_eq!(out, vec![row(1, "a"), row(2, "B"), row(3, "c")]);
}

#[test]
fn upsert_batch_new_keys_keep_payload_order() {
    let s = vec![row(5, "e")];
    let out = reducer().transition(
        &s,
        Action::upsert_many(vec![row(9, "i"), row(5, "E"), row(7, "g"), row(8, "h")]),
    );
    assert_eq!(ids(&out), vec![5, 9, 7, 8]);
    assert_eq!(out[0], row(5, "E"));
}

#[test]
fn upsert_batch_duplicate_payload_keys_collapse_to_last() {
    let out = reducer().transition(&[], Action::upsert_many(vec![row(1, "a"), row(1, "b")]));
    assert_eq!(out, vec![row(1, "b")]);
}

#[test]
fn upsert_batch_duplicate_new_key_keeps_first_position() {
    let out = reducer().transition(
        &[],
        Action::upsert_many(vec![row(1, "a"), row(2, "b"), row(1, "c")]),
    );
    assert_eq!(out, vec![row(1, "c"), row(2, "b")]);
}

#[test]
fn upsert_batch_consumes_key_once_against_duplicated_state() {
    let s = vec![row(1, "a"), row(1, "dup")];
    let out = reducer().transition(&s, Action::upsert_many(vec![row(1, "X")]));
    assert_eq!(out, vec![row(1, "X"), row(1, "dup")]);
}

#[test]
fn upsert_single_replaces_or_appends() {
    let s = vec![row(1, "a"), row(2, "b")];
    let r = reducer();

    let replaced = r.transition(&s, Action::upsert_one(row(1, "A")));
    assert_eq!(replaced, vec![row(1, "A"), row(2, "b")]);

    let appended = r.transition(&s, Action::upsert_one(row(3, "c")));
    assert_eq!(appended, vec![row(1, "a"), row(2, "b"), row(3, "c")]);
}

// ---------------------------------------------------------------------------
// Remove
// ---------------------------------------------------------------------------

#[test]
fn remove_batch_keeps_relative_order() {
    let s = vec![row(1, "a"), row(2, "b"), row(3, "c")];
    let out = reducer().transition(&s, Action::remove_many(vec![2]));
    assert_eq!(ids(&out), vec![1, 3]);
}

#[test]
fn remove_unknown_key_is_noop() {
    let s = vec![row(1, "a"), row(2, "b")];
    let r = reducer();
    assert_eq!(r.transition(&s, Action::remove_one(42)), s);
    assert_eq!(r.transition(&s, Action::remove_many(vec![42, 43])), s);
}

#[test]
fn remove_single_drops_every_record_with_that_key() {
    let s = vec![row(1, "a"), row(2, "b"), row(1, "dup")];
    let out = reducer().transition(&s, Action::remove_one(1));
    assert_eq!(out, vec![row(2, "b")]);
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

#[test]
fn reset_takes_payload_verbatim() {
    let s = vec![row(1, "a"), row(2, "b")];
    let payload = vec![row(3, "c"), row(3, "dup-allowed"), row(0, "z")];
    let out = reducer().transition(&s, Action::reset(payload.clone()));
    assert_eq!(out, payload);
}
