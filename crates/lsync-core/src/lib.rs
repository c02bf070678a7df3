//! lsync-core
//!
//! Keyed list reconciliation engine.
//!
//! Architectural decisions:
//! - One reducer per key selector; the selector is fixed at construction
//! - Five operations: Add, Update, AddOrUpdate, Remove, Reset
//! - Batch vs single payloads are explicit variants, never shape-sniffed
//! - Caller state is borrowed; every transition builds a fresh `Vec`
//! - Add may introduce duplicate keys; everything else preserves uniqueness
//!
//! Deterministic, pure logic. No IO. JSON shape inspection only happens at the
//! wire boundary (`wire`).

mod audit;
mod engine;
mod key;
mod types;

pub mod wire;

pub use audit::DuplicateKeys;
pub use engine::ListReducer;
pub use key::{FieldKey, KeyFn, KeySelector};
pub use types::*;
