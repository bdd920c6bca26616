//! Fx-hashed collections for integer keys (entity ids, node indices).

pub use rustc_hash::{FxHashMap, FxHashSet};
