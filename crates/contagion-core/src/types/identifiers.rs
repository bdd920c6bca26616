//! Identifier and time types for communication events.

/// Identifier of a communicating entity. Any integer value is valid.
pub type EntityId = i64;

/// Event timestamp. Only the total order matters; units are up to the caller.
pub type Timestamp = i64;
