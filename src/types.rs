//! Larder - Core Type Definitions
//! Defines fundamental types used across the store.

/// Key type for the store.
/// Keys are arbitrary UTF-8 strings.
pub type Key = String;

/// The store's internal representation of a value:
/// the value's own JSON encoding, kept as text.
/// Payloads are produced by `set` and interpreted again by `get`;
/// between those two points the store treats them as opaque.
pub type Payload = String;
