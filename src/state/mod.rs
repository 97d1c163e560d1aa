// Lookup state management.
// Drives a single article lookup from submission to result.

pub mod lookup;

pub use lookup::{LookupState, Resolution};
