// Local filesystem persistence.
// Paths for the history and log files, plus JSON read/write helpers.

pub mod paths;
pub mod store;

pub use store::{read_json, write_json};
