// Summarization service module.
// Provides the client and response types for the external summarizer.

pub mod client;
#[cfg(test)]
pub mod fake;
pub mod types;

pub use client::{Summarize, SummaryClient};
