//! Domain types.

mod entry;
mod outcome;

pub use entry::SecretEntry;
pub use outcome::{WriteOutcome, WritePlan};
