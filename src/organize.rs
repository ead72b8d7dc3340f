//! Organizer engine: plan where each track goes, then copy or move it there.
//!
//! `plan` is pure; `execute` touches the filesystem, reports one event per
//! entry and never stops at the first failure.

mod execute;
mod plan;
mod types;

pub use execute::spawn_execute;
pub use plan::plan;
pub use types::*;
