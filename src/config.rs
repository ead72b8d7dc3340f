//! Configuration loader and schema types.
//!
//! Settings come from struct defaults, an optional TOML file and
//! `DUBDIB__*` environment variables, in increasing order of precedence.

mod load;
mod schema;

pub use load::resolve_config_path;
pub use schema::*;
