//! Music library: metadata reader, scanner and the in-memory index.
//!
//! `reader` turns one file into a `Track`, `scan` walks a directory into a
//! `LibraryIndex`, and `display` renders index rows for listings.

mod display;
mod index;
mod model;
mod reader;
mod scan;

pub use display::table_rows;
pub use index::LibraryIndex;
pub use model::{Track, TrackEdit};
pub use reader::{read_track, write_track};
pub use scan::ScanReport;

#[cfg(test)]
mod tests;
