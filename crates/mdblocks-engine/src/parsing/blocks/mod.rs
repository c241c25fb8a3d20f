//! # Block Scanning
//!
//! Line-local segmentation of Markdown into top-level blocks.
//!
//! ## Modules
//!
//! - **`types`**: `BlockKind` and the scanner's output `ScannedBlock`
//! - **`kinds`**: one type per block kind owning its delimiters, its start
//!   predicate and its end rule
//! - **`detect`**: the fixed detector order and dispatch
//! - **`builder`**: the scan loop with paragraph accumulation
//!
//! ## Key Invariants
//!
//! - Blocks never overlap and are emitted in line order
//! - Every non-blank line belongs to exactly one block
//! - Unclosed fences, math and front matter run to the end of input

pub mod builder;
pub mod detect;
pub mod kinds;
pub mod types;

pub use builder::scan_lines;
pub use detect::{BlockOpen, DETECTION_ORDER, detect, starts_block};
pub use types::{BlockKind, ScannedBlock};
