pub mod editing;
pub mod identity;
pub mod io;
pub mod parsing;

// Re-export key types for easier usage
pub use editing::*;
pub use identity::{Fingerprint, FingerprintParseError, hash, render_cache_key};
pub use io::*;
pub use parsing::{BlockKind, ScannedBlock, scan};
