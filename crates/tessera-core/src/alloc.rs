//! Hash collections used across Tessera.
//!
//! Re-exports AHash-backed maps so glyph tables and texture caches share one
//! hasher choice.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
