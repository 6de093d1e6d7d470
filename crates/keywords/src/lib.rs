//! Localized keyword matching for notification heuristics.
//!
//! Languages: DE, EN, ES, FR, JA, KO, RU, ZH
//!
//! Call buttons are classified as answer / decline / speaker, and progress
//! notifications are checked for "finished" wording.

pub mod defaults;
pub mod set;

pub use set::{KeywordKind, KeywordSet, builtin};
