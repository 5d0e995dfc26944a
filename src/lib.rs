//! # seawiki
//!
//! Cleaning of the Southeast Asia Wikipedia corpus.
//!
//! Flattened article splits are deduplicated ([processing::dedup]) using
//! configurable text normalization ([transformers]), and published files are
//! located per language or country ([loader]).
pub mod error;
pub mod io;
pub mod lang;
pub mod loader;
pub mod processing;
pub mod record;
pub mod transformers;
