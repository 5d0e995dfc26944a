/*! Corpus processing

Operations on flattened Wikipedia splits:

- [concat]: merge extraction batches of a language,
- [dedup]: remove hard and soft duplicates,
- [stats]: token statistics per split.
!*/
pub mod concat;
pub mod dedup;
pub mod stats;
