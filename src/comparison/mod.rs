//! Positional comparison of two genomes.
//!
//! Genomes are compared symbol by symbol at matching positions; there is no
//! alignment. The number of differences is the Hamming distance.

pub mod difference;

pub use difference::{compare, Difference};
