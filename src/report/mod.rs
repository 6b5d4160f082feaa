//! Data script generation.

pub mod generator;

pub use generator::*;
