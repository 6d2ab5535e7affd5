//! Independent single-pass field extractors. Each is a pure function of the
//! full report text; none depends on another's output.

pub mod dealer;
pub mod numeric;
pub mod ownership;
pub mod title;
pub mod vehicle;
pub mod warranty;
