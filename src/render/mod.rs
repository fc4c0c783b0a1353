//! View models for the four dashboard cards.
//!
//! Each builder is a pure function of its inputs; the `ui` module only
//! draws what these produce.

pub mod histogram;
pub mod scatter;
pub mod summary;
pub mod table;
