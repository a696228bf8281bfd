//! Row structs for the concert tables.
//!
//! Each struct derives `FromRow` and converts into the matching domain type
//! from `encore_core`.

pub mod concert;
