//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod concert_repo;

pub use concert_repo::ConcertRepo;
