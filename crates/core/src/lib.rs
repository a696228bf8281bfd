//! Domain logic for the encore concert-reservation backend.
//!
//! Nothing in this crate talks to a database. Storage is reached only
//! through the [`store::ConcertStore`] trait, implemented in `encore_db`.

pub mod concert;
pub mod error;
pub mod reservation;
pub mod service;
pub mod store;
pub mod types;
pub mod views;
