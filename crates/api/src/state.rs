use encore_core::service::ReservationService;
use encore_core::store::ConcertStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the store is behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Reservation engine over whichever store the server was started with.
    pub concerts: ReservationService<dyn ConcertStore>,
}
