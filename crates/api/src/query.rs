//! Query parameter types for API handlers.

use serde::Deserialize;

/// `GET /concerts?user_name=` -- the user whose reservation flag is reported.
#[derive(Debug, Deserialize)]
pub struct ListConcertsParams {
    pub user_name: Option<String>,
}
