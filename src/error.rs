//! Dashboard Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered with an `error` field
    #[error("{0}")]
    Application(String),

    /// No `vis` global on the page
    #[error("the timeline library could not be loaded; please reload the page")]
    LibraryMissing,

    /// `vis.Timeline` threw while building the chart
    #[error("timeline chart failed: {0}")]
    Chart(String),
}

impl From<gloo_net::Error> for DashboardError {
    fn from(err: gloo_net::Error) -> Self {
        DashboardError::Network(err.to_string())
    }
}
