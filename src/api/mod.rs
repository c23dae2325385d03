//! Backend API Wrappers
//!
//! Frontend bindings to the dashboard's HTTP endpoints, organized by domain.

mod projects;
mod timeline;

use gloo_net::http::Request;

use crate::error::DashboardError;

/// GET `url` and return the body of a 2xx response
async fn get_text(url: &str) -> Result<String, DashboardError> {
    log::debug!("GET {}", url);
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(DashboardError::Status { status: response.status() });
    }
    Ok(response.text().await?)
}

/// Treat a non-empty `error` field as an application failure
fn check_error(error: Option<String>) -> Result<(), DashboardError> {
    match error.filter(|e| !e.is_empty()) {
        Some(message) => Err(DashboardError::Application(message)),
        None => Ok(()),
    }
}

// Re-export all public items
pub use projects::*;
pub use timeline::*;
