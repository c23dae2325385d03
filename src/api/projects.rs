//! Project Endpoints

use serde::Deserialize;

use super::{check_error, get_text};
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::Project;

pub const PROJECTS_PATH: &str = "/api/projects";

#[derive(Deserialize)]
struct ProjectsResponse {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    error: Option<String>,
}

pub async fn list_projects(config: &DashboardConfig) -> Result<Vec<Project>, DashboardError> {
    let body = get_text(&config.endpoint(PROJECTS_PATH)).await?;
    decode_projects(&body)
}

pub fn decode_projects(body: &str) -> Result<Vec<Project>, DashboardError> {
    let response: ProjectsResponse = serde_json::from_str(body)?;
    check_error(response.error)?;
    Ok(response.projects)
}
