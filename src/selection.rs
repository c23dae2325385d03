//! Project Selection
//!
//! Multi-select state behind the project toggle buttons. Keeps the rendered
//! order so the composite value is stable.

use std::collections::HashSet;

use crate::models::Project;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSelection {
    projects: Vec<Project>,
    selected: HashSet<String>,
}

impl ProjectSelection {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects, selected: HashSet::new() }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    /// Flip one button. Unknown keys are ignored.
    pub fn toggle(&mut self, key: &str) {
        if !self.contains(key) {
            return;
        }
        if !self.selected.remove(key) {
            self.selected.insert(key.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.projects.iter().map(|p| p.key.clone()).collect();
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    /// Mark the given keys selected, keeping only those that have a button
    pub fn restore(&mut self, keys: &[String]) {
        for key in keys {
            if self.contains(key) {
                self.selected.insert(key.clone());
            }
        }
    }

    /// Selected keys in button order
    pub fn selected_keys(&self) -> Vec<String> {
        self.projects
            .iter()
            .filter(|p| self.selected.contains(&p.key))
            .map(|p| p.key.clone())
            .collect()
    }

    /// Comma-joined selected keys, the value of the hidden `#projects` input
    pub fn composite(&self) -> String {
        self.selected_keys().join(",")
    }

    fn contains(&self, key: &str) -> bool {
        self.projects.iter().any(|p| p.key == key)
    }
}
