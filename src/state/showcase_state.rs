//! Selection state for the projects and skills sections.

use folio::{ProjectFilter, ProjectKind};

#[derive(Debug, Clone, Default)]
pub struct ShowcaseState {
    pub project_filter: ProjectFilter,
    /// Project shown in the detail window, as an index into the portfolio
    selected_project: Option<usize>,
    skill_category: usize,
    selected_skill: Option<usize>,
}

impl ShowcaseState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Projects =====

    pub fn selected_project(&self) -> Option<usize> {
        self.selected_project
    }

    pub fn open_project(&mut self, index: usize) {
        self.selected_project = Some(index);
    }

    pub fn close_project(&mut self) {
        self.selected_project = None;
    }

    pub fn set_kind(&mut self, kind: Option<ProjectKind>) {
        self.project_filter.kind = kind;
    }

    pub fn toggle_technology(&mut self, tech: &str) {
        self.project_filter.toggle_technology(tech);
    }

    pub fn clear_technologies(&mut self) {
        self.project_filter.clear_technologies();
    }

    // ===== Skills =====

    pub fn skill_category(&self) -> usize {
        self.skill_category
    }

    pub fn selected_skill(&self) -> Option<usize> {
        self.selected_skill
    }

    /// Switches the skills tab. The selected skill belongs to the old tab,
    /// so it is cleared.
    pub fn select_category(&mut self, index: usize) {
        if self.skill_category != index {
            self.skill_category = index;
            self.selected_skill = None;
        }
    }

    /// Selects a skill, or deselects it when it is already selected.
    pub fn toggle_skill(&mut self, index: usize) {
        self.selected_skill = match self.selected_skill {
            Some(current) if current == index => None,
            _ => Some(index),
        };
    }
}
