//! Portfolio content model.
//!
//! The navigation core treats sections as opaque; this is what the GUI's
//! section panels actually draw. Content ships as JSON alongside the binary
//! and can be replaced through `content_path` in the site config.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, RegistryError};
use crate::section::{Section, SectionRegistry};

const BUNDLED_CONTENT: &str = include_str!("../assets/portfolio.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub summary: String,
    pub email: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub program: String,
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent, drawn as a bar
    pub level: u8,
    /// Shown when the skill is selected
    #[serde(default)]
    pub description: String,
}

impl Skill {
    pub fn proficiency(&self) -> Proficiency {
        Proficiency::from_level(self.level)
    }
}

/// Named band for a skill level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub fn from_level(level: u8) -> Self {
        match level {
            90.. => Proficiency::Expert,
            70..=89 => Proficiency::Advanced,
            50..=69 => Proficiency::Intermediate,
            _ => Proficiency::Beginner,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Web,
    Mobile,
    Desktop,
    Systems,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 4] = [
        ProjectKind::Web,
        ProjectKind::Mobile,
        ProjectKind::Desktop,
        ProjectKind::Systems,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectKind::Web => "Web",
            ProjectKind::Mobile => "Mobile",
            ProjectKind::Desktop => "Desktop",
            ProjectKind::Systems => "Systems",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub kind: ProjectKind,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub link: Option<String>,
    pub repository: Option<String>,
    pub year: Option<String>,
}

/// Narrows the project list by kind and technology.
///
/// A project passes when its kind matches (or no kind is selected) and it
/// uses at least one of the selected technologies (or none are selected).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub kind: Option<ProjectKind>,
    technologies: BTreeSet<String>,
}

impl ProjectFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self, project: &Project) -> bool {
        let kind_match = self.kind.map_or(true, |kind| project.kind == kind);
        let tech_match = self.technologies.is_empty()
            || project.technologies.iter().any(|tech| self.technologies.contains(tech));
        kind_match && tech_match
    }

    /// Selected technologies in sorted order.
    pub fn technologies(&self) -> impl Iterator<Item = &str> {
        self.technologies.iter().map(String::as_str)
    }

    pub fn has_technology(&self, tech: &str) -> bool {
        self.technologies.contains(tech)
    }

    pub fn toggle_technology(&mut self, tech: &str) {
        if !self.technologies.remove(tech) {
            self.technologies.insert(tech.to_string());
        }
    }

    pub fn clear_technologies(&mut self) {
        self.technologies.clear();
    }
}

/// Which panel draws a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Home,
    Education,
    Skills,
    Projects,
    Contact,
}

/// The five portfolio sections in display order.
pub fn default_registry() -> Result<SectionRegistry<SectionKind>, RegistryError> {
    SectionRegistry::new(vec![
        Section::new("home", "Home", SectionKind::Home),
        Section::new("education", "Education", SectionKind::Education),
        Section::new("skills", "Skills", SectionKind::Skills),
        Section::new("projects", "Projects", SectionKind::Projects),
        Section::new("contact", "Contact", SectionKind::Contact),
    ])
}

/// Everything the portfolio sections display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub profile: Profile,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillGroup>,
    pub projects: Vec<Project>,
}

impl Portfolio {
    pub fn bundled() -> Result<Self, ContentError> {
        Self::from_json(BUNDLED_CONTENT)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let portfolio: Portfolio = serde_json::from_str(json)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Loads `path` if given, else the bundled content.
    pub fn load_or_bundled(path: Option<&Path>) -> Result<Self, ContentError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.profile.name.trim().is_empty() {
            return Err(ContentError::Invalid("profile.name is empty".to_string()));
        }

        let mut titles = HashSet::new();
        for project in &self.projects {
            if !titles.insert(project.title.as_str()) {
                return Err(ContentError::Invalid(format!("duplicate project title: {}", project.title)));
            }
        }

        for group in &self.skills {
            if let Some(skill) = group.skills.iter().find(|s| s.level > 100) {
                return Err(ContentError::Invalid(format!("skill {} above 100%", skill.name)));
            }
        }

        Ok(())
    }

    /// Every technology used by any project, sorted and deduplicated.
    pub fn technologies(&self) -> Vec<&str> {
        let all: BTreeSet<&str> = self
            .projects
            .iter()
            .flat_map(|p| p.technologies.iter().map(String::as_str))
            .collect();
        all.into_iter().collect()
    }

    /// Project kinds that occur in the content, in [`ProjectKind::ALL`] order.
    pub fn project_kinds(&self) -> Vec<ProjectKind> {
        ProjectKind::ALL
            .into_iter()
            .filter(|kind| self.projects.iter().any(|p| p.kind == *kind))
            .collect()
    }

    /// Projects passing `filter`, with their index into `projects`.
    pub fn filtered_projects<'a>(&'a self, filter: &'a ProjectFilter) -> impl Iterator<Item = (usize, &'a Project)> + 'a {
        self.projects
            .iter()
            .enumerate()
            .filter(move |(_, project)| filter.matches(project))
    }

    /// Plain-text summary used as chat context.
    pub fn chat_context(&self) -> String {
        let mut lines = vec![
            format!("I'm {}, {}.", self.profile.name, self.profile.headline),
            self.profile.summary.clone(),
        ];

        if !self.education.is_empty() {
            let schools: Vec<String> = self
                .education
                .iter()
                .map(|e| format!("{} at {} ({})", e.program, e.institution, e.period))
                .collect();
            lines.push(format!("Education: {}.", schools.join("; ")));
        }

        let skills: Vec<&str> = self
            .skills
            .iter()
            .flat_map(|g| g.skills.iter().map(|s| s.name.as_str()))
            .collect();
        if !skills.is_empty() {
            lines.push(format!("I work with {}.", skills.join(", ")));
        }

        for project in &self.projects {
            lines.push(format!("Project {}: {}", project.title, project.description));
        }

        lines.join("\n")
    }
}
