//! Section registry: the ordered, fixed list of fullscreen sections.
//!
//! A section is an opaque unit of content. The registry only knows its id and
//! title; how it renders is carried by the host-chosen payload `K` (for the GUI
//! this is an enum naming which panel to draw).

use std::collections::HashSet;

use crate::error::RegistryError;

/// One fullscreen unit of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<K> {
    id: String,
    title: String,
    kind: K,
}

impl<K> Section<K> {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: K) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The render capability supplied by the host.
    pub fn kind(&self) -> &K {
        &self.kind
    }
}

/// Ordered sections for one navigation session.
///
/// Built once at mount time and never mutated afterwards; there is no API for
/// insertion or removal.
#[derive(Debug, Clone)]
pub struct SectionRegistry<K> {
    sections: Vec<Section<K>>,
}

impl<K> SectionRegistry<K> {
    /// Builds a registry, rejecting empty lists and duplicate ids.
    pub fn new(sections: Vec<Section<K>>) -> Result<Self, RegistryError> {
        if sections.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::with_capacity(sections.len());
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(RegistryError::DuplicateId(section.id.clone()));
            }
        }

        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false for a constructed registry; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section<K>> {
        self.sections.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section<K>> {
        self.sections.iter()
    }

    pub fn last_index(&self) -> usize {
        self.sections.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Section<u8>> {
        vec![
            Section::new("home", "Home", 0),
            Section::new("education", "Education", 1),
            Section::new("projects", "Projects", 2),
        ]
    }

    #[test]
    fn test_registry_keeps_order() {
        let registry = SectionRegistry::new(sample()).unwrap();
        let ids: Vec<&str> = registry.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["home", "education", "projects"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.last_index(), 2);
        assert_eq!(registry.position("projects"), Some(2));
        assert_eq!(registry.get(1).map(|s| s.title()), Some("Education"));
    }

    #[test]
    fn test_registry_rejects_empty() {
        let err = SectionRegistry::<u8>::new(Vec::new()).unwrap_err();
        assert_eq!(err, RegistryError::Empty);
    }

    #[test]
    fn test_registry_rejects_duplicate_ids() {
        let mut sections = sample();
        sections.push(Section::new("home", "Home again", 9));
        let err = SectionRegistry::new(sections).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId("home".to_string()));
    }
}
