//! In-memory section store
//!
//! Backs the admin screen and lets setup steps seed sections directly.
//! Codes are indexed separately so uniqueness holds under concurrent inserts.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{info, instrument};

use crate::error::{CmsError, Result};
use crate::section::{Section, SectionId};

#[derive(Clone, Default)]
pub struct SectionRepository {
    sections: Arc<DashMap<SectionId, Arc<Section>>>,
    codes: Arc<DashMap<String, SectionId>>,
}

impl std::fmt::Debug for SectionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionRepository")
            .field("sections_count", &self.sections.len())
            .finish()
    }
}

impl SectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new section, rejecting a code that is already taken.
    #[instrument(skip(self, section), fields(code = %section.code))]
    pub fn add(&self, section: Section) -> Result<Arc<Section>> {
        match self.codes.entry(section.code.clone()) {
            Entry::Occupied(_) => Err(CmsError::DuplicateCode { code: section.code }),
            Entry::Vacant(slot) => {
                slot.insert(section.id);
                let section = Arc::new(section);
                self.sections.insert(section.id, section.clone());
                info!("Section '{}' stored", section.code);
                Ok(section)
            }
        }
    }

    pub fn get(&self, id: &SectionId) -> Option<Arc<Section>> {
        self.sections.get(id).map(|entry| entry.value().clone())
    }

    pub fn find_by_code(&self, code: &str) -> Option<Arc<Section>> {
        self.codes.get(code).and_then(|entry| self.get(entry.value()))
    }

    /// All sections ordered by code
    pub fn list(&self) -> Vec<Arc<Section>> {
        let mut sections: Vec<_> = self
            .sections
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        sections.sort_by(|a, b| a.code.cmp(&b.code));
        sections
    }

    /// Renames a section. The code is left untouched.
    #[instrument(skip(self, name), fields(section_id = %id))]
    pub fn rename(&self, id: &SectionId, name: impl Into<String>) -> Result<Arc<Section>> {
        let mut entry = self
            .sections
            .get_mut(id)
            .ok_or_else(|| CmsError::SectionNotFound {
                section_id: id.to_string(),
            })?;
        let mut section = Section::clone(entry.value());
        section.name = name.into();
        let section = Arc::new(section);
        *entry.value_mut() = section.clone();
        info!("Section '{}' renamed", section.code);
        Ok(section)
    }

    #[instrument(skip(self), fields(section_id = %id))]
    pub fn remove(&self, id: &SectionId) -> Result<Arc<Section>> {
        let (_, section) = self
            .sections
            .remove(id)
            .ok_or_else(|| CmsError::SectionNotFound {
                section_id: id.to_string(),
            })?;
        self.codes.remove(&section.code);
        info!("Section '{}' removed", section.code);
        Ok(section)
    }

    pub fn clear(&self) {
        self.sections.clear();
        self.codes.clear();
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn add_and_lookup() {
        let repository = SectionRepository::new();
        let stored = assert_ok!(repository.add(Section::new("blog", "Blog")));

        assert_eq!(repository.get(&stored.id).unwrap().name, "Blog");
        assert_eq!(repository.find_by_code("blog").unwrap().id, stored.id);
        assert_eq!(repository.len(), 1);
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let repository = SectionRepository::new();
        assert_ok!(repository.add(Section::new("DUP", "First")));

        let err = assert_err!(repository.add(Section::new("DUP", "Second")));
        assert!(matches!(err, CmsError::DuplicateCode { code } if code == "DUP"));
        assert_eq!(repository.len(), 1);
    }

    #[test]
    fn rename_keeps_code() {
        let repository = SectionRepository::new();
        let stored = assert_ok!(repository.add(Section::new("faq", "FAQ")));

        let renamed = assert_ok!(repository.rename(&stored.id, "Questions"));
        assert_eq!(renamed.code, "faq");
        assert_eq!(repository.find_by_code("faq").unwrap().name, "Questions");
    }

    #[test]
    fn remove_frees_the_code() {
        let repository = SectionRepository::new();
        let stored = assert_ok!(repository.add(Section::new("news", "News")));

        assert_ok!(repository.remove(&stored.id));
        assert!(repository.is_empty());
        assert!(repository.find_by_code("news").is_none());
        assert_ok!(repository.add(Section::new("news", "News again")));

        assert!(matches!(
            repository.remove(&stored.id),
            Err(CmsError::SectionNotFound { .. })
        ));
    }

    #[test]
    fn list_is_ordered_by_code() {
        let repository = SectionRepository::new();
        assert_ok!(repository.add(Section::new("b", "B")));
        assert_ok!(repository.add(Section::new("a", "A")));

        let codes: Vec<_> = repository.list().iter().map(|s| s.code.clone()).collect();
        assert_eq!(codes, vec!["a", "b"]);
    }
}
