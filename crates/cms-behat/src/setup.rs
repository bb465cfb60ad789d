use std::sync::Arc;

use cms_core::{Result, Section, SectionRepository};
use tracing::info;

use crate::context::SECTION_KEY;
use crate::storage::SharedStorage;

/// Seeds sections straight into the store, bypassing the admin screen.
#[derive(Debug, Clone)]
pub struct SectionSetupContext {
    sections: SectionRepository,
}

impl SectionSetupContext {
    pub fn new(sections: SectionRepository) -> Self {
        Self { sections }
    }

    pub fn there_is_an_existing_section(
        &self,
        storage: &mut SharedStorage,
        code: &str,
        name: &str,
    ) -> Result<Arc<Section>> {
        let section = self.sections.add(Section::new(code, name))?;
        storage.set(SECTION_KEY, Section::clone(&section));
        info!("Seeded section '{}'", code);
        Ok(section)
    }
}
