//! Section form constraints
//!
//! Blank values only report the blank violation; length limits are checked
//! on non-blank values and the duplicate check only runs on an otherwise
//! valid code.

use cms_core::{SectionField, SectionRepository};

pub const MIN_LENGTH: usize = 2;
pub const MAX_LENGTH: usize = 250;
pub const DUPLICATE_CODE_MESSAGE: &str = "There is an existing section with this code.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: SectionField,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn push(&mut self, field: SectionField, message: impl Into<String>) {
        self.0.push(Violation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn for_field(&self, field: SectionField) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(move |violation| violation.field == field)
            .map(|violation| violation.message.as_str())
    }

    fn extend(&mut self, violation: Option<Violation>) {
        self.0.extend(violation);
    }
}

/// Blank and length constraints shared by every section field.
pub fn check_field(field: SectionField, value: &str) -> Option<Violation> {
    let length = value.chars().count();
    let message = if value.trim().is_empty() {
        format!("{field} cannot be blank.")
    } else if length < MIN_LENGTH {
        format!("{field} must be at least {MIN_LENGTH} characters long.")
    } else if length > MAX_LENGTH {
        format!("{field} can not be longer than {MAX_LENGTH} characters.")
    } else {
        return None;
    };
    Some(Violation { field, message })
}

pub fn validate_new_section(code: &str, name: &str, sections: &SectionRepository) -> Violations {
    let mut violations = Violations::default();
    let code_violation = check_field(SectionField::Code, code);
    let code_is_valid = code_violation.is_none();
    violations.extend(code_violation);
    if code_is_valid && sections.find_by_code(code).is_some() {
        violations.push(SectionField::Code, DUPLICATE_CODE_MESSAGE);
    }
    violations.extend(check_field(SectionField::Name, name));
    violations
}

/// The code is immutable, so only the name is checked on update.
pub fn validate_section_update(name: &str) -> Violations {
    let mut violations = Violations::default();
    violations.extend(check_field(SectionField::Name, name));
    violations
}
