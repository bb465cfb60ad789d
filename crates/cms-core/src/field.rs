//! Section form fields and the comma-separated field lists used by step phrases

use std::fmt;
use std::str::FromStr;

use crate::error::{CmsError, Result};

/// A field of the section form, named by its visible label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionField {
    Code,
    Name,
}

impl SectionField {
    pub const ALL: [SectionField; 2] = [SectionField::Code, SectionField::Name];

    /// Label text shown next to the input and used in validation messages
    pub fn label(self) -> &'static str {
        match self {
            SectionField::Code => "Code",
            SectionField::Name => "Name",
        }
    }

    /// `id` attribute of the rendered input
    pub fn input_id(self) -> &'static str {
        match self {
            SectionField::Code => "section_code",
            SectionField::Name => "section_name",
        }
    }

    /// `name` attribute of the rendered input
    pub fn input_name(self) -> &'static str {
        match self {
            SectionField::Code => "section[code]",
            SectionField::Name => "section[name]",
        }
    }
}

impl fmt::Display for SectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SectionField {
    type Err = CmsError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        SectionField::ALL
            .into_iter()
            .find(|field| field.label() == name)
            .ok_or_else(|| CmsError::UnknownField {
                name: name.to_string(),
            })
    }
}

/// Ordered list of fields parsed from phrases like `"Code, Name"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList(Vec<SectionField>);

impl FieldList {
    pub fn new(fields: Vec<SectionField>) -> Self {
        Self(fields)
    }

    pub fn iter(&self) -> impl Iterator<Item = SectionField> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for FieldList {
    type Err = CmsError;

    fn from_str(s: &str) -> Result<Self> {
        let mut fields = Vec::new();
        for part in s.split(',') {
            if part.trim().is_empty() {
                return Err(CmsError::InvalidFieldList {
                    input: s.to_string(),
                });
            }
            fields.push(part.parse()?);
        }
        Ok(Self(fields))
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = SectionField;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, SectionField>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn parses_fields_in_phrase_order() {
        let fields: FieldList = assert_ok!("Name, Code".parse());
        assert_eq!(
            fields.iter().collect::<Vec<_>>(),
            vec![SectionField::Name, SectionField::Code]
        );
    }

    #[test]
    fn labels_are_case_sensitive() {
        let err = assert_err!("code".parse::<SectionField>());
        assert!(matches!(err, CmsError::UnknownField { name } if name == "code"));
    }

    #[test]
    fn rejects_empty_entries() {
        assert!(matches!(
            "Code,,Name".parse::<FieldList>(),
            Err(CmsError::InvalidFieldList { .. })
        ));
        assert!(matches!(
            "".parse::<FieldList>(),
            Err(CmsError::InvalidFieldList { .. })
        ));
    }

    #[test]
    fn repeated_fields_are_kept() {
        let fields: FieldList = assert_ok!("Code,Code".parse());
        assert_eq!(fields.len(), 2);
    }

    proptest! {
        #[test]
        fn surrounding_whitespace_is_ignored(
            picks in prop::collection::vec(0usize..2, 1..6),
            pad in "[ \t]{0,3}",
        ) {
            let expected: Vec<SectionField> = picks.iter().map(|i| SectionField::ALL[*i]).collect();
            let phrase = expected
                .iter()
                .map(|field| format!("{pad}{}{pad}", field.label()))
                .collect::<Vec<_>>()
                .join(",");

            let parsed: FieldList = phrase.parse().unwrap();
            prop_assert_eq!(parsed.iter().collect::<Vec<_>>(), expected);
        }
    }
}
