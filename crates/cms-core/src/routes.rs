//! Named admin routes
//!
//! Paths use `{param}` placeholders, the same syntax the admin router is
//! declared with, so both sides share one table.

use crate::error::{CmsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
}

pub const SECTION_INDEX: Route = Route {
    name: "cms_admin_section_index",
    path: "/admin/sections/",
};

pub const SECTION_CREATE: Route = Route {
    name: "cms_admin_section_create",
    path: "/admin/sections/new",
};

pub const SECTION_UPDATE: Route = Route {
    name: "cms_admin_section_update",
    path: "/admin/sections/{id}/edit",
};

pub const SECTION_DELETE: Route = Route {
    name: "cms_admin_section_delete",
    path: "/admin/sections/{id}/delete",
};

impl Route {
    /// Builds a path by substituting every placeholder from `parameters`.
    pub fn generate(&self, parameters: &[(&str, &str)]) -> Result<String> {
        let mut path = String::with_capacity(self.path.len());
        for (index, segment) in self.path.split('/').enumerate() {
            if index > 0 {
                path.push('/');
            }
            match placeholder(segment) {
                Some(name) => {
                    let value = parameters
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| CmsError::MissingRouteParameter {
                            route: self.name,
                            parameter: name.to_string(),
                        })?;
                    path.push_str(value);
                }
                None => path.push_str(segment),
            }
        }
        Ok(path)
    }

    /// Whether a URL path belongs to this route. A trailing slash is not
    /// significant.
    pub fn matches(&self, path: &str) -> bool {
        let expected: Vec<&str> = segments(self.path).collect();
        let actual: Vec<&str> = segments(path).collect();

        expected.len() == actual.len()
            && expected
                .iter()
                .zip(&actual)
                .all(|(pattern, segment)| match placeholder(pattern) {
                    Some(_) => !segment.is_empty(),
                    None => pattern == segment,
                })
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.trim_matches('/').split('/')
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
