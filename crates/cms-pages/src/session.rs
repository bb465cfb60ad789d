//! Browser session
//!
//! Drives the admin over HTTP the way a headless browser would: it keeps
//! cookies, follows redirects, remembers the last rendered document, and
//! submits forms with whatever values were filled in since the page loaded.

use std::collections::HashMap;

use cms_core::{CmsError, Result};
use parking_lot::RwLock;
use reqwest::{Method, Response, Url};
use tracing::{debug, instrument};

use crate::html::{self, Element, Tag};

#[derive(Debug, Clone)]
pub struct Document {
    url: Url,
    status: u16,
    html: String,
}

impl Document {
    pub fn new(url: Url, status: u16, html: String) -> Self {
        Self { url, status, html }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn find_all(&self, tag: Tag) -> Vec<Element> {
        html::find_all(&self.html, tag)
    }

    pub fn form_named(&self, name: &str) -> Option<Element> {
        self.find_all(Tag::Form)
            .into_iter()
            .find(|form| form.attribute("name") == Some(name))
    }

    /// Finds an input by id, name or the text of its label.
    pub fn find_field(&self, locator: &str) -> Option<Element> {
        let inputs = self.find_all(Tag::Input);
        let by_attribute = inputs.iter().find(|input| {
            input.attribute("id") == Some(locator) || input.attribute("name") == Some(locator)
        });
        if let Some(input) = by_attribute {
            return Some(input.clone());
        }

        let target = self
            .find_all(Tag::Label)
            .into_iter()
            .find(|label| label.text() == locator)?;
        let id = target.attribute("for")?;
        inputs
            .into_iter()
            .find(|input| input.attribute("id") == Some(id))
    }
}

#[derive(Debug)]
struct BrowserState {
    document: Document,
    filled: HashMap<String, String>,
}

pub struct Session {
    client: reqwest::Client,
    base_url: Url,
    state: RwLock<Option<BrowserState>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field(
                "current_url",
                &self.current_url().map(|url| url.to_string()),
            )
            .finish()
    }
}

impl Session {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(CmsError::driver)?;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(CmsError::driver)?;
        Ok(Self {
            client,
            base_url,
            state: RwLock::new(None),
        })
    }

    #[instrument(skip(self))]
    pub async fn visit(&self, path: &str) -> Result<()> {
        let url = self.base_url.join(path).map_err(CmsError::driver)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(CmsError::driver)?;
        self.load(response).await
    }

    pub fn current_url(&self) -> Option<Url> {
        self.state
            .read()
            .as_ref()
            .map(|state| state.document.url.clone())
    }

    /// Snapshot of the page currently displayed
    pub fn document(&self) -> Result<Document> {
        self.state
            .read()
            .as_ref()
            .map(|state| state.document.clone())
            .ok_or(CmsError::NoPageLoaded)
    }

    #[instrument(skip(self, value))]
    pub fn fill_field(&self, locator: &str, value: &str) -> Result<()> {
        let mut guard = self.state.write();
        let state = guard.as_mut().ok_or(CmsError::NoPageLoaded)?;
        let input = state
            .document
            .find_field(locator)
            .ok_or_else(|| CmsError::ElementNotFound {
                page: state.document.url.to_string(),
                element: format!("field '{locator}'"),
            })?;
        let name = input
            .attribute("name")
            .ok_or_else(|| CmsError::ElementNotFound {
                page: state.document.url.to_string(),
                element: format!("name of field '{locator}'"),
            })?;
        debug!(field = name, length = value.chars().count(), "Filling field");
        state.filled.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Submits `form`, which must come from the current document.
    #[instrument(skip(self, form), fields(action = form.attribute("action")))]
    pub async fn submit(&self, form: &Element) -> Result<()> {
        let (url, fields) = {
            let guard = self.state.read();
            let state = guard.as_ref().ok_or(CmsError::NoPageLoaded)?;
            let url = match form.attribute("action") {
                Some(action) if !action.is_empty() => {
                    state.document.url.join(action).map_err(CmsError::driver)?
                }
                _ => state.document.url.clone(),
            };
            (url, form_values(form, &state.filled))
        };

        let method = match form.attribute("method") {
            Some(method) if method.eq_ignore_ascii_case("post") => Method::POST,
            _ => Method::GET,
        };
        debug!(%method, %url, fields = fields.len(), "Submitting form");

        let request = if method == Method::POST {
            self.client.post(url).form(&fields)
        } else {
            self.client.get(url).query(&fields)
        };
        let response = request.send().await.map_err(CmsError::driver)?;
        self.load(response).await
    }

    async fn load(&self, response: Response) -> Result<()> {
        let url = response.url().clone();
        let status = response.status().as_u16();
        let html = response.text().await.map_err(CmsError::driver)?;
        debug!(%url, status, "Page loaded");

        *self.state.write() = Some(BrowserState {
            document: Document::new(url, status, html),
            filled: HashMap::new(),
        });
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn show(&self, path: &str, status: u16, html: &str) {
        let url = self.base_url.join(path).expect("valid test path");
        *self.state.write() = Some(BrowserState {
            document: Document::new(url, status, html.to_string()),
            filled: HashMap::new(),
        });
    }
}

/// Successful controls of a form, as a browser would submit them
fn form_values(form: &Element, filled: &HashMap<String, String>) -> Vec<(String, String)> {
    form.find_all(Tag::Input)
        .into_iter()
        .filter(|input| input.attribute("disabled").is_none())
        .filter(|input| {
            !matches!(
                input.attribute("type"),
                Some("submit" | "button" | "reset" | "image")
            )
        })
        .filter_map(|input| {
            let name = input.attribute("name")?.to_string();
            let value = filled
                .get(&name)
                .cloned()
                .or_else(|| input.attribute("value").map(str::to_string))
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"<form name="section" method="post" action="/admin/sections/1/edit">
<label for="section_code">Code</label><input type="text" id="section_code" name="section[code]" value="blog" disabled="disabled">
<label for="section_name">Name</label><input type="text" id="section_name" name="section[name]" value="Blog">
</form>"#;

    fn session_showing(html: &str) -> Session {
        let session = Session::new("http://127.0.0.1:8081").unwrap();
        session.show("/admin/sections/1/edit", 200, html);
        session
    }

    #[test]
    fn fields_are_located_by_label_id_or_name() {
        let document = session_showing(FORM).document().unwrap();
        for locator in ["Name", "section_name", "section[name]"] {
            let input = document.find_field(locator).unwrap();
            assert_eq!(input.attribute("id"), Some("section_name"));
        }
        assert!(document.find_field("Description").is_none());
    }

    #[test]
    fn filled_values_override_and_disabled_inputs_are_skipped() {
        let session = session_showing(FORM);
        session.fill_field("Name", "News").unwrap();
        session.fill_field("Code", "ignored").unwrap();

        let state = session.state.read();
        let state = state.as_ref().unwrap();
        let form = state.document.form_named("section").unwrap();
        assert_eq!(
            form_values(&form, &state.filled),
            vec![("section[name]".to_string(), "News".to_string())]
        );
    }

    #[test]
    fn filling_without_a_page_fails() {
        let session = Session::new("http://127.0.0.1:8081").unwrap();
        assert!(matches!(
            session.fill_field("Name", "x"),
            Err(CmsError::NoPageLoaded)
        ));
    }

    #[test]
    fn unknown_field_is_reported() {
        let session = session_showing(FORM);
        assert!(matches!(
            session.fill_field("Description", "x"),
            Err(CmsError::ElementNotFound { .. })
        ));
    }
}
