//! Minimal HTML scraping over server-rendered admin pages
//!
//! Matching is not nesting-aware: an element must not contain another
//! element with the same tag.

use std::sync::LazyLock;

use regex::Regex;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        #[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($re).expect("valid regex"));
    };
}

pattern!(FORM, r"(?is)<form\b([^>]*)>(.*?)</form>");
pattern!(INPUT, r"(?is)<input\b([^>]*?)/?>");
pattern!(LABEL, r"(?is)<label\b([^>]*)>(.*?)</label>");
pattern!(ROW, r"(?is)<tr\b([^>]*)>(.*?)</tr>");
pattern!(CELL, r"(?is)<td\b([^>]*)>(.*?)</td>");
pattern!(DIV, r"(?is)<div\b([^>]*)>(.*?)</div>");
pattern!(
    ATTRIBUTE,
    r#"([A-Za-z_:][-A-Za-z0-9_:.\[\]]*)(?:\s*=\s*"([^"]*)")?"#
);
pattern!(TAG, r"(?s)<[^>]*>");
pattern!(NUMERIC_ENTITY, r"&#(?:[xX]([0-9A-Fa-f]+)|([0-9]+));");
pattern!(WHITESPACE, r"\s+");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Form,
    Input,
    Label,
    Row,
    Cell,
    /// Flash messages, validation errors and notices. A `div` is expected to
    /// hold text only: a nested `div` ends the match at the inner closing tag.
    Div,
}

impl Tag {
    fn pattern(self) -> &'static Regex {
        match self {
            Tag::Form => &*FORM,
            Tag::Input => &*INPUT,
            Tag::Label => &*LABEL,
            Tag::Row => &*ROW,
            Tag::Cell => &*CELL,
            Tag::Div => &*DIV,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    attributes: Vec<(String, String)>,
    inner_html: String,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Visible text with tags stripped and whitespace collapsed
    pub fn text(&self) -> String {
        text_content(&self.inner_html)
    }

    /// Elements with `tag` found inside this one
    pub fn find_all(&self, tag: Tag) -> Vec<Element> {
        find_all(&self.inner_html, tag)
    }
}

pub fn find_all(html: &str, tag: Tag) -> Vec<Element> {
    tag.pattern()
        .captures_iter(html)
        .map(|captures| Element {
            tag,
            attributes: parse_attributes(captures.get(1).map_or("", |m| m.as_str())),
            inner_html: captures
                .get(2)
                .map_or_else(String::new, |m| m.as_str().to_string()),
        })
        .collect()
}

fn parse_attributes(source: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(source)
        .map(|captures| {
            let name = captures[1].to_ascii_lowercase();
            let value = captures.get(2).map_or("", |m| m.as_str());
            (name, decode_entities(value))
        })
        .collect()
}

pub fn text_content(html: &str) -> String {
    let stripped = TAG.replace_all(html, " ");
    let decoded = decode_entities(&stripped);
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

pub fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    let named = value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&nbsp;", " ");
    NUMERIC_ENTITY
        .replace_all(&named, |captures: &regex::Captures<'_>| {
            let code = match (captures.get(1), captures.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (_, Some(decimal)) => decimal.as_str().parse().ok(),
                _ => None,
            };
            code.and_then(char::from_u32)
                .map_or_else(|| captures[0].to_string(), String::from)
        })
        .replace("&amp;", "&")
}
