use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
}

impl Cookie {
    pub fn new(name: &str, value: &str, domain: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.to_string(),
            path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Parameters for (re)creating the daemon's single browser session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSpec {
    pub cookies: Vec<Cookie>,
    pub viewport: Viewport,
    pub user_agent: String,
}

/// One field to pull out of each matched element: the text content of a
/// sub-element, or one of its attributes.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: String,
    /// Sub-selector scoped to the matched element; `None` targets the
    /// element itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Attribute to read; `None` reads inner text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl FieldSpec {
    pub fn attr(name: &str, selector: &str, attribute: &str) -> Self {
        Self {
            name: name.to_string(),
            selector: Some(selector.to_string()),
            attribute: Some(attribute.to_string()),
        }
    }

    pub fn text(name: &str, selector: &str) -> Self {
        Self {
            name: name.to_string(),
            selector: Some(selector.to_string()),
            attribute: None,
        }
    }
}

/// Field values for one matched element. A missing sub-element or attribute
/// yields `None`, never an error.
pub type ElementData = HashMap<String, Option<String>>;

#[derive(Debug, Deserialize)]
pub(crate) struct ScrapeResponse {
    #[serde(default)]
    pub elements: Vec<ElementData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClickResponse {
    #[serde(default)]
    pub clicked: bool,
}
