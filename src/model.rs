//! Form records consumed by the generators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque, process-unique record identifier. Unrelated to ordering.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// One UI element: a locator alias, strategy and raw selector, plus the
/// action used when steps are derived from elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    #[serde(default = "new_record_id")]
    pub id: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub by: String,
    #[serde(default)]
    pub selector: String,
    #[serde(default)]
    pub action: String,
}

impl Default for ElementRecord {
    fn default() -> Self {
        Self {
            id: new_record_id(),
            alias: String::new(),
            by: String::new(),
            selector: String::new(),
            action: String::new(),
        }
    }
}

impl ElementRecord {
    pub fn new(alias: &str, by: &str, selector: &str) -> Self {
        Self {
            alias: alias.to_string(),
            by: by.to_string(),
            selector: selector.to_string(),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = action.to_string();
        self
    }

    /// Alias, strategy and selector are all filled in.
    pub fn is_locatable(&self) -> bool {
        !self.alias.trim().is_empty() && !self.by.trim().is_empty() && !self.selector.trim().is_empty()
    }
}

/// Partial update of an [`ElementRecord`]; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ElementPatch {
    pub alias: Option<String>,
    pub by: Option<String>,
    pub selector: Option<String>,
    pub action: Option<String>,
}

impl ElementPatch {
    pub fn apply(self, element: &mut ElementRecord) {
        if let Some(alias) = self.alias {
            element.alias = alias;
        }
        if let Some(by) = self.by {
            element.by = by;
        }
        if let Some(selector) = self.selector {
            element.selector = selector;
        }
        if let Some(action) = self.action {
            element.action = action;
        }
    }
}

/// One interaction to narrate as a step, a page method and a feature line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepEntry {
    #[serde(default = "new_record_id")]
    pub id: String,
    #[serde(default)]
    pub page_name: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub element: String,
}

impl Default for StepEntry {
    fn default() -> Self {
        Self {
            id: new_record_id(),
            page_name: String::new(),
            action: String::new(),
            element: String::new(),
        }
    }
}

impl StepEntry {
    pub fn new(page_name: &str, action: &str, element: &str) -> Self {
        Self {
            page_name: page_name.to_string(),
            action: action.to_string(),
            element: element.to_string(),
            ..Self::default()
        }
    }

    /// Page name, action and element are all non-blank.
    pub fn is_complete(&self) -> bool {
        !self.page_name.trim().is_empty() && self.has_action_and_element()
    }

    pub fn has_action_and_element(&self) -> bool {
        !self.action.trim().is_empty() && !self.element.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StepPatch {
    pub page_name: Option<String>,
    pub action: Option<String>,
    pub element: Option<String>,
}

impl StepPatch {
    pub fn apply(self, step: &mut StepEntry) {
        if let Some(page_name) = self.page_name {
            step.page_name = page_name;
        }
        if let Some(action) = self.action {
            step.action = action;
        }
        if let Some(element) = self.element {
            step.element = element;
        }
    }
}

/// How step annotations are phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputMode {
    /// Nothing chosen yet; phrased like [`OutputMode::Gherkin`].
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "gherkin")]
    Gherkin,
    #[serde(rename = "grid")]
    Grid,
}

impl OutputMode {
    pub fn is_grid(self) -> bool {
        self == OutputMode::Grid
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Unset => "",
            OutputMode::Gherkin => "gherkin",
            OutputMode::Grid => "grid",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(OutputMode::Unset),
            "gherkin" => Ok(OutputMode::Gherkin),
            "grid" => Ok(OutputMode::Grid),
            other => Err(format!("unknown output mode '{other}' (expected gherkin or grid)")),
        }
    }
}
