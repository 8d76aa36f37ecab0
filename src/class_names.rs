//! The model → steps → page class naming chain.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::naming::sanitize;

pub const DEFAULT_MODEL_CLASS: &str = "GeneratedModel";
pub const DEFAULT_STEPS_CLASS: &str = "GeneratedSteps";
pub const DEFAULT_PAGE_CLASS: &str = "GeneratedPage";

static MODEL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Models?$").unwrap());
static STEPS_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Steps?$").unwrap());

/// `SeatSelectionModel` → `SeatSelectionSteps`.
pub fn derive_steps_class(model_input: &str) -> String {
    let raw = model_input.trim();
    if raw.is_empty() {
        return DEFAULT_STEPS_CLASS.to_string();
    }
    let base = MODEL_SUFFIX.replace(raw, "");
    sanitize(&format!("{base}Steps"), DEFAULT_STEPS_CLASS)
}

/// `SeatSelectionSteps` → `SeatSelectionPage`.
pub fn derive_page_class(steps_class: &str) -> String {
    let raw = steps_class.trim();
    if raw.is_empty() {
        return DEFAULT_PAGE_CLASS.to_string();
    }
    let base = STEPS_SUFFIX.replace(raw, "");
    sanitize(&format!("{base}Page"), DEFAULT_PAGE_CLASS)
}

/// The three class names of one generation, kept in sync.
///
/// Fields are private: the only way to change a name is through a setter,
/// and every setter recomputes the names derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassNames {
    model_input: String,
    steps_override: Option<String>,
    model: String,
    steps: String,
    page: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self::new("")
    }
}

impl ClassNames {
    pub fn new(model_input: &str) -> Self {
        let mut names = Self {
            model_input: model_input.to_string(),
            steps_override: None,
            model: String::new(),
            steps: String::new(),
            page: String::new(),
        };
        names.recompute();
        names
    }

    pub fn with_steps_override(mut self, steps_class: &str) -> Self {
        self.set_steps_class(steps_class);
        self
    }

    /// Changing the model name discards a previous steps override.
    pub fn set_model_class(&mut self, model_input: &str) {
        self.model_input = model_input.to_string();
        self.steps_override = None;
        self.recompute();
    }

    /// An empty value clears the override and returns to the derived name.
    pub fn set_steps_class(&mut self, steps_class: &str) {
        let trimmed = steps_class.trim();
        self.steps_override = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.recompute();
    }

    fn recompute(&mut self) {
        self.model = sanitize(&self.model_input, DEFAULT_MODEL_CLASS);
        self.steps = match &self.steps_override {
            Some(name) => sanitize(name, &derive_steps_class(&self.model_input)),
            None => derive_steps_class(&self.model_input),
        };
        self.page = derive_page_class(&self.steps);
    }

    pub fn model_input(&self) -> &str {
        &self.model_input
    }

    pub fn has_steps_override(&self) -> bool {
        self.steps_override.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn steps(&self) -> &str {
        &self.steps
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    /// Field name of the page object inside the step class.
    pub fn page_variable(&self) -> String {
        self.page.to_lowercase()
    }

    /// Model class name without its `Model` suffix; seeds the feature title.
    pub fn feature_name(&self) -> String {
        match self.model.strip_suffix("Model") {
            Some(base) if !base.is_empty() => base.to_string(),
            _ if self.model == "Model" => "Generated".to_string(),
            _ => self.model.clone(),
        }
    }

    pub fn model_file_name(&self) -> String {
        format!("{}.java", self.model)
    }

    pub fn steps_file_name(&self) -> String {
        format!("{}.java", self.steps)
    }

    pub fn page_file_name(&self) -> String {
        format!("{}.java", self.page)
    }

    pub fn feature_file_name(&self) -> String {
        format!("{}Feature.feature", self.feature_name())
    }
}
