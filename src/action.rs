//! Canonical actions and the Gherkin keywords they map to.

use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use crate::naming::pascal;

static ASSERTION_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)should|check").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepKeyword {
    Given,
    When,
    Then,
    And,
}

impl StepKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
            StepKeyword::And => "And",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action label resolved to what the generators do with it.
///
/// `Check` and `CheckText` share the `checkText` page method but are phrased
/// differently in Gherkin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Click,
    SendKeys,
    Check,
    CheckText,
    ShouldSee,
    SetSaved,
    GetSaved,
    Save,
    Custom(String),
}

impl Action {
    /// Case-insensitive and trimmed; unknown labels keep their trimmed text.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.to_lowercase().as_str() {
            "click" => Action::Click,
            "send keys" => Action::SendKeys,
            "check" => Action::Check,
            "check text" => Action::CheckText,
            "should see" => Action::ShouldSee,
            "set saved" => Action::SetSaved,
            "get saved" => Action::GetSaved,
            "save" => Action::Save,
            _ => Action::Custom(trimmed.to_string()),
        }
    }

    /// Prefix of the page-object method name. Custom actions get a
    /// pascal-cased key (`hover over` is `HoverOver`); the page method name
    /// lower-cases its first letter.
    pub fn key(&self) -> Cow<'static, str> {
        match self {
            Action::Click => Cow::Borrowed("click"),
            Action::SendKeys => Cow::Borrowed("sendKeys"),
            Action::Check | Action::CheckText => Cow::Borrowed("checkText"),
            Action::ShouldSee => Cow::Borrowed("shouldSee"),
            Action::SetSaved => Cow::Borrowed("setSaved"),
            Action::GetSaved => Cow::Borrowed("getSaved"),
            Action::Save => Cow::Borrowed("save"),
            Action::Custom(text) => Cow::Owned(custom_key(text)),
        }
    }

    /// Whether the step and page methods take a `String text` argument.
    pub fn requires_param(&self) -> bool {
        matches!(self, Action::SendKeys | Action::Check | Action::CheckText)
    }

    pub fn keyword(&self) -> StepKeyword {
        match self {
            Action::Click | Action::SendKeys | Action::GetSaved | Action::Save => StepKeyword::When,
            Action::Check | Action::CheckText | Action::ShouldSee => StepKeyword::Then,
            Action::SetSaved => StepKeyword::Given,
            Action::Custom(text) => {
                if ASSERTION_WORDS.is_match(text) {
                    StepKeyword::Then
                } else {
                    StepKeyword::When
                }
            }
        }
    }

    /// How the action is presented in annotations and step method names.
    /// `GetSaved` reads like `SendKeys`; everything else keeps the user's text.
    pub fn presented(&self) -> Action {
        match self {
            Action::GetSaved => Action::SendKeys,
            other => other.clone(),
        }
    }

    /// Action text used for step method names and default phrasing.
    pub fn effective_text<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        match self {
            Action::GetSaved => Cow::Borrowed("Send Keys"),
            _ => Cow::Borrowed(raw.trim()),
        }
    }
}

/// Normalised view of one action label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedAction {
    pub key: String,
    pub requires_param: bool,
    pub keyword: StepKeyword,
}

fn custom_key(text: &str) -> String {
    let key = pascal(pascal(text).trim_start_matches(|c: char| c.is_ascii_digit()));
    if key.is_empty() {
        "Perform".to_string()
    } else {
        key
    }
}

pub fn normalize(action_text: &str) -> NormalizedAction {
    let action = Action::parse(action_text);
    NormalizedAction {
        key: action.key().into_owned(),
        requires_param: action.requires_param(),
        keyword: action.keyword(),
    }
}
