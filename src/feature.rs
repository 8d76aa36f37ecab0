//! Gherkin feature file generation and the live step preview.

use serde::Serialize;

use crate::action::{Action, StepKeyword};
use crate::model::{OutputMode, StepEntry};
use crate::steps::{annotation_text, qualifying, trace_for, TraceEntry};

const STEP_INDENT: &str = "    ";

/// A feature with a single scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDoc {
    pub feature_name: String,
    pub scenario_name: String,
    pub lines: Vec<String>,
}

impl FeatureDoc {
    /// Scenario steps, indented and newline-separated.
    pub fn steps_block(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{STEP_INDENT}{line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Plain rendering, identical to the built-in feature template.
    pub fn render(&self) -> String {
        format!(
            "Feature: {}\n\n  Scenario: {}\n{}\n",
            self.feature_name,
            self.scenario_name,
            self.steps_block()
        )
    }
}

/// Consecutive steps sharing a keyword read `And` after the first one.
pub fn collapse(trace: &[TraceEntry]) -> Vec<String> {
    let mut previous: Option<StepKeyword> = None;
    trace
        .iter()
        .map(|entry| {
            let keyword = if previous == Some(entry.keyword) {
                StepKeyword::And
            } else {
                entry.keyword
            };
            previous = Some(entry.keyword);
            format!("{keyword} {}", entry.text)
        })
        .collect()
}

/// Every line prefixed with `And`, whatever its keyword.
pub fn legacy_lines(entries: &[StepEntry], mode: OutputMode) -> Vec<String> {
    qualifying(entries)
        .into_iter()
        .map(|entry| format!("{} {}", StepKeyword::And, annotation_text(entry, mode)))
        .collect()
}

/// Fold the step list into a scenario.
///
/// `trace` is the annotation trace of the step-definition pass. Without one
/// the trace is recomputed from `entries`, unless `legacy_and_prefix` asks for
/// the old all-`And` lines. `None` when no entry qualifies.
pub fn build_feature(
    entries: &[StepEntry],
    trace: Option<&[TraceEntry]>,
    feature_name: &str,
    mode: OutputMode,
    legacy_and_prefix: bool,
) -> Option<FeatureDoc> {
    if qualifying(entries).is_empty() {
        return None;
    }

    let lines = match trace {
        Some(trace) => collapse(trace),
        None if legacy_and_prefix => legacy_lines(entries, mode),
        None => collapse(&trace_for(entries, mode)),
    };

    Some(FeatureDoc {
        feature_name: feature_name.to_string(),
        scenario_name: format!("{feature_name} scenario"),
        lines,
    })
}

/// One preview line per entry with a page name; missing action or element
/// show as `<action>` / `<element>`. Empty until an output mode is chosen.
pub fn preview(entries: &[StepEntry], mode: OutputMode) -> String {
    if mode == OutputMode::Unset {
        return String::new();
    }
    entries
        .iter()
        .filter(|s| !s.page_name.trim().is_empty())
        .map(|s| preview_line(s, mode))
        .collect::<Vec<_>>()
        .join("\n")
}

fn preview_line(entry: &StepEntry, mode: OutputMode) -> String {
    let page = entry.page_name.trim();
    let action = entry.action.trim();
    let element = entry.element.trim();

    if mode.is_grid() {
        return [
            page,
            if action.is_empty() { "<action>" } else { action },
            if element.is_empty() { "<element>" } else { element },
        ]
        .join(", ");
    }

    let element = if element.is_empty() { "<element>" } else { element };
    if action.is_empty() {
        return format!("{} <action> {element} on {page}", StepKeyword::When);
    }

    let filled = StepEntry::new(page, action, element);
    format!(
        "{} {}",
        Action::parse(action).keyword(),
        annotation_text(&filled, OutputMode::Gherkin)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(page: &str, action: &str, element: &str) -> StepEntry {
        StepEntry::new(page, action, element)
    }

    #[test]
    fn test_consecutive_when_collapses_to_and() {
        let entries = vec![
            entry("Login Page", "send keys", "USERNAME"),
            entry("Login Page", "click", "LOGIN_BUTTON"),
            entry("Home Page", "should see", "WELCOME"),
        ];
        let doc = build_feature(&entries, None, "Login", OutputMode::Gherkin, false).unwrap();
        assert_eq!(
            doc.lines,
            vec![
                "When I fill username on Login Page with \"<text>\"",
                "And I click loginButton on Login Page",
                "Then I should see welcome on Home Page",
            ]
        );
    }

    #[test]
    fn test_keyword_change_resets_collapse() {
        let trace = vec![
            TraceEntry { keyword: StepKeyword::Given, text: "a".into() },
            TraceEntry { keyword: StepKeyword::When, text: "b".into() },
            TraceEntry { keyword: StepKeyword::Given, text: "c".into() },
            TraceEntry { keyword: StepKeyword::Given, text: "d".into() },
        ];
        assert_eq!(collapse(&trace), vec!["Given a", "When b", "Given c", "And d"]);
    }

    #[test]
    fn test_legacy_prefix_uses_and_everywhere() {
        let entries = vec![
            entry("Login Page", "click", "LOGIN_BUTTON"),
            entry("Home Page", "should see", "WELCOME"),
        ];
        let doc = build_feature(&entries, None, "Login", OutputMode::Gherkin, true).unwrap();
        assert_eq!(
            doc.lines,
            vec!["And I click loginButton on Login Page", "And I should see welcome on Home Page"]
        );
    }

    #[test]
    fn test_render_layout() {
        let entries = vec![entry("Login Page", "click", "LOGIN_BUTTON")];
        let doc = build_feature(&entries, None, "Login", OutputMode::Gherkin, false).unwrap();
        assert_eq!(
            doc.render(),
            "Feature: Login\n\n  Scenario: Login scenario\n    When I click loginButton on Login Page\n"
        );
    }

    #[test]
    fn test_empty_when_nothing_qualifies() {
        let entries = vec![entry("", "click", "LOGIN_BUTTON")];
        assert!(build_feature(&entries, None, "Login", OutputMode::Gherkin, false).is_none());
    }

    #[test]
    fn test_preview_placeholders() {
        let entries = vec![
            entry("Home", "", ""),
            entry("Home", "click", ""),
            entry("Home", "", "SEARCH"),
            entry("", "click", "SEARCH"),
        ];
        assert_eq!(
            preview(&entries, OutputMode::Gherkin),
            "When <action> <element> on Home\nWhen I click <element> on Home\nWhen <action> SEARCH on Home"
        );
        assert_eq!(
            preview(&entries, OutputMode::Grid),
            "Home, <action>, <element>\nHome, click, <element>\nHome, <action>, SEARCH"
        );
        assert_eq!(preview(&entries, OutputMode::Unset), "");
    }
}
