//! Artifact generation: the pure builders rendered through the template engine.

use serde::Serialize;
use tracing::{debug, warn};

use crate::class_names::ClassNames;
use crate::config::GenerationOptions;
use crate::error::CsbResult;
use crate::feature::build_feature;
use crate::locator::LocatorBook;
use crate::model::{OutputMode, StepEntry};
use crate::page::build_page_class;
use crate::steps::{build_step_class, qualifying, TraceEntry};
use crate::template_engine::{TemplateEngine, TemplateKind};

/// Step class, page class and feature file of one generation pass. Each
/// artifact is empty when nothing qualified for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepSuite {
    pub steps: String,
    pub page: String,
    pub feature: String,
    pub trace: Vec<TraceEntry>,
}

impl StepSuite {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.page.is_empty() && self.feature.is_empty()
    }
}

#[derive(Clone)]
pub struct CodeGenerator {
    engine: TemplateEngine,
    options: GenerationOptions,
}

impl CodeGenerator {
    pub fn new(options: GenerationOptions) -> CsbResult<Self> {
        Ok(Self::with_engine(TemplateEngine::new()?, options))
    }

    pub fn with_engine(engine: TemplateEngine, options: GenerationOptions) -> Self {
        Self { engine, options }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    /// The output mode used when a caller leaves it unset.
    pub fn resolve_mode(&self, mode: OutputMode) -> OutputMode {
        match mode {
            OutputMode::Unset => self.options.output_mode,
            chosen => chosen,
        }
    }

    /// Model class holding every generated locator constant; `""` when the
    /// book is empty.
    pub fn model_file(&self, book: &LocatorBook, names: &ClassNames) -> CsbResult<String> {
        let duplicates = book.duplicate_constants();
        if !duplicates.is_empty() {
            warn!(constants = ?duplicates, "model declares the same constant more than once");
        }

        match book.model_class(names.model(), &self.options.model_package) {
            Some(class) => {
                debug!(class = %class.name, constants = class.fields.len(), "rendering model class");
                self.engine.render_java(TemplateKind::Model, &class)
            }
            None => Ok(String::new()),
        }
    }

    /// Generate the step class, page class and feature file together. The
    /// feature file is folded from the step class's annotation trace.
    pub fn step_suite(
        &self,
        entries: &[StepEntry],
        names: &ClassNames,
        mode: OutputMode,
    ) -> CsbResult<StepSuite> {
        let mode = self.resolve_mode(mode);
        let mut suite = StepSuite::default();

        // Page and feature follow a successful step pass only.
        let Some(plan) = build_step_class(entries, names, mode, &self.options) else {
            debug!(steps = entries.len(), "no step qualifies");
            return Ok(suite);
        };
        suite.steps = self.engine.render_java(TemplateKind::Steps, &plan.class)?;
        suite.trace = plan.trace;

        if let Some(class) = build_page_class(entries, names, &self.options) {
            suite.page = self.engine.render_java(TemplateKind::Page, &class)?;
        }

        let trace = (!suite.trace.is_empty()).then_some(suite.trace.as_slice());
        if let Some(doc) = build_feature(
            entries,
            trace,
            &names.feature_name(),
            mode,
            self.options.legacy_and_prefix,
        ) {
            suite.feature = self.engine.render_feature(&doc)?;
        }

        debug!(
            steps = entries.len(),
            traced = suite.trace.len(),
            mode = %mode,
            "step suite generated"
        );
        Ok(suite)
    }

    pub fn step_file(&self, entries: &[StepEntry], names: &ClassNames, mode: OutputMode) -> CsbResult<String> {
        match build_step_class(entries, names, self.resolve_mode(mode), &self.options) {
            Some(plan) => self.engine.render_java(TemplateKind::Steps, &plan.class),
            None => Ok(String::new()),
        }
    }

    /// Page class for `entries`; `""` unless some step qualifies for the step class.
    pub fn page_file(&self, entries: &[StepEntry], names: &ClassNames) -> CsbResult<String> {
        if qualifying(entries).is_empty() {
            return Ok(String::new());
        }
        match build_page_class(entries, names, &self.options) {
            Some(class) => self.engine.render_java(TemplateKind::Page, &class),
            None => Ok(String::new()),
        }
    }

    /// Feature file without a step-definition pass.
    pub fn feature_file(&self, entries: &[StepEntry], names: &ClassNames, mode: OutputMode) -> CsbResult<String> {
        match build_feature(
            entries,
            None,
            &names.feature_name(),
            self.resolve_mode(mode),
            self.options.legacy_and_prefix,
        ) {
            Some(doc) => self.engine.render_feature(&doc),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementRecord;

    fn generator() -> CodeGenerator {
        CodeGenerator::new(GenerationOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_book_renders_nothing() {
        let model = generator().model_file(&LocatorBook::new(), &ClassNames::new("LoginModel")).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_model_file_contains_constant() {
        let mut book = LocatorBook::new();
        book.upsert(&ElementRecord::new("login button", "id", "loginBtn"));
        let model = generator().model_file(&book, &ClassNames::new("LoginModel")).unwrap();
        assert!(model.starts_with("package models;\n\nimport org.openqa.selenium.By;\n"));
        assert!(model.contains("public class LoginModel {"));
        assert!(model.contains(r#"    public static final By LOGIN_BUTTON = By.id("loginBtn");"#));
    }

    #[test]
    fn test_suite_feature_follows_trace() {
        let entries = vec![
            StepEntry::new("Login Page", "send keys", "USERNAME"),
            StepEntry::new("Login Page", "click", "LOGIN_BUTTON"),
        ];
        let suite = generator()
            .step_suite(&entries, &ClassNames::new("LoginModel"), OutputMode::Gherkin)
            .unwrap();
        assert!(suite.steps.contains("import io.cucumber.java.en.When;"));
        assert!(suite.page.contains("public class LoginPage {"));
        assert_eq!(
            suite.feature,
            "Feature: Login\n\n  Scenario: Login scenario\n    When I fill username on Login Page with \"<text>\"\n    And I click loginButton on Login Page\n"
        );
    }

    #[test]
    fn test_unset_mode_falls_back_to_configured_mode() {
        let options = GenerationOptions {
            output_mode: OutputMode::Grid,
            ..GenerationOptions::default()
        };
        let generator = CodeGenerator::new(options).unwrap();
        let entries = vec![StepEntry::new("Login Page", "click", "LOGIN_BUTTON")];
        let feature = generator
            .feature_file(&entries, &ClassNames::new("LoginModel"), OutputMode::Unset)
            .unwrap();
        assert!(feature.contains("When Login Page, Click, Login Button"));
    }

    #[test]
    fn test_nothing_qualifies() {
        let suite = generator()
            .step_suite(&[StepEntry::default()], &ClassNames::new("LoginModel"), OutputMode::Gherkin)
            .unwrap();
        assert!(suite.is_empty());
        assert!(suite.trace.is_empty());
    }

    #[test]
    fn test_page_needs_a_qualifying_step() {
        let suite = generator()
            .step_suite(&[StepEntry::new("", "click", "SUBMIT")], &ClassNames::new("LoginModel"), OutputMode::Gherkin)
            .unwrap();
        assert!(suite.steps.is_empty());
        assert!(suite.page.is_empty());
        assert!(suite.feature.is_empty());

        let page = generator()
            .page_file(&[StepEntry::new("", "click", "SUBMIT")], &ClassNames::new("LoginModel"))
            .unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_single_artifacts_match_suite() {
        let entries = vec![
            StepEntry::new("Cart Page", "click", "CHECKOUT"),
            StepEntry::new("Cart Page", "should see", "TOTAL"),
        ];
        let names = ClassNames::new("CartModel");
        let generator = generator();
        let suite = generator.step_suite(&entries, &names, OutputMode::Gherkin).unwrap();

        assert_eq!(generator.step_file(&entries, &names, OutputMode::Gherkin).unwrap(), suite.steps);
        assert_eq!(generator.page_file(&entries, &names).unwrap(), suite.page);
        assert_eq!(generator.feature_file(&entries, &names, OutputMode::Gherkin).unwrap(), suite.feature);
    }
}
