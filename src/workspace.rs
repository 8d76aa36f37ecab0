//! Mutable form state and the artifacts generated from it.
//!
//! The generators are pure; `Workspace` owns the records, the class names and
//! the output mode, and re-runs generation after each change that affects
//! already generated text.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::class_names::ClassNames;
use crate::error::{CsbError, CsbResult};
use crate::feature::preview;
use crate::generator::CodeGenerator;
use crate::locator::LocatorBook;
use crate::model::{ElementPatch, ElementRecord, OutputMode, StepEntry, StepPatch};
use crate::steps::{qualifying, rename_class, retarget_page, TraceEntry};

const COPY_SUFFIX: &str = "_COPY";

/// The four generated texts. An empty string means nothing to show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Artifacts {
    pub model: String,
    pub steps: String,
    pub page: String,
    pub feature: String,
}

impl Artifacts {
    pub fn is_empty(&self) -> bool {
        self.model.is_empty() && self.steps.is_empty() && self.page.is_empty() && self.feature.is_empty()
    }
}

pub struct Workspace {
    generator: CodeGenerator,
    elements: Vec<ElementRecord>,
    book: LocatorBook,
    steps: Vec<StepEntry>,
    names: ClassNames,
    mode: OutputMode,
    artifacts: Artifacts,
    trace: Vec<TraceEntry>,
}

impl Workspace {
    pub fn new(generator: CodeGenerator) -> Self {
        Self {
            generator,
            elements: Vec::new(),
            book: LocatorBook::new(),
            steps: Vec::new(),
            names: ClassNames::default(),
            mode: OutputMode::Unset,
            artifacts: Artifacts::default(),
            trace: Vec::new(),
        }
    }

    // Elements

    pub fn add_element(&mut self, element: ElementRecord) -> String {
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    pub fn update_element(&mut self, id: &str, patch: ElementPatch) -> CsbResult<()> {
        let element = self.element_mut(id)?;
        patch.apply(element);
        Ok(())
    }

    /// Remove an element together with its generated constant.
    pub fn remove_element(&mut self, id: &str) -> CsbResult<ElementRecord> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CsbError::UnknownElement(id.to_string()))?;
        let removed = self.elements.remove(index);

        if self.book.remove(id) {
            self.refresh_model()?;
        }
        Ok(removed)
    }

    /// Insert a copy right after the original with a fresh id and `_COPY`
    /// appended to the alias. Returns the new id.
    pub fn duplicate_element(&mut self, id: &str) -> CsbResult<String> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CsbError::UnknownElement(id.to_string()))?;

        let original = &self.elements[index];
        let mut copy = ElementRecord::new(&original.alias, &original.by, &original.selector)
            .with_action(&original.action);
        if !copy.alias.trim().is_empty() {
            copy.alias.push_str(COPY_SUFFIX);
        }

        let new_id = copy.id.clone();
        self.elements.insert(index + 1, copy);
        Ok(new_id)
    }

    /// Generate (or regenerate in place) the constant of one element.
    /// Returns `false` when the element lacks an alias, strategy or selector.
    pub fn generate_locator(&mut self, id: &str) -> CsbResult<bool> {
        let element = self
            .elements
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| CsbError::UnknownElement(id.to_string()))?;

        if !self.book.upsert(element) {
            return Ok(false);
        }
        self.refresh_model()?;
        Ok(true)
    }

    /// Generate every locatable element, in element order. Returns how many
    /// constants were written.
    pub fn generate_all_locators(&mut self) -> CsbResult<usize> {
        let mut generated = 0;
        for element in &self.elements {
            if self.book.upsert(element) {
                generated += 1;
            } else {
                warn!(id = %element.id, alias = %element.alias, "element skipped: alias, locator type and selector are required");
            }
        }
        self.refresh_model()?;
        Ok(generated)
    }

    pub fn clear_model(&mut self) {
        self.book.clear();
        self.artifacts.model.clear();
    }

    fn refresh_model(&mut self) -> CsbResult<()> {
        match self.generator.model_file(&self.book, &self.names) {
            Ok(model) => {
                self.artifacts.model = model;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "model generation failed; keeping previous output");
                Err(e)
            }
        }
    }

    fn element_mut(&mut self, id: &str) -> CsbResult<&mut ElementRecord> {
        self.elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CsbError::UnknownElement(id.to_string()))
    }

    // Steps

    pub fn add_step(&mut self, step: StepEntry) -> String {
        let id = step.id.clone();
        self.steps.push(step);
        id
    }

    pub fn update_step(&mut self, id: &str, patch: StepPatch) -> CsbResult<()> {
        let step = self
            .steps
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CsbError::UnknownStep(id.to_string()))?;
        patch.apply(step);
        Ok(())
    }

    pub fn remove_step(&mut self, id: &str) -> CsbResult<StepEntry> {
        let index = self
            .steps
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CsbError::UnknownStep(id.to_string()))?;
        Ok(self.steps.remove(index))
    }

    /// Replace the step list with one entry per element that has both an
    /// alias and an action, all on `page_name`. Returns the number of steps.
    pub fn derive_steps_from_elements(&mut self, page_name: &str) -> usize {
        self.steps = self
            .elements
            .iter()
            .filter(|e| !e.alias.trim().is_empty() && !e.action.trim().is_empty())
            .map(|e| StepEntry::new(page_name, &e.action, &e.alias))
            .collect();
        debug!(count = self.steps.len(), page = %page_name, "steps derived from elements");
        self.steps.len()
    }

    // Names and mode

    /// Rename the model class. The step and page names follow, and any
    /// already generated output is regenerated under the new names.
    pub fn set_model_class(&mut self, name: &str) -> CsbResult<()> {
        self.names.set_model_class(name);
        self.refresh_model()?;
        if !self.artifacts.steps.is_empty() || !self.artifacts.page.is_empty() {
            self.generate_steps()?;
        }
        Ok(())
    }

    /// Override the step class name and patch the generated step and page
    /// classes in place; method bodies are not regenerated.
    pub fn set_step_class(&mut self, name: &str) {
        let old_steps = self.names.steps().to_string();
        let old_page = self.names.page().to_string();
        self.names.set_steps_class(name);

        if old_steps != self.names.steps() {
            self.artifacts.steps = rename_class(&self.artifacts.steps, self.names.steps());
        }
        if old_page != self.names.page() {
            self.artifacts.steps = retarget_page(&self.artifacts.steps, &old_page, self.names.page());
            self.artifacts.page = rename_class(&self.artifacts.page, self.names.page());
        }
        debug!(steps = %self.names.steps(), page = %self.names.page(), "step class renamed");
    }

    /// Switch the output mode; qualifying steps are regenerated in the new
    /// mode.
    pub fn set_output_mode(&mut self, mode: OutputMode) -> CsbResult<()> {
        if self.mode == mode {
            return Ok(());
        }
        self.mode = mode;
        if !qualifying(&self.steps).is_empty() {
            self.generate_steps()?;
        }
        Ok(())
    }

    // Generation

    /// Generate the step class, page class and feature file from the current
    /// step list. All three are replaced together; on error the previous
    /// outputs stay as they were.
    pub fn generate_steps(&mut self) -> CsbResult<&Artifacts> {
        let suite = match self.generator.step_suite(&self.steps, &self.names, self.mode) {
            Ok(suite) => suite,
            Err(e) => {
                warn!(error = %e, "step generation failed; keeping previous output");
                return Err(e);
            }
        };

        if suite.is_empty() {
            info!("no step entry has a page name, action and element");
        }
        self.artifacts.steps = suite.steps;
        self.artifacts.page = suite.page;
        self.artifacts.feature = suite.feature;
        self.trace = suite.trace;
        Ok(&self.artifacts)
    }

    /// Clear the step class and the feature derived from it.
    pub fn clear_steps(&mut self) {
        self.artifacts.steps.clear();
        self.artifacts.feature.clear();
        self.trace.clear();
    }

    pub fn clear_page(&mut self) {
        self.artifacts.page.clear();
    }

    /// Back to an empty form: no records, default names, no output mode.
    pub fn reset(&mut self) {
        self.elements.clear();
        self.book.clear();
        self.steps.clear();
        self.names = ClassNames::default();
        self.mode = OutputMode::Unset;
        self.artifacts = Artifacts::default();
        self.trace.clear();
    }

    // Accessors

    pub fn elements(&self) -> &[ElementRecord] {
        &self.elements
    }

    pub fn element(&self, id: &str) -> Option<&ElementRecord> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn locator_book(&self) -> &LocatorBook {
        &self.book
    }

    pub fn steps(&self) -> &[StepEntry] {
        &self.steps
    }

    pub fn names(&self) -> &ClassNames {
        &self.names
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn generator(&self) -> &CodeGenerator {
        &self.generator
    }

    /// Live preview of the step list in the current mode.
    pub fn preview(&self) -> String {
        preview(&self.steps, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationOptions;

    fn workspace() -> Workspace {
        let options = GenerationOptions {
            emit_imports: false,
            ..GenerationOptions::default()
        };
        Workspace::new(CodeGenerator::new(options).unwrap())
    }

    #[test]
    fn test_generate_and_remove_locator() {
        let mut ws = workspace();
        ws.set_model_class("LoginModel").unwrap();
        let id = ws.add_element(ElementRecord::new("login button", "id", "loginBtn"));

        assert!(ws.generate_locator(&id).unwrap());
        assert!(ws
            .artifacts()
            .model
            .contains(r#"public static final By LOGIN_BUTTON = By.id("loginBtn");"#));

        ws.remove_element(&id).unwrap();
        assert!(ws.locator_book().is_empty());
        assert!(ws.artifacts().model.is_empty());
    }

    #[test]
    fn test_incomplete_element_is_not_generated() {
        let mut ws = workspace();
        let id = ws.add_element(ElementRecord::new("login button", "", "loginBtn"));
        assert!(!ws.generate_locator(&id).unwrap());
        assert!(ws.artifacts().model.is_empty());
        assert!(matches!(ws.generate_locator("missing"), Err(CsbError::UnknownElement(_))));
    }

    #[test]
    fn test_duplicate_element_appends_copy() {
        let mut ws = workspace();
        let first = ws.add_element(ElementRecord::new("search", "css", ".q").with_action("click"));
        let last = ws.add_element(ElementRecord::new("submit", "id", "go"));

        let copy_id = ws.duplicate_element(&first).unwrap();
        assert_ne!(copy_id, first);
        let aliases: Vec<_> = ws.elements().iter().map(|e| e.alias.as_str()).collect();
        assert_eq!(aliases, vec!["search", "search_COPY", "submit"]);
        assert_eq!(ws.element(&copy_id).unwrap().action, "click");
        assert_eq!(ws.elements()[2].id, last);
    }

    #[test]
    fn test_derive_steps_uses_one_page_name() {
        let mut ws = workspace();
        ws.add_element(ElementRecord::new("user name", "id", "u").with_action("send keys"));
        ws.add_element(ElementRecord::new("no action", "id", "x"));
        ws.add_element(ElementRecord::new("login button", "id", "b").with_action("click"));

        assert_eq!(ws.derive_steps_from_elements("Login Page"), 2);
        assert!(ws.steps().iter().all(|s| s.page_name == "Login Page"));
        assert_eq!(ws.steps()[1].element, "login button");
    }

    #[test]
    fn test_step_class_rename_is_patched_in_place() {
        let mut ws = workspace();
        ws.set_model_class("LoginModel").unwrap();
        ws.set_output_mode(OutputMode::Gherkin).unwrap();
        ws.add_step(StepEntry::new("Login Page", "click", "LOGIN_BUTTON"));
        ws.generate_steps().unwrap();

        ws.set_step_class("AuthSteps");
        let artifacts = ws.artifacts();
        assert!(artifacts.steps.starts_with("public class AuthSteps {"));
        assert!(artifacts.steps.contains("    AuthPage authpage;"));
        assert!(artifacts.steps.contains("authpage = new AuthPage(DriverFactory.getDriver());"));
        assert!(artifacts.steps.contains("authpage.clickLoginButton();"));
        assert!(artifacts.page.starts_with("public class AuthPage {"));
        assert!(artifacts.page.contains("public AuthPage(WebDriver driver) {"));
    }

    #[test]
    fn test_mode_change_regenerates() {
        let mut ws = workspace();
        ws.set_model_class("LoginModel").unwrap();
        ws.set_output_mode(OutputMode::Gherkin).unwrap();
        ws.add_step(StepEntry::new("Login Page", "click", "LOGIN_BUTTON"));
        ws.generate_steps().unwrap();
        assert!(ws.artifacts().steps.contains("@When(\"I click loginButton on Login Page\")"));

        ws.set_output_mode(OutputMode::Grid).unwrap();
        assert!(ws.artifacts().steps.contains("@When(\"Login Page, Click, Login Button\")"));
        assert!(ws.artifacts().feature.contains("When Login Page, Click, Login Button"));
    }

    #[test]
    fn test_model_rename_regenerates_generated_steps() {
        let mut ws = workspace();
        ws.set_output_mode(OutputMode::Gherkin).unwrap();
        ws.add_step(StepEntry::new("Login Page", "click", "LOGIN_BUTTON"));
        ws.generate_steps().unwrap();
        assert!(ws.artifacts().steps.starts_with("public class GeneratedSteps {"));

        ws.set_model_class("CartModel").unwrap();
        assert!(ws.artifacts().steps.starts_with("public class CartSteps {"));
        assert!(ws.artifacts().page.contains("helper.click(CartModel.LOGIN_BUTTON);"));
        assert!(ws.artifacts().feature.starts_with("Feature: Cart\n"));
    }

    #[test]
    fn test_generation_without_qualifying_steps_clears_output() {
        let mut ws = workspace();
        ws.set_output_mode(OutputMode::Gherkin).unwrap();
        let id = ws.add_step(StepEntry::new("Login Page", "click", "LOGIN_BUTTON"));
        ws.generate_steps().unwrap();
        assert!(!ws.artifacts().steps.is_empty());

        ws.update_step(
            &id,
            StepPatch {
                page_name: Some(String::new()),
                ..StepPatch::default()
            },
        )
        .unwrap();
        ws.generate_steps().unwrap();
        assert!(ws.artifacts().steps.is_empty());
        assert!(ws.artifacts().feature.is_empty());
        assert!(ws.artifacts().page.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut ws = workspace();
        ws.set_model_class("LoginModel").unwrap();
        let id = ws.add_element(ElementRecord::new("a", "id", "a"));
        ws.generate_locator(&id).unwrap();
        ws.set_output_mode(OutputMode::Grid).unwrap();

        ws.reset();
        assert!(ws.elements().is_empty());
        assert!(ws.artifacts().is_empty());
        assert_eq!(ws.mode(), OutputMode::Unset);
        assert_eq!(ws.names().model(), "GeneratedModel");
    }
}
