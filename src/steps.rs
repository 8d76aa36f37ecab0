//! Step-definition class generation.

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::action::{Action, StepKeyword};
use crate::class_names::ClassNames;
use crate::config::GenerationOptions;
use crate::java::{JavaClass, JavaConstructor, JavaField, JavaMethod, Param, Statement};
use crate::model::{OutputMode, StepEntry};
use crate::naming::{alias_pascal, camel, constant_name, friendly, humanize_words, method_identifier, pascal};

/// Placeholder appended to steps that take a text argument.
pub const TEXT_PLACEHOLDER: &str = "\"<text>\"";

/// Keyword and annotation text of one generated step, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    pub keyword: StepKeyword,
    pub text: String,
}

/// The step class together with the annotation trace the feature file is
/// folded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepClassPlan {
    pub class: JavaClass,
    pub trace: Vec<TraceEntry>,
}

/// Entries with a page name, an action and an element.
pub fn qualifying(entries: &[StepEntry]) -> Vec<&StepEntry> {
    entries.iter().filter(|e| e.is_complete()).collect()
}

/// Inner text of the step annotation.
pub fn annotation_text(entry: &StepEntry, mode: OutputMode) -> String {
    let action = Action::parse(&entry.action);
    let presented = action.presented();
    let page = entry.page_name.trim();
    let element = entry.element.trim();

    if mode.is_grid() {
        let mut text = format!(
            "{}, {}, {}",
            humanize_words(page),
            humanize_words(&action.effective_text(&entry.action)),
            humanize_words(element)
        );
        if presented.requires_param() {
            text.push_str(", ");
            text.push_str(TEXT_PLACEHOLDER);
        }
        return text;
    }

    let element = friendly(element);
    match presented {
        Action::Click => format!("I click {element} on {page}"),
        Action::SendKeys => format!("I fill {element} on {page} with {TEXT_PLACEHOLDER}"),
        Action::Check | Action::ShouldSee => format!("I should see {element} on {page}"),
        Action::CheckText => format!("I should see text of {element} on {page}"),
        Action::Save => format!("I save {element} on {page}"),
        _ => format!("I {} {element} on {page}", entry.action.trim()),
    }
}

/// Keyword and annotation text for every qualifying entry.
pub fn trace_for(entries: &[StepEntry], mode: OutputMode) -> Vec<TraceEntry> {
    qualifying(entries)
        .into_iter()
        .map(|entry| TraceEntry {
            keyword: Action::parse(&entry.action).keyword(),
            text: annotation_text(entry, mode),
        })
        .collect()
}

/// `loginPageClickLoginButton` for (`Login Page`, `click`, `LOGIN_BUTTON`).
pub fn step_method_name(entry: &StepEntry, action: &Action) -> String {
    let joined = format!(
        "{}{}{}",
        pascal(entry.page_name.trim()),
        pascal(&action.effective_text(&entry.action)),
        alias_pascal(entry.element.trim())
    );
    method_identifier(&camel(&joined), "step")
}

/// `clickLoginButton`: the page-object method a step delegates to.
pub fn page_method_name(action: &Action, element: &str) -> String {
    method_identifier(
        &format!("{}{}", action.key(), alias_pascal(element.trim())),
        "perform",
    )
}

/// Build the step class, or `None` when no entry qualifies.
///
/// Entries that would produce an already emitted method name are skipped in
/// the class but still appear in the trace.
pub fn build_step_class(
    entries: &[StepEntry],
    names: &ClassNames,
    mode: OutputMode,
    options: &GenerationOptions,
) -> Option<StepClassPlan> {
    let complete = qualifying(entries);
    if complete.is_empty() {
        return None;
    }

    let page_class = names.page();
    let page_var = names.page_variable();

    let mut class = JavaClass::new(names.steps());
    class.package = options.steps_package.clone();
    class.fields.push(JavaField::new(page_class, &page_var));
    class.constructor = Some(JavaConstructor {
        params: Vec::new(),
        body: vec![Statement::expr(format!(
            "{page_var} = new {page_class}({})",
            options.driver_factory
        ))],
    });

    let mut trace = Vec::with_capacity(complete.len());
    for entry in complete {
        let action = Action::parse(&entry.action);
        let keyword = action.keyword();
        let text = annotation_text(entry, mode);
        trace.push(TraceEntry {
            keyword,
            text: text.clone(),
        });

        let name = step_method_name(entry, &action);
        if class.has_method(&name) {
            debug!(method = %name, "duplicate step method skipped");
            continue;
        }

        let mut method = JavaMethod::new(&name).annotated(keyword, &text);
        match action {
            Action::GetSaved => {
                method = method
                    .statement(Statement::expr(format!(
                        "String value = {}.get(\"{}\")",
                        options.context_class,
                        constant_name(&entry.element)
                    )))
                    .statement(Statement::expr(format!(
                        "{page_var}.{}(value)",
                        page_method_name(&Action::SendKeys, &entry.element)
                    )));
            }
            _ => {
                let args = if action.requires_param() {
                    method = method.param(Param::text());
                    "text"
                } else {
                    ""
                };
                method = method.statement(Statement::expr(format!(
                    "{page_var}.{}({args})",
                    page_method_name(&action, &entry.element)
                )));
            }
        }
        class.methods.push(method);
    }

    if options.emit_imports {
        class.imports = cucumber_imports(&class);
    }

    debug!(class = %class.name, methods = class.methods.len(), "step class built");
    Some(StepClassPlan { class, trace })
}

fn cucumber_imports(class: &JavaClass) -> Vec<String> {
    [StepKeyword::Given, StepKeyword::When, StepKeyword::Then]
        .into_iter()
        .filter(|keyword| {
            class
                .methods
                .iter()
                .any(|m| m.annotation.as_ref().is_some_and(|a| a.keyword == *keyword))
        })
        .map(|keyword| format!("io.cucumber.java.en.{keyword}"))
        .collect()
}

/// Rename an already generated class in place: the class header and its
/// constructor change, method bodies are left alone.
pub fn rename_class(code: &str, new_name: &str) -> String {
    let new_name = new_name.trim();
    if code.is_empty() || new_name.is_empty() {
        return code.to_string();
    }

    let header = Regex::new(r"public class\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{").unwrap();
    let Some(old_name) = header
        .captures(code)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
    else {
        return code.to_string();
    };

    let renamed = header.replace(code, format!("public class {new_name} {{").as_str());
    if old_name == new_name {
        return renamed.into_owned();
    }

    let constructor = Regex::new(&format!(r"public {}\s*\(", regex::escape(&old_name))).unwrap();
    constructor
        .replace(&renamed, format!("public {new_name}(").as_str())
        .into_owned()
}

/// Point an already generated step class at a renamed page class: the page
/// field, its construction and every delegating call.
pub fn retarget_page(code: &str, old_page: &str, new_page: &str) -> String {
    if code.is_empty() || old_page == new_page || new_page.trim().is_empty() {
        return code.to_string();
    }

    let old_var = regex::escape(&old_page.to_lowercase());
    let new_var = new_page.to_lowercase();
    let old_page = regex::escape(old_page);

    let field = Regex::new(&format!(r"(?m)^(\s*){old_page} {old_var};$")).unwrap();
    let code = field.replace(code, format!("${{1}}{new_page} {new_var};").as_str());

    let construction = Regex::new(&format!(r"\b{old_var} = new {old_page}\(")).unwrap();
    let code = construction.replace(&code, format!("{new_var} = new {new_page}(").as_str());

    let calls = Regex::new(&format!(r"\b{old_var}\.")).unwrap();
    calls
        .replace_all(&code, format!("{new_var}.").as_str())
        .into_owned()
}
