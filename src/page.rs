//! Page-object class generation.

use tracing::debug;

use crate::action::Action;
use crate::class_names::ClassNames;
use crate::config::GenerationOptions;
use crate::java::{JavaClass, JavaConstructor, JavaField, JavaMethod, Param, Statement};
use crate::model::StepEntry;
use crate::naming::constant_name;
use crate::steps::page_method_name;

const HELPER_FIELD: &str = "helper";

/// Build the page class, or `None` when no entry has an action and element.
///
/// Methods are deduplicated by name and the first occurrence wins. A
/// `get saved` entry also brings the `sendKeys<Element>` method its step
/// delegates to.
pub fn build_page_class(
    entries: &[StepEntry],
    names: &ClassNames,
    options: &GenerationOptions,
) -> Option<JavaClass> {
    let mut class = JavaClass::new(names.page());

    for entry in entries.iter().filter(|e| e.has_action_and_element()) {
        let action = Action::parse(&entry.action);
        push_unique(&mut class, page_method(&action, &entry.element, names.model(), options));
        if action == Action::GetSaved {
            push_unique(
                &mut class,
                page_method(&Action::SendKeys, &entry.element, names.model(), options),
            );
        }
    }

    if class.methods.is_empty() {
        return None;
    }

    class.package = options.pages_package.clone();
    if options.emit_imports {
        class.imports.push("org.openqa.selenium.WebDriver".to_string());
        let model_package = options.model_package.trim();
        let same_package = options.pages_package.as_deref().map(str::trim) == Some(model_package);
        if !model_package.is_empty() && !same_package {
            class.imports.push(format!("{model_package}.{}", names.model()));
        }
    }

    class.fields.push(
        JavaField::new(&options.helper_class, HELPER_FIELD).with_modifiers(&["private", "final"]),
    );
    class.constructor = Some(JavaConstructor {
        params: vec![Param::new("WebDriver", "driver")],
        body: vec![Statement::expr(format!(
            "this.{HELPER_FIELD} = new {}(driver)",
            options.helper_class
        ))],
    });

    debug!(class = %class.name, methods = class.methods.len(), "page class built");
    Some(class)
}

fn push_unique(class: &mut JavaClass, method: JavaMethod) {
    if class.has_method(&method.name) {
        debug!(method = %method.name, "duplicate page method dropped");
        return;
    }
    class.methods.push(method);
}

fn page_method(action: &Action, element: &str, model_class: &str, options: &GenerationOptions) -> JavaMethod {
    let constant = constant_name(element);
    let locator = format!("{model_class}.{constant}");
    let context = &options.context_class;

    let mut method = JavaMethod::new(&page_method_name(action, element));
    if action.requires_param() {
        method = method.param(Param::text());
    }

    match action {
        Action::Click => method.statement(Statement::expr(format!("{HELPER_FIELD}.click({locator})"))),
        Action::SendKeys => {
            method.statement(Statement::expr(format!("{HELPER_FIELD}.sendKeys({locator}, text)")))
        }
        Action::Check | Action::CheckText => {
            method.statement(Statement::expr(format!("{HELPER_FIELD}.checkText({locator}, text)")))
        }
        Action::ShouldSee => {
            method.statement(Statement::expr(format!("{HELPER_FIELD}.findElement({locator})")))
        }
        Action::SetSaved => method
            .statement(Statement::expr(format!(
                "String value = {HELPER_FIELD}.findElement({locator}).getText()"
            )))
            .statement(Statement::expr(format!("{context}.set(\"{constant}\", value)"))),
        Action::GetSaved => method
            .statement(Statement::expr(format!("String value = {context}.get(\"{constant}\")")))
            .statement(Statement::expr(format!("{HELPER_FIELD}.sendKeys({locator}, value)"))),
        Action::Save => method.statement(Statement::expr(format!("{HELPER_FIELD}.save({locator})"))),
        Action::Custom(text) => method.statement(Statement::comment(&format!("TODO: implement {text}"))),
    }
}
