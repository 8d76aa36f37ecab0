use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{CsbError, CsbResult};
use crate::feature::FeatureDoc;
use crate::java::JavaClass;
use crate::naming;

const JAVA_CLASS_TEMPLATE: &str = include_str!("../templates/java_class.hbs");
const FEATURE_TEMPLATE: &str = include_str!("../templates/feature.hbs");

/// The four generated artifacts, each rendered from its own template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TemplateKind {
    Model,
    Steps,
    Page,
    Feature,
}

impl TemplateKind {
    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Model => "model",
            TemplateKind::Steps => "steps",
            TemplateKind::Page => "page",
            TemplateKind::Feature => "feature",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub name: String,
    pub description: String,
    pub content: String,
}

handlebars_helper!(pascal_helper: |s: str| naming::pascal(s));
handlebars_helper!(camel_helper: |s: str| naming::camel(s));
handlebars_helper!(constant_helper: |s: str| naming::constant_name(s));
handlebars_helper!(humanize_helper: |s: str| naming::humanize_words(s));

#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    template_dir: Option<PathBuf>,
    built_in_templates: HashMap<String, Template>,
}

impl TemplateEngine {
    pub fn new() -> CsbResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);

        Self::register_helpers(&mut handlebars);

        let built_in_templates = Self::create_built_in_templates();
        for template in built_in_templates.values() {
            handlebars
                .register_template_string(&template.name, &template.content)
                .map_err(|e| CsbError::TemplateRegister {
                    name: template.name.clone(),
                    source: Box::new(e),
                })?;
        }

        Ok(Self {
            handlebars,
            template_dir: None,
            built_in_templates,
        })
    }

    pub fn with_template_dir(template_dir: PathBuf) -> CsbResult<Self> {
        let mut engine = Self::new()?;
        engine.template_dir = Some(template_dir);
        Ok(engine)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        handlebars.register_helper("pascal", Box::new(pascal_helper));
        handlebars.register_helper("camel", Box::new(camel_helper));
        handlebars.register_helper("constant", Box::new(constant_helper));
        handlebars.register_helper("humanize", Box::new(humanize_helper));
    }

    fn create_built_in_templates() -> HashMap<String, Template> {
        let descriptions = [
            (TemplateKind::Model, "Locator constants class", JAVA_CLASS_TEMPLATE),
            (TemplateKind::Steps, "Cucumber step definitions class", JAVA_CLASS_TEMPLATE),
            (TemplateKind::Page, "Page object class", JAVA_CLASS_TEMPLATE),
            (TemplateKind::Feature, "Gherkin feature with one scenario", FEATURE_TEMPLATE),
        ];

        descriptions
            .into_iter()
            .map(|(kind, description, content)| {
                (
                    kind.name().to_string(),
                    Template {
                        name: kind.name().to_string(),
                        description: description.to_string(),
                        content: content.to_string(),
                    },
                )
            })
            .collect()
    }

    /// Register every `*.hbs` file of the template directory, overriding
    /// built-ins with the same file stem. Returns how many were loaded.
    pub async fn load_custom_templates(&mut self) -> CsbResult<usize> {
        let Some(template_dir) = self.template_dir.clone() else {
            return Ok(0);
        };
        if !template_dir.exists() {
            debug!(dir = %template_dir.display(), "template directory does not exist");
            return Ok(0);
        }

        let mut loaded = 0;
        let mut entries = fs::read_dir(&template_dir)
            .await
            .map_err(|e| CsbError::io(&template_dir, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CsbError::io(&template_dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("hbs") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };

            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| CsbError::io(&path, e))?;
            self.handlebars
                .register_template_string(&name, &content)
                .map_err(|e| CsbError::TemplateRegister {
                    name: name.clone(),
                    source: Box::new(e),
                })?;

            info!(template = %name, path = %path.display(), "custom template loaded");
            loaded += 1;
        }

        Ok(loaded)
    }

    pub fn get_template(&self, name: &str) -> Option<&Template> {
        self.built_in_templates.get(name)
    }

    pub fn list_templates(&self) -> Vec<String> {
        let mut names: Vec<String> = self.built_in_templates.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn render(&self, kind: TemplateKind, data: &serde_json::Value) -> CsbResult<String> {
        self.handlebars
            .render(kind.name(), data)
            .map_err(|e| CsbError::TemplateRender {
                name: kind.name().to_string(),
                source: Box::new(e),
            })
    }

    pub fn render_java(&self, kind: TemplateKind, class: &JavaClass) -> CsbResult<String> {
        let data = json!({
            "preamble": class.preamble(),
            "package": class.package,
            "imports": class.imports,
            "class_name": class.name,
            "body": class.body(),
            "class": class,
        });
        self.render(kind, &data)
    }

    pub fn render_feature(&self, doc: &FeatureDoc) -> CsbResult<String> {
        let data = json!({
            "feature_name": doc.feature_name,
            "scenario_name": doc.scenario_name,
            "steps": doc.steps_block(),
            "lines": doc.lines,
        });
        self.render(TemplateKind::Feature, &data)
    }
}

/// Seed a template directory with the built-in templates and a README.
/// Existing files are left untouched.
pub async fn create_template_directory(path: &Path) -> CsbResult<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| CsbError::io(path, e))?;

    let files = [
        ("model.hbs", JAVA_CLASS_TEMPLATE),
        ("steps.hbs", JAVA_CLASS_TEMPLATE),
        ("page.hbs", JAVA_CLASS_TEMPLATE),
        ("feature.hbs", FEATURE_TEMPLATE),
        ("README.md", TEMPLATE_README),
    ];

    for (filename, content) in files {
        let file_path = path.join(filename);
        if !file_path.exists() {
            fs::write(&file_path, content)
                .await
                .map_err(|e| CsbError::io(&file_path, e))?;
        }
    }

    Ok(())
}

const TEMPLATE_README: &str = r#"# CSB Custom Templates

Handlebars templates that lay out the generated files. A file named after an
artifact (`model.hbs`, `steps.hbs`, `page.hbs`, `feature.hbs`) replaces the
built-in template for that artifact.

## Java templates (model, steps, page)

- `{{preamble}}` - package declaration and imports, already formatted
- `{{class_name}}` - class name
- `{{body}}` - fields, constructor and methods, already indented
- `{{package}}`, `{{imports}}` - raw values, for custom layouts
- `{{class}}` - the full class structure (fields, constructor, methods)

## Feature template

- `{{feature_name}}`, `{{scenario_name}}`
- `{{steps}}` - indented scenario lines
- `{{lines}}` - the same lines as an array

## Helpers

- `{{pascal text}}`, `{{camel text}}`
- `{{constant text}}` - upper snake case constant name
- `{{humanize text}}` - Title Case words
"#;
