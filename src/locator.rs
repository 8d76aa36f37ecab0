//! Selenium `By` constants built from element records.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::java::{JavaClass, JavaField};
use crate::model::ElementRecord;
use crate::naming::{constant_name, java_string};

/// Locator strategy. Anything unrecognised is kept as [`LocatorType::Unknown`]
/// and rendered as a placeholder instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorType {
    Id,
    Css,
    XPath,
    Name,
    ClassName,
    TagName,
    LinkText,
    PartialLinkText,
    Unknown(String),
}

impl LocatorType {
    pub const KNOWN: [&'static str; 8] = [
        "id",
        "css",
        "xpath",
        "name",
        "class",
        "tag",
        "linkText",
        "partialLinkText",
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "id" => LocatorType::Id,
            "css" => LocatorType::Css,
            "xpath" => LocatorType::XPath,
            "name" => LocatorType::Name,
            "class" | "className" => LocatorType::ClassName,
            "tag" | "tagName" => LocatorType::TagName,
            "linkText" => LocatorType::LinkText,
            "partialLinkText" => LocatorType::PartialLinkText,
            other => LocatorType::Unknown(other.to_string()),
        }
    }

    fn by_method(&self) -> Option<&'static str> {
        match self {
            LocatorType::Id => Some("id"),
            LocatorType::Css => Some("cssSelector"),
            LocatorType::XPath => Some("xpath"),
            LocatorType::Name => Some("name"),
            LocatorType::ClassName => Some("className"),
            LocatorType::TagName => Some("tagName"),
            LocatorType::LinkText => Some("linkText"),
            LocatorType::PartialLinkText => Some("partialLinkText"),
            LocatorType::Unknown(_) => None,
        }
    }

    /// Java expression locating `selector` with this strategy.
    pub fn expression(&self, selector: &str) -> String {
        match self.by_method() {
            Some(method) => format!("By.{method}(\"{}\")", java_string(selector)),
            None => format!(
                "/* unsupported locator type: {} */ null",
                self.to_string().replace("*/", "* /")
            ),
        }
    }
}

impl fmt::Display for LocatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorType::Id => write!(f, "id"),
            LocatorType::Css => write!(f, "css"),
            LocatorType::XPath => write!(f, "xpath"),
            LocatorType::Name => write!(f, "name"),
            LocatorType::ClassName => write!(f, "class"),
            LocatorType::TagName => write!(f, "tag"),
            LocatorType::LinkText => write!(f, "linkText"),
            LocatorType::PartialLinkText => write!(f, "partialLinkText"),
            LocatorType::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// `public static final By <CONST> = <expr>;` for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorDeclaration {
    pub constant: String,
    pub locator: LocatorType,
    pub expression: String,
}

impl LocatorDeclaration {
    /// `None` unless alias, strategy and selector are all filled in.
    pub fn from_element(element: &ElementRecord) -> Option<Self> {
        if !element.is_locatable() {
            return None;
        }
        let locator = LocatorType::parse(&element.by);
        Some(Self {
            constant: constant_name(&element.alias),
            expression: locator.expression(&element.selector),
            locator,
        })
    }

    pub fn field(&self) -> JavaField {
        constant_field(&self.constant, &self.expression)
    }

    pub fn line(&self) -> String {
        self.field().declaration()
    }
}

/// One compiled constant declaration, keyed by the owning element's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCodeEntry {
    pub id: String,
    pub code: String,
    pub alias: String,
    #[serde(default)]
    pub constant: String,
    #[serde(default)]
    pub expression: String,
}

impl GeneratedCodeEntry {
    pub fn field(&self) -> JavaField {
        constant_field(&self.constant, &self.expression)
    }
}

fn constant_field(constant: &str, expression: &str) -> JavaField {
    JavaField::new("By", constant)
        .with_modifiers(&["public", "static", "final"])
        .with_initializer(expression)
}

/// Ordered constant declarations of the model class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorBook {
    entries: Vec<GeneratedCodeEntry>,
}

impl LocatorBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the declaration for `element`. An existing entry for the same
    /// id is replaced where it stands. Returns `false` for incomplete elements.
    pub fn upsert(&mut self, element: &ElementRecord) -> bool {
        let Some(declaration) = LocatorDeclaration::from_element(element) else {
            debug!(id = %element.id, "element is missing alias, locator type or selector");
            return false;
        };

        let entry = GeneratedCodeEntry {
            id: element.id.clone(),
            code: declaration.line(),
            alias: element.alias.clone(),
            constant: declaration.constant,
            expression: declaration.expression,
        };

        match self.entries.iter_mut().find(|e| e.id == element.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: &str) -> Option<&GeneratedCodeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[GeneratedCodeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The model class: `import org.openqa.selenium.By;` and one constant per
    /// entry, in entry order. `None` for an empty book.
    pub fn model_class(&self, class_name: &str, package: &str) -> Option<JavaClass> {
        if self.entries.is_empty() {
            return None;
        }
        let mut class = JavaClass::new(class_name);
        let package = package.trim();
        if !package.is_empty() {
            class.package = Some(package.to_string());
        }
        class.imports.push("org.openqa.selenium.By".to_string());
        class.fields = self.entries.iter().map(GeneratedCodeEntry::field).collect();
        Some(class)
    }

    /// Constant names declared more than once, in first-seen order.
    pub fn duplicate_constants(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for entry in &self.entries {
            let constant = constant_name(&entry.alias);
            if !seen.insert(constant.clone()) && !duplicates.contains(&constant) {
                duplicates.push(constant);
            }
        }
        duplicates
    }
}
