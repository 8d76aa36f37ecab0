//! A small typed model of the Java classes we emit.
//!
//! Generators build these values instead of concatenating source text; the
//! formatter owns indentation and braces, so every rendered class balances.

use serde::Serialize;

use crate::action::StepKeyword;
use crate::naming::java_string;

const MEMBER_INDENT: &str = "    ";
const STATEMENT_INDENT: &str = "        ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

impl Param {
    pub fn new(ty: &str, name: &str) -> Self {
        Self {
            ty: ty.to_string(),
            name: name.to_string(),
        }
    }

    pub fn text() -> Self {
        Self::new("String", "text")
    }
}

/// One line of a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    /// Rendered with a trailing `;`.
    Expr(String),
    /// Rendered as a `//` line comment.
    Comment(String),
}

impl Statement {
    pub fn expr(code: impl Into<String>) -> Self {
        Statement::Expr(code.into())
    }

    pub fn comment(text: &str) -> Self {
        Statement::Comment(text.replace(['\n', '\r'], " "))
    }

    fn render(&self) -> String {
        match self {
            Statement::Expr(code) => format!("{STATEMENT_INDENT}{code};"),
            Statement::Comment(text) => format!("{STATEMENT_INDENT}// {text}"),
        }
    }
}

/// A Cucumber annotation such as `@When("I click x on y")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepAnnotation {
    pub keyword: StepKeyword,
    pub text: String,
}

impl StepAnnotation {
    fn render(&self) -> String {
        format!("{MEMBER_INDENT}@{}(\"{}\")", self.keyword, java_string(&self.text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaField {
    pub modifiers: Vec<String>,
    pub ty: String,
    pub name: String,
    pub initializer: Option<String>,
}

impl JavaField {
    pub fn new(ty: &str, name: &str) -> Self {
        Self {
            modifiers: Vec::new(),
            ty: ty.to_string(),
            name: name.to_string(),
            initializer: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    /// The declaration without indentation, e.g. `private final Helper helper;`.
    pub fn declaration(&self) -> String {
        let mut line = String::new();
        for modifier in &self.modifiers {
            line.push_str(modifier);
            line.push(' ');
        }
        line.push_str(&self.ty);
        line.push(' ');
        line.push_str(&self.name);
        if let Some(initializer) = &self.initializer {
            line.push_str(" = ");
            line.push_str(initializer);
        }
        line.push(';');
        line
    }

    fn render(&self) -> String {
        format!("{MEMBER_INDENT}{}", self.declaration())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaConstructor {
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaMethod {
    pub annotation: Option<StepAnnotation>,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
}

impl JavaMethod {
    pub fn new(name: &str) -> Self {
        Self {
            annotation: None,
            name: name.to_string(),
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn annotated(mut self, keyword: StepKeyword, text: &str) -> Self {
        self.annotation = Some(StepAnnotation {
            keyword,
            text: text.to_string(),
        });
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.body.push(statement);
        self
    }

    fn render(&self) -> String {
        let mut lines = Vec::new();
        if let Some(annotation) = &self.annotation {
            lines.push(annotation.render());
        }
        lines.push(format!(
            "{MEMBER_INDENT}public void {}({}) {{",
            self.name,
            render_params(&self.params)
        ));
        lines.extend(self.body.iter().map(Statement::render));
        lines.push(format!("{MEMBER_INDENT}}}"));
        lines.join("\n")
    }
}

/// A whole top-level class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaClass {
    pub package: Option<String>,
    pub imports: Vec<String>,
    pub name: String,
    pub fields: Vec<JavaField>,
    pub constructor: Option<JavaConstructor>,
    pub methods: Vec<JavaMethod>,
}

impl JavaClass {
    pub fn new(name: &str) -> Self {
        Self {
            package: None,
            imports: Vec::new(),
            name: name.to_string(),
            fields: Vec::new(),
            constructor: None,
            methods: Vec::new(),
        }
    }

    /// Package declaration and imports, each block followed by a blank line.
    pub fn preamble(&self) -> String {
        let mut out = String::new();
        if let Some(package) = self.package.as_deref().filter(|p| !p.trim().is_empty()) {
            out.push_str(&format!("package {};\n\n", package.trim()));
        }
        if !self.imports.is_empty() {
            for import in &self.imports {
                out.push_str(&format!("import {import};\n"));
            }
            out.push('\n');
        }
        out
    }

    /// Class members: the field block, the constructor, then each method,
    /// separated by blank lines.
    pub fn body(&self) -> String {
        let mut sections = Vec::new();
        if !self.fields.is_empty() {
            sections.push(
                self.fields
                    .iter()
                    .map(JavaField::render)
                    .collect::<Vec<_>>()
                    .join("\n"),
            );
        }
        if let Some(constructor) = &self.constructor {
            let mut lines = vec![format!(
                "{MEMBER_INDENT}public {}({}) {{",
                self.name,
                render_params(&constructor.params)
            )];
            lines.extend(constructor.body.iter().map(Statement::render));
            lines.push(format!("{MEMBER_INDENT}}}"));
            sections.push(lines.join("\n"));
        }
        sections.extend(self.methods.iter().map(JavaMethod::render));
        sections.join("\n\n")
    }

    /// Plain rendering, identical to the built-in class template.
    pub fn render(&self) -> String {
        format!(
            "{}public class {} {{\n\n{}\n}}\n",
            self.preamble(),
            self.name,
            self.body()
        )
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }
}

fn render_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ")
}
