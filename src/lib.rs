//! Cucumber Step Builder: Selenium locator models, Cucumber step definitions,
//! page objects and Gherkin features generated from element and step records.

pub mod action;
pub mod app;
pub mod class_names;
pub mod cli;
pub mod config;
pub mod error;
pub mod error_handler;
pub mod feature;
pub mod generator;
pub mod java;
pub mod locator;
pub mod model;
pub mod naming;
pub mod page;
pub mod project;
pub mod steps;
pub mod template_engine;
pub mod workspace;

pub use class_names::ClassNames;
pub use config::{Config, GenerationOptions};
pub use error::{CsbError, CsbResult};
pub use generator::{CodeGenerator, StepSuite};
pub use model::{ElementRecord, OutputMode, StepEntry};
pub use workspace::{Artifacts, Workspace};
