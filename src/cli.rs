use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::OutputMode;

#[derive(Parser)]
#[command(name = "csb")]
#[command(about = "🥒 CSB - Cucumber Step Builder")]
#[command(long_about = "CSB turns element locators and step rows into Selenium/Cucumber Java sources:
a locator model class, a step-definitions class, a page-object class and a
Gherkin feature file, all named consistently from one model class name.

QUICK START:
  csb init login.yml                          # Write a sample project
  csb generate login.yml --out ./generated    # Generate all four files
  csb preview login.yml --mode grid           # Preview the step lines

EXAMPLES:
  csb locator \"login button\" --by id --selector loginBtn
  csb names SeatSelectionModel --step-class BookingSteps
  csb generate --dir ./projects --out ./generated --continue-on-error")]
#[command(version = "1.0.0")]
pub struct Cli {
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log output (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Generate model, steps, page and feature files from a project")]
    #[command(long_about = "Generate the Java and Gherkin files described by a project file.

INPUT OPTIONS (choose one):
  <PROJECT>  A project file (.yml, .yaml or .json)
  --dir      Directory searched recursively for project files

OUTPUT OPTIONS:
  --out       Write files into this directory instead of printing them
  --artifact  Restrict output: model, steps, page, feature (repeatable)
  --mode      Override the project's output mode: gherkin or grid

EXAMPLES:
  csb generate login.yml
  csb generate login.yml --out ./src/test/java --artifact model --artifact page
  csb generate --dir ./projects --out ./generated --continue-on-error")]
    Generate {
        #[arg(help = "Project file to generate from")]
        project: Option<PathBuf>,

        #[arg(short, long, help = "Directory of project files to generate from")]
        dir: Option<PathBuf>,

        #[arg(short, long, help = "Write generated files into this directory")]
        out: Option<PathBuf>,

        #[arg(long, help = "Output mode override", value_enum)]
        mode: Option<ModeArg>,

        #[arg(long, help = "Only emit these artifacts", value_enum, action = ArgAction::Append)]
        artifact: Vec<ArtifactKind>,

        #[arg(long, help = "Continue with the next project when one fails")]
        continue_on_error: bool,
    },

    #[command(about = "Print the By constant for a single element")]
    Locator {
        #[arg(help = "Element alias, e.g. \"login button\"")]
        alias: String,

        #[arg(short, long, help = "Locator type: id, css, xpath, name, class, tag, linkText, partialLinkText")]
        by: String,

        #[arg(short, long, help = "Raw selector value")]
        selector: String,

        #[arg(short, long, help = "Wrap the constant in a model class with this name")]
        class: Option<String>,
    },

    #[command(about = "Show the class and file names derived from a model class name")]
    Names {
        #[arg(help = "Model class name")]
        model_class: String,

        #[arg(long, help = "Step class override")]
        step_class: Option<String>,
    },

    #[command(about = "Preview step lines of a project without generating code")]
    Preview {
        #[arg(help = "Project file to preview")]
        project: PathBuf,

        #[arg(long, help = "Output mode override", value_enum)]
        mode: Option<ModeArg>,
    },

    #[command(about = "Write a sample project file")]
    Init {
        #[arg(default_value = "csb-project.yml", help = "Path of the project file to create")]
        path: PathBuf,

        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },

    #[command(about = "Show or create the CSB configuration")]
    #[command(long_about = "Manage the CSB configuration file.

Settings are read from ~/.csb/config.yml and can be overridden with
environment variables, e.g. CSB__GENERATION__OUTPUT_MODE=grid or
CSB__GENERATION__MODEL_PACKAGE=com.acme.models.

EXAMPLES:
  csb config --show
  csb config --init
  csb config --set-template-dir ~/.csb/templates")]
    Config {
        #[arg(long, help = "Display current configuration values")]
        show: bool,

        #[arg(long, help = "Write the current configuration to the config file")]
        init: bool,

        #[arg(long, help = "Print the config file location")]
        path: bool,

        #[arg(long, help = "Set the default output mode", value_enum)]
        set_mode: Option<ModeArg>,

        #[arg(long, help = "Set the package of the model class")]
        set_model_package: Option<String>,

        #[arg(long, help = "Set custom template directory")]
        set_template_dir: Option<PathBuf>,
    },

    #[command(about = "Manage output templates")]
    Templates {
        #[arg(long, help = "Create a template directory seeded with the built-in templates")]
        init: Option<PathBuf>,

        #[arg(long, help = "List available templates")]
        list: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Gherkin,
    Grid,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Gherkin => OutputMode::Gherkin,
            ModeArg::Grid => OutputMode::Grid,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Steps,
    Page,
    Feature,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Model,
        ArtifactKind::Steps,
        ArtifactKind::Page,
        ArtifactKind::Feature,
    ];
}
