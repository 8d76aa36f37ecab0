use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::class_names::ClassNames;
use crate::cli::{ArtifactKind, Commands, ModeArg};
use crate::config::Config;
use crate::error::CsbError;
use crate::error_handler::{ErrorHandler, ProcessingError};
use crate::generator::CodeGenerator;
use crate::locator::{LocatorBook, LocatorDeclaration, LocatorType};
use crate::model::ElementRecord;
use crate::naming::is_valid_class_name;
use crate::project::{is_project_file, Project};
use crate::template_engine::{create_template_directory, TemplateEngine};
use crate::workspace::Workspace;

/// One generated file, ready to print or write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub content: String,
}

pub struct App {
    pub config: Config,
    generator: CodeGenerator,
}

impl App {
    /// Build the app around `config`, loading custom templates from the
    /// configured template directory.
    pub async fn with_config(config: Config) -> Result<Self> {
        let engine = match &config.templates.dir {
            Some(dir) => {
                let mut engine = TemplateEngine::with_template_dir(dir.clone())?;
                let loaded = engine
                    .load_custom_templates()
                    .await
                    .with_context(|| format!("Failed to load templates from {}", dir.display()))?;
                info!(count = loaded, dir = %dir.display(), "custom templates loaded");
                engine
            }
            None => TemplateEngine::new()?,
        };
        let generator = CodeGenerator::with_engine(engine, config.generation.clone());

        Ok(Self { config, generator })
    }

    pub async fn run_command(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Generate {
                project,
                dir,
                out,
                mode,
                artifact,
                continue_on_error,
            } => {
                let artifacts = if artifact.is_empty() {
                    ArtifactKind::ALL.to_vec()
                } else {
                    artifact
                };

                if let Some(dir_path) = &dir {
                    return self
                        .process_directory_batch(dir_path, out.as_deref(), mode, &artifacts, continue_on_error)
                        .await;
                }

                let Some(project_path) = project else {
                    bail!("Please provide a project file or --dir. Run 'csb init' to create a sample project.");
                };

                let workspace = self.load_workspace(&project_path, mode).await?;
                let files = collect_outputs(&workspace, &artifacts);
                if files.is_empty() {
                    println!("⚠️  Nothing to generate: no element or step in {} is complete.", project_path.display());
                    return Ok(());
                }

                match &out {
                    Some(out_dir) => {
                        let written = write_outputs(out_dir, &files).await?;
                        for path in written {
                            println!("✅ {}", path.display());
                        }
                    }
                    None => print_outputs(&files),
                }
            }

            Commands::Locator {
                alias,
                by,
                selector,
                class,
            } => {
                let element = ElementRecord::new(&alias, &by, &selector);
                let Some(declaration) = LocatorDeclaration::from_element(&element) else {
                    bail!("Alias, locator type and selector must all be non-empty");
                };
                if let LocatorType::Unknown(kind) = &declaration.locator {
                    warn!(locator = %kind, "unsupported locator type");
                    eprintln!(
                        "⚠️  Unknown locator type '{}'. Supported: {}",
                        kind,
                        LocatorType::KNOWN.join(", ")
                    );
                }

                match class {
                    Some(class_name) => {
                        let mut book = LocatorBook::new();
                        book.upsert(&element);
                        let names = ClassNames::new(&class_name);
                        print!("{}", self.generator.model_file(&book, &names)?);
                    }
                    None => println!("{}", declaration.line()),
                }
            }

            Commands::Names {
                model_class,
                step_class,
            } => {
                let mut names = ClassNames::new(&model_class);
                if let Some(step_class) = &step_class {
                    names.set_steps_class(step_class);
                }
                if !is_valid_class_name(model_class.trim()) {
                    println!(
                        "⚠️  '{}' is not a conventional Java class name; using '{}'",
                        model_class,
                        names.model()
                    );
                }
                println!("{}", describe_names(&names));
            }

            Commands::Preview { project, mode } => {
                let workspace = self.load_workspace(&project, mode).await?;
                let preview = workspace.preview();
                if preview.is_empty() {
                    println!("⚠️  No step has a page name yet.");
                } else {
                    println!("{preview}");
                }
            }

            Commands::Init { path, force } => {
                if path.exists() && !force {
                    bail!("{} already exists. Use --force to overwrite it.", path.display());
                }
                Project::sample()
                    .save(&path)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("✅ Sample project written to {}", path.display());
                println!("💡 Next: csb generate {} --out ./generated", path.display());
            }

            Commands::Config {
                show,
                init,
                path,
                set_mode,
                set_model_package,
                set_template_dir,
            } => {
                let mut changed = false;
                if let Some(mode) = set_mode {
                    self.config.set_output_mode(mode.into());
                    changed = true;
                }
                if let Some(package) = set_model_package {
                    self.config.set_model_package(package);
                    changed = true;
                }
                if let Some(dir) = set_template_dir {
                    self.config.set_template_dir(dir);
                    changed = true;
                }

                if changed || init {
                    self.config.save().await?;
                    println!("✅ Configuration saved to {}", Config::config_path()?.display());
                }
                if path {
                    println!("{}", Config::config_path()?.display());
                }
                if show || !(changed || init || path) {
                    println!("🔧 Current CSB Configuration");
                    println!("============================");
                    print!("{}", self.config.describe());
                }
            }

            Commands::Templates { init, list } => {
                if let Some(dir) = init {
                    create_template_directory(&dir).await?;
                    println!("✅ Template directory created at {}", dir.display());
                    println!("💡 Activate it with: csb config --set-template-dir {}", dir.display());
                }
                if list {
                    let engine = self.generator.engine();
                    println!("📄 Built-in templates:");
                    for name in engine.list_templates() {
                        if let Some(template) = engine.get_template(&name) {
                            println!("  • {:<8} {}", template.name, template.description);
                        }
                    }
                    if let Some(dir) = &self.config.templates.dir {
                        println!("\nCustom templates from {} override built-ins of the same name.", dir.display());
                    }
                }
            }
        }

        Ok(())
    }

    async fn load_workspace(&self, path: &Path, mode: Option<ModeArg>) -> Result<Workspace> {
        let mut project = Project::load(path).await?;
        if let Some(mode) = mode {
            project.output_mode = mode.into();
        }
        let workspace = project.into_workspace(self.generator.clone(), self.config.generation.output_mode)?;
        Ok(workspace)
    }

    async fn process_directory_batch(
        &self,
        dir_path: &Path,
        out: Option<&Path>,
        mode: Option<ModeArg>,
        artifacts: &[ArtifactKind],
        continue_on_error: bool,
    ) -> Result<()> {
        if !dir_path.is_dir() {
            bail!("Directory does not exist: {}", dir_path.display());
        }

        println!("📁 Scanning directory for project files: {}", dir_path.display());

        let mut projects: Vec<PathBuf> = WalkDir::new(dir_path)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && is_project_file(p))
            .collect();
        projects.sort();

        if projects.is_empty() {
            bail!("No project files (.yml, .yaml, .json) found in directory");
        }

        println!("📊 Found {} project files", projects.len());

        let mut handler = ErrorHandler::new(continue_on_error);
        let mut generated = 0;

        for project_path in projects {
            println!("\n🔍 Processing: {}", project_path.display());

            let workspace = match self.load_workspace(&project_path, mode).await {
                Ok(workspace) => workspace,
                Err(e) => {
                    let error = match e.downcast_ref::<CsbError>() {
                        Some(csb) => ProcessingError::from_csb(project_path.clone(), csb),
                        None => ProcessingError::generation_failed(project_path.clone(), e.to_string()),
                    };
                    if handler.handle_error(error) {
                        continue;
                    }
                    handler.print_summary();
                    return Err(e.context(format!("Failed to process {}", project_path.display())));
                }
            };

            let files = collect_outputs(&workspace, artifacts);
            if files.is_empty() {
                handler.add_warning(format!("{}: nothing to generate", project_path.display()));
                continue;
            }

            match out {
                Some(out_dir) => {
                    let target = out_dir.join(project_stem(&project_path));
                    match write_outputs(&target, &files).await {
                        Ok(written) => {
                            debug!(count = written.len(), dir = %target.display(), "files written");
                            println!("✅ {} files written to {}", written.len(), target.display());
                        }
                        Err(e) => {
                            let error = ProcessingError::write_failed(target.clone(), e.to_string());
                            if !handler.handle_error(error) {
                                handler.print_summary();
                                return Err(e);
                            }
                            continue;
                        }
                    }
                }
                None => print_outputs(&files),
            }
            generated += 1;
        }

        handler.print_summary();
        println!("\n✅ Generated {} project(s)", generated);

        if handler.has_errors() && generated == 0 {
            bail!("Every project in {} failed", dir_path.display());
        }
        Ok(())
    }
}

/// The non-empty artifacts of `workspace` selected by `kinds`, in artifact
/// order, named after the class names.
pub fn collect_outputs(workspace: &Workspace, kinds: &[ArtifactKind]) -> Vec<OutputFile> {
    let names = workspace.names();
    let artifacts = workspace.artifacts();

    ArtifactKind::ALL
        .into_iter()
        .filter(|kind| kinds.contains(kind))
        .filter_map(|kind| {
            let (file_name, content) = match kind {
                ArtifactKind::Model => (names.model_file_name(), &artifacts.model),
                ArtifactKind::Steps => (names.steps_file_name(), &artifacts.steps),
                ArtifactKind::Page => (names.page_file_name(), &artifacts.page),
                ArtifactKind::Feature => (names.feature_file_name(), &artifacts.feature),
            };
            (!content.is_empty()).then(|| OutputFile {
                kind,
                file_name,
                content: content.clone(),
            })
        })
        .collect()
}

pub async fn write_outputs(out_dir: &Path, files: &[OutputFile]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(&file.file_name);
        fs::write(&path, &file.content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn print_outputs(files: &[OutputFile]) {
    for (index, file) in files.iter().enumerate() {
        if index > 0 {
            println!();
        }
        let marker = match file.kind {
            ArtifactKind::Feature => "#",
            _ => "//",
        };
        println!("{marker} ===== {} =====", file.file_name);
        print!("{}", file.content);
    }
}

fn project_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

pub fn describe_names(names: &ClassNames) -> String {
    let mut out = String::new();
    out.push_str(&format!("Model class:    {}\n", names.model()));
    out.push_str(&format!(
        "Steps class:    {}{}\n",
        names.steps(),
        if names.has_steps_override() { " (override)" } else { "" }
    ));
    out.push_str(&format!("Page class:     {}\n", names.page()));
    out.push_str(&format!("Page variable:  {}\n", names.page_variable()));
    out.push_str(&format!("Feature:        {}\n", names.feature_name()));
    out.push_str(&format!(
        "Files:          {}, {}, {}, {}",
        names.model_file_name(),
        names.steps_file_name(),
        names.page_file_name(),
        names.feature_file_name()
    ));
    out
}
