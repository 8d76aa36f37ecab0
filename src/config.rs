use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::model::OutputMode;

pub const ENV_PREFIX: &str = "CSB";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generation: GenerationOptions,
    pub templates: TemplateConfig,
    pub logging: LoggingConfig,
}

/// Settings that shape the generated Java and Gherkin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Used when a project leaves the output mode unset.
    pub output_mode: OutputMode,
    pub model_package: String,
    pub steps_package: Option<String>,
    pub pages_package: Option<String>,
    /// Expression passed to the page-object constructor in step classes.
    pub driver_factory: String,
    pub helper_class: String,
    pub context_class: String,
    pub emit_imports: bool,
    /// Prefix every feature line with `And` when no trace is available.
    pub legacy_and_prefix: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            output_mode: OutputMode::Gherkin,
            model_package: "models".to_string(),
            steps_package: None,
            pages_package: None,
            driver_factory: "DriverFactory.getDriver()".to_string(),
            helper_class: "ElementHelper".to_string(),
            context_class: "ScenarioContext".to_string(),
            emit_imports: true,
            legacy_and_prefix: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".csb").join("config.yml"))
    }

    /// Load `~/.csb/config.yml` layered with `CSB__*` environment variables.
    /// A missing file yields the defaults.
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = if path.exists() {
            Some(
                fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read configuration from {}", path.display()))?,
            )
        } else {
            None
        };
        Self::layered(content.as_deref(), path)
    }

    fn layered(content: Option<&str>, path: &Path) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(content) = content.filter(|c| !c.trim().is_empty()) {
            builder = builder.add_source(config::File::from_str(content, config::FileFormat::Yaml));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path).await
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;

        Ok(())
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.generation.output_mode = mode;
    }

    pub fn set_template_dir(&mut self, dir: PathBuf) {
        self.templates.dir = Some(dir);
    }

    pub fn set_model_package(&mut self, package: String) {
        self.generation.model_package = package;
    }

    /// Human-readable summary for `csb config --show`.
    pub fn describe(&self) -> String {
        let generation = &self.generation;
        let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "(default package)".to_string());
        let mut out = String::new();
        out.push_str(&format!("Output mode:       {}\n", generation.output_mode));
        out.push_str(&format!("Model package:     {}\n", generation.model_package));
        out.push_str(&format!("Steps package:     {}\n", optional(&generation.steps_package)));
        out.push_str(&format!("Pages package:     {}\n", optional(&generation.pages_package)));
        out.push_str(&format!("Driver factory:    {}\n", generation.driver_factory));
        out.push_str(&format!("Helper class:      {}\n", generation.helper_class));
        out.push_str(&format!("Context class:     {}\n", generation.context_class));
        out.push_str(&format!("Emit imports:      {}\n", generation.emit_imports));
        out.push_str(&format!("Legacy And prefix: {}\n", generation.legacy_and_prefix));
        out.push_str(&format!(
            "Template dir:      {}\n",
            self.templates
                .dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "(built-in templates)".to_string())
        ));
        out.push_str(&format!("Log level:         {}\n", self.logging.level));
        out
    }
}
