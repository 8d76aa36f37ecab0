//! Project files: a saved snapshot of the form, in YAML or JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{CsbError, CsbResult};
use crate::generator::CodeGenerator;
use crate::model::{ElementRecord, OutputMode, StepEntry};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    pub fn from_path(path: &Path) -> CsbResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yml") | Some("yaml") => Ok(ProjectFormat::Yaml),
            Some("json") => Ok(ProjectFormat::Json),
            _ => Err(CsbError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

pub fn is_project_file(path: &Path) -> bool {
    ProjectFormat::from_path(path).is_ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub model_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_class: Option<String>,
    pub output_mode: OutputMode,
    /// Shared page name used when steps are derived from elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
    /// Build the step list from elements that carry an action.
    pub derive_steps: bool,
    pub elements: Vec<ElementRecord>,
    pub steps: Vec<StepEntry>,
}

impl Project {
    pub async fn load(path: &Path) -> CsbResult<Self> {
        let format = ProjectFormat::from_path(path)?;
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| CsbError::io(path, e))?;
        let project = Self::parse(&content, format).map_err(|message| CsbError::invalid_project(path, message))?;
        debug!(
            path = %path.display(),
            elements = project.elements.len(),
            steps = project.steps.len(),
            "project loaded"
        );
        Ok(project)
    }

    pub fn parse(content: &str, format: ProjectFormat) -> Result<Self, String> {
        match format {
            ProjectFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ProjectFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }

    pub async fn save(&self, path: &Path) -> CsbResult<()> {
        let content = match ProjectFormat::from_path(path)? {
            ProjectFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| CsbError::invalid_project(path, e))?
            }
            ProjectFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| CsbError::invalid_project(path, e))?
            }
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CsbError::io(parent, e))?;
        }
        fs::write(path, content)
            .await
            .map_err(|e| CsbError::io(path, e))
    }

    /// The login example written by `csb init`.
    pub fn sample() -> Self {
        Self {
            model_class: "LoginModel".to_string(),
            step_class: None,
            output_mode: OutputMode::Gherkin,
            page_name: Some("Login Page".to_string()),
            derive_steps: false,
            elements: vec![
                ElementRecord::new("user name", "id", "username").with_action("send keys"),
                ElementRecord::new("password", "name", "password").with_action("send keys"),
                ElementRecord::new("login button", "id", "loginBtn").with_action("click"),
                ElementRecord::new("welcome message", "css", ".welcome").with_action("should see"),
            ],
            steps: vec![
                StepEntry::new("Login Page", "send keys", "USER_NAME"),
                StepEntry::new("Login Page", "send keys", "PASSWORD"),
                StepEntry::new("Login Page", "click", "LOGIN_BUTTON"),
                StepEntry::new("Home Page", "should see", "WELCOME_MESSAGE"),
            ],
        }
    }

    /// Load the snapshot into a workspace and generate every artifact.
    /// `default_mode` applies when the project leaves the mode unset.
    pub fn into_workspace(self, generator: CodeGenerator, default_mode: OutputMode) -> CsbResult<Workspace> {
        let mut workspace = Workspace::new(generator);
        workspace.set_model_class(&self.model_class)?;
        if let Some(step_class) = &self.step_class {
            workspace.set_step_class(step_class);
        }

        let mode = match self.output_mode {
            OutputMode::Unset => default_mode,
            chosen => chosen,
        };
        workspace.set_output_mode(mode)?;

        for element in self.elements {
            workspace.add_element(element);
        }
        workspace.generate_all_locators()?;

        if self.derive_steps {
            let page_name = self.page_name.as_deref().unwrap_or_default();
            if page_name.trim().is_empty() {
                warn!("deriveSteps is set without a pageName; derived steps will not qualify");
            }
            workspace.derive_steps_from_elements(page_name);
        } else {
            for step in self.steps {
                workspace.add_step(step);
            }
        }

        workspace.generate_steps()?;
        Ok(workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationOptions;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ProjectFormat::from_path(Path::new("a.yml")).unwrap(), ProjectFormat::Yaml);
        assert_eq!(ProjectFormat::from_path(Path::new("a.YAML")).unwrap(), ProjectFormat::Yaml);
        assert_eq!(ProjectFormat::from_path(Path::new("a.json")).unwrap(), ProjectFormat::Json);
        assert!(matches!(
            ProjectFormat::from_path(&PathBuf::from("a.toml")),
            Err(CsbError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_yaml_without_ids_gets_fresh_ids() {
        let yaml = r#"
modelClass: CartModel
outputMode: grid
elements:
  - alias: checkout
    by: id
    selector: checkoutBtn
steps:
  - pageName: Cart Page
    action: click
    element: CHECKOUT
"#;
        let project = Project::parse(yaml, ProjectFormat::Yaml).unwrap();
        assert_eq!(project.output_mode, OutputMode::Grid);
        assert_eq!(project.elements.len(), 1);
        assert!(!project.elements[0].id.is_empty());
        assert_eq!(project.steps[0].page_name, "Cart Page");
        assert!(!project.derive_steps);
    }

    #[test]
    fn test_derived_steps_replace_listed_steps() {
        let mut project = Project::sample();
        project.derive_steps = true;
        let generator = CodeGenerator::new(GenerationOptions::default()).unwrap();
        let workspace = project.into_workspace(generator, OutputMode::Gherkin).unwrap();

        assert_eq!(workspace.steps().len(), 4);
        assert!(workspace.steps().iter().all(|s| s.page_name == "Login Page"));
        assert!(workspace.artifacts().steps.contains("I fill user name on Login Page with \\\"<text>\\\""));
    }

    #[tokio::test]
    async fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("login.json");
        let project = Project::sample();
        project.save(&path).await.unwrap();

        let loaded = Project::load(&path).await.unwrap();
        assert_eq!(loaded, project);
    }

    #[tokio::test]
    async fn test_invalid_project_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yml");
        tokio::fs::write(&path, "elements: 12").await.unwrap();
        let err = Project::load(&path).await.unwrap_err();
        assert!(matches!(err, CsbError::InvalidProject { .. }));
        assert!(err.to_string().contains("broken.yml"));
    }
}
