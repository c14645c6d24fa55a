use crate::config::{default_placeholders, validate_provider};
use crate::core::ConfigProvider;
use crate::domain::model::OutputMode;
use crate::utils::error::{MedalError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A certificate job described in a TOML file.
///
/// ```toml
/// [job]
/// name = "school-olympiad-2026"
///
/// [input]
/// path = "listm.xlsx"
///
/// [template]
/// path = "medals.docx"
///
/// [output]
/// mode = "single"
/// file = "medals_out.docx"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub input: InputConfig,
    pub template: TemplateConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub sheet: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub path: String,
    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,
    #[serde(default = "default_out_dir")]
    pub dir: String,
    pub file: Option<String>,
    #[serde(default = "default_true")]
    pub manifest: bool,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            dir: default_out_dir(),
            file: None,
            manifest: true,
            concurrency: default_concurrency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

fn default_out_dir() -> String {
    "out".to_string()
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    4
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MedalError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MedalError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}`; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MedalError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn template_path(&self) -> &str {
        &self.template.path
    }

    fn names_path(&self) -> &str {
        &self.input.path
    }

    fn sheet(&self) -> Option<&str> {
        self.input.sheet.as_deref()
    }

    fn placeholders(&self) -> &[String] {
        &self.template.placeholders
    }

    fn output_mode(&self) -> OutputMode {
        self.output.mode
    }

    fn out_dir(&self) -> &str {
        &self.output.dir
    }

    fn output_file(&self) -> &str {
        self.output.file.as_deref().unwrap_or_default()
    }

    fn concurrency(&self) -> usize {
        self.output.concurrency
    }

    fn write_manifest(&self) -> bool {
        self.output.manifest
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("job.name", &self.job.name)?;
        if self.output.mode == OutputMode::Single {
            validation::validate_required_field("output.file", &self.output.file)?;
        }
        validate_provider(self)
    }
}
