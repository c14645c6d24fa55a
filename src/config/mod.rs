pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::OutputMode;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{ArgAction, Parser};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Template text replaced when no placeholder is configured: the dative
/// name already printed in the sample certificate, its nominative form and
/// the bare surname.
pub const DEFAULT_PLACEHOLDERS: [&str; 3] = [
    "Гурову Денису Сергійовичу",
    "Гуров Денис Сергійович",
    "Гуров",
];

pub const TEMPLATE_EXTENSIONS: &[&str] = &["docx"];
pub const NAME_LIST_EXTENSIONS: &[&str] = &["xlsx", "csv"];

pub fn default_placeholders() -> Vec<String> {
    DEFAULT_PLACEHOLDERS.iter().map(|p| p.to_string()).collect()
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "medal-press")]
#[command(about = "Fill a certificate template with names declined into the dative case")]
pub struct CliConfig {
    /// DOCX template containing the placeholder text
    #[arg(long, default_value = "medals.docx")]
    pub template: String,

    /// Name list (.xlsx or .csv); names are read from the first column
    #[arg(long, default_value = "listm.xlsx")]
    pub excel: String,

    /// Worksheet name (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Text to replace; can be repeated
    #[arg(long = "placeholder", action = ArgAction::Append, default_values = DEFAULT_PLACEHOLDERS)]
    pub placeholders: Vec<String>,

    /// Merged output file for --single
    #[arg(long, default_value = "medals_out.docx")]
    pub output: String,

    /// One DOCX per recipient in --out-dir (default)
    #[arg(long, overrides_with = "single")]
    pub separate: bool,

    /// Also merge all certificates into --output
    #[arg(long, overrides_with = "separate")]
    pub single: bool,

    /// Directory for the per-recipient documents
    #[arg(long, default_value = "out")]
    pub out_dir: String,

    /// Documents rendered in parallel
    #[arg(long, default_value = "4")]
    pub concurrency: usize,

    /// Do not write manifest.json
    #[arg(long)]
    pub no_manifest: bool,

    /// Print the declined names and stop
    #[arg(long)]
    pub dry_run: bool,

    /// Merge the existing documents in --out-dir into --output and stop
    #[arg(long)]
    pub merge_only: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn template_path(&self) -> &str {
        &self.template
    }

    fn names_path(&self) -> &str {
        &self.excel
    }

    fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    fn output_mode(&self) -> OutputMode {
        if self.single {
            OutputMode::Single
        } else {
            OutputMode::Separate
        }
    }

    fn out_dir(&self) -> &str {
        &self.out_dir
    }

    fn output_file(&self) -> &str {
        &self.output
    }

    fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn write_manifest(&self) -> bool {
        !self.no_manifest
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_path("template", config.template_path())?;
    validation::validate_file_extension("template", config.template_path(), TEMPLATE_EXTENSIONS)?;
    validation::validate_path("excel", config.names_path())?;
    validation::validate_file_extension("excel", config.names_path(), NAME_LIST_EXTENSIONS)?;
    if let Some(sheet) = config.sheet() {
        validation::validate_non_empty_string("sheet", sheet)?;
    }
    validation::validate_placeholders("placeholder", config.placeholders())?;
    validation::validate_path("out_dir", config.out_dir())?;
    validation::validate_positive_number("concurrency", config.concurrency(), 1)?;

    if config.output_mode() == OutputMode::Single {
        validation::validate_path("output", config.output_file())?;
        validation::validate_file_extension("output", config.output_file(), TEMPLATE_EXTENSIONS)?;
    }
    Ok(())
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        if self.merge_only {
            validation::validate_path("output", &self.output)?;
            validation::validate_file_extension("output", &self.output, TEMPLATE_EXTENSIONS)?;
        }
        Ok(())
    }
}
