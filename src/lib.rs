pub mod adapters;
pub mod config;
pub mod core;
pub mod declension;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{engine::MedalEngine, pipeline::MedalPipeline};
pub use declension::{decline, inflect_to_dative, DativeName, Gender};
pub use utils::error::{MedalError, Result};
