use anyhow::Context;
use clap::Parser;
use medal_press::core::ConfigProvider;
use medal_press::domain::model::{OutputMode, PROOFREAD_ADVISORY};
use medal_press::utils::error::ErrorSeverity;
use medal_press::utils::{logger, validation::Validate};
use medal_press::{LocalStorage, MedalEngine, MedalPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "medal-press-toml")]
#[command(about = "Certificate runs described in a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "medals.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override output mode from config (separate or single)
    #[arg(long)]
    mode: Option<String>,

    /// Show the declined names without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config).with_context(|| {
        format!(
            "Failed to load config file '{}'; make sure it exists and is valid TOML",
            args.config
        )
    })?;

    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(mode) = &args.mode {
        config.output.mode = match mode.to_ascii_lowercase().as_str() {
            "separate" => OutputMode::Separate,
            "single" => OutputMode::Single,
            other => anyhow::bail!("Unknown output mode '{}': use separate or single", other),
        };
        tracing::info!("🔧 Output mode overridden to: {:?}", config.output.mode);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.out_dir().to_string());
    let pipeline = MedalPipeline::new(storage, config);
    let engine = MedalEngine::new_with_monitoring(pipeline, monitor_enabled);

    let result = if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no documents will be written");
        engine.preview().await.map(|certificates| {
            for certificate in &certificates {
                println!(
                    "  {:>3}. {} -> {}",
                    certificate.recipient.index,
                    certificate.recipient.nominative,
                    certificate.declined.dative
                );
            }
            format!("{} name(s) previewed", certificates.len())
        })
    } else {
        engine.run().await
    };

    match result {
        Ok(output) => {
            println!("✅ {}", output);
            println!("⚠️  {}", PROOFREAD_ADVISORY);
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Job: {}", config.job.name);
    if let Some(description) = &config.job.description {
        println!("  Description: {}", description);
    }
    println!("  Names: {}", config.names_path());
    if let Some(sheet) = config.sheet() {
        println!("  Sheet: {}", sheet);
    }
    println!("  Template: {}", config.template_path());
    println!("  Placeholders: {}", config.placeholders().join(" | "));
    println!("  Mode: {:?}", config.output_mode());
    println!("  Output directory: {}", config.out_dir());
    if config.output_mode() == OutputMode::Single {
        println!("  Merged file: {}", config.output_file());
    }
    println!("  Concurrency: {}", config.concurrency());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
