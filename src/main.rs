use clap::Parser;
use medal_press::core::Certificate;
use medal_press::domain::model::PROOFREAD_ADVISORY;
use medal_press::utils::error::{ErrorSeverity, MedalError};
use medal_press::utils::{logger, validation::Validate};
use medal_press::{CliConfig, LocalStorage, MedalEngine, MedalPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting medal-press");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let dry_run = config.dry_run;
    let merge_only = config.merge_only;

    let storage = LocalStorage::new(config.out_dir.clone());
    let pipeline = MedalPipeline::new(storage, config);
    let engine = MedalEngine::new_with_monitoring(pipeline, monitor_enabled);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - no documents will be written");
        match engine.preview().await {
            Ok(certificates) => print_preview(&certificates),
            Err(e) => fail(e),
        }
        return Ok(());
    }

    let result = if merge_only {
        engine.pipeline().merge_existing().await
    } else {
        engine.run().await
    };

    match result {
        Ok(output_path) => {
            println!("✅ Done");
            println!("📁 Output saved to: {}", output_path);
            if !merge_only {
                println!("⚠️  {}", PROOFREAD_ADVISORY);
            }
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn print_preview(certificates: &[Certificate]) {
    println!("{:>4}  {:<40}  {:<40}  {}", "#", "Nominative", "Dative", "File");
    for certificate in certificates {
        println!(
            "{:>4}  {:<40}  {:<40}  {}",
            certificate.recipient.index,
            certificate.recipient.nominative,
            certificate.declined.dative,
            certificate.file_name
        );
    }
    println!();
    println!("⚠️  {}", PROOFREAD_ADVISORY);
}

fn fail(e: MedalError) {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

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
