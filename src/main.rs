use clap::Parser;
use suspension_planner::app::report;
use suspension_planner::utils::{logger, validation::Validate};
use suspension_planner::{CliConfig, LocalStorage, PlannerError, PlanningEngine, PlanningPipeline};

fn exit_with(e: &PlannerError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Planning failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init(config.verbose, config.json_logs);

    tracing::info!("Starting suspension-planner");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let dry_run = config.dry_run;
    let pipeline = PlanningPipeline::new(LocalStorage::current_dir(), config);
    let engine = PlanningEngine::new(pipeline);

    let result = if dry_run {
        tracing::info!("🔍 DRY RUN MODE - no files will be written");
        engine.preview().await.map(|artifacts| (artifacts, Vec::new()))
    } else {
        engine
            .run()
            .await
            .map(|outcome| (outcome.artifacts, outcome.written))
    };

    match result {
        Ok((artifacts, written)) => {
            println!("{}", report::render_console(&artifacts));
            for path in written {
                println!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
