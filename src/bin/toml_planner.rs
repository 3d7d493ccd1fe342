use anyhow::Context;
use clap::Parser;
use suspension_planner::app::report;
use suspension_planner::core::{ConfigProvider, SampleSource};
use suspension_planner::utils::{logger, validation::Validate};
use suspension_planner::{LocalStorage, PlannerError, PlanningEngine, PlanningPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-planner")]
#[command(about = "Dilution planner driven by a TOML run file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pool-plan.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Override the output directory from config
    #[arg(long)]
    output_path: Option<String>,

    /// Dry run - print the plan without writing any files
    #[arg(long)]
    dry_run: bool,
}

fn exit_with(e: &PlannerError) -> ! {
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let plan = config.plan_config();

    println!("📋 Configuration Summary:");
    println!("  Run: {}", config.display_name());
    println!(
        "  Policy: {} ({} = {} uL)",
        plan.policy.kind(),
        plan.policy.base_volume_field(),
        plan.policy.base_volume()
    );
    println!("  Target Concentration: {} cells/uL", plan.target_concentration);
    println!("  Target Recovery: {} cells", plan.target_recovery);
    match config.sample_source() {
        SampleSource::File(path) => println!("  Samples: {}", path),
        SampleSource::Inline(samples) => println!("  Samples: {} inline", samples.len()),
    }
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.output_formats.join(", "));
    if let Some(bundle) = config.bundle_name() {
        println!("  Bundle: {} (ZIP)", bundle);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(args.verbose, args.json_logs);

    tracing::info!("🚀 Starting TOML-based dilution planner");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    // 應用命令列覆蓋設定
    if let Some(output_path) = &args.output_path {
        config.output.output_path = output_path.clone();
        tracing::info!("🔧 Output path overridden to: {}", output_path);
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    let pipeline = PlanningPipeline::new(LocalStorage::current_dir(), config);
    let engine = PlanningEngine::new(pipeline);

    if args.dry_run {
        match engine.preview().await {
            Ok(artifacts) => {
                println!("{}", report::render_console(&artifacts));
                println!();
                println!("✅ Dry run complete. {} export(s) would be written.", artifacts.files.len());
            }
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(outcome) => {
            println!("{}", report::render_console(&outcome.artifacts));
            println!();
            for path in &outcome.written {
                println!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
