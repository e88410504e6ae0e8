use clap::Parser;
use profile_store::domain::model::FetchOutcome;
use profile_store::utils::error::{ErrorSeverity, StoreError};
use profile_store::utils::{logger, validation::Validate};
use profile_store::{CliConfig, RootStore};

fn exit_with(e: &StoreError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting profile-store CLI");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed");
        exit_with(&e);
    }

    let store = match RootStore::from_config(&config) {
        Ok(store) => store,
        Err(e) => exit_with(&e),
    };
    store.subscribe(|record| {
        tracing::debug!("mutation {} {}", record.mutation_type, record.payload);
    });

    tracing::info!(
        "Store {} ready (commit policy: {:?})",
        store.version(),
        store.profile().commit_policy()
    );

    match store.profile().fetch_name(cli.id).await {
        Ok(FetchOutcome::Response(raw)) => {
            tracing::info!("✅ {} answered HTTP {}", raw.url, raw.status);
        }
        Ok(FetchOutcome::Failed(e)) => {
            // Literal policy settles failures; the names were committed anyway.
            tracing::debug!("fetchName settled with a failed request: {}", e);
        }
        Err(e) => exit_with(&e),
    }

    println!("{}", serde_json::to_string_pretty(&store.state())?);
    Ok(())
}
