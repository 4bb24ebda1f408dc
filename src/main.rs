use clap::Parser;
use obit_publisher::core::ConfigProvider;
use obit_publisher::utils::{logger, validation::Validate};
use obit_publisher::{
    build_example_payload, CliConfig, ObituaryDraft, ObituaryPublisher, ObituaryRequest,
    PublisherClient, Result, TomlConfig,
};

fn load_request(cli: &CliConfig, settings: &TomlConfig) -> Result<ObituaryRequest> {
    if let Some(path) = &cli.payload {
        tracing::info!("Loading request body from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&content)?);
    }

    if let Some(path) = &cli.draft {
        tracing::info!("Building request from draft {}", path.display());
        return ObituaryDraft::from_file(path)?.into_request(settings.default_owner());
    }

    tracing::info!("No draft or payload given, using the example obituary");
    Ok(build_example_payload())
}

async fn run(cli: &CliConfig) -> Result<()> {
    let settings = cli.apply_to(TomlConfig::load_or_default(&cli.config)?);

    if cli.save_config {
        settings.save_to_file(&cli.config)?;
    }

    let request = load_request(cli, &settings)?;

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    settings.validate()?;
    let client = PublisherClient::from_config(&settings)?;
    tracing::info!(
        "Publishing to {} ({}, {:?} endpoint)",
        client.base_url(),
        settings.environment(),
        settings.endpoint_kind()
    );

    let result = client.publish(&request).await?;

    println!("✅ Success!");
    println!("Obituary ID: {}", result.obituary_id);
    println!("Redirector URL: {}", result.redirector_url);
    if let Some(warnings) = result.warnings.as_ref().filter(|w| !w.is_empty()) {
        println!("⚠️  Warnings: {:?}", warnings);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("Settings file: {}", cli.config.display());

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Publishing failed: {} (Category: {:?})",
            e,
            e.category()
        );

        eprintln!("{}", e.report());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }
}
