use clap::Parser;
use slack_options_responder::adapters::http;
use slack_options_responder::domain::ports::CatalogSource;
use slack_options_responder::utils::{logger, validation::Validate};
use slack_options_responder::{
    CliArgs, FileCatalogSource, RequestPipeline, ResponderError, ServerConfig, SignatureVerifier,
};
use std::sync::Arc;

fn exit_with(e: &ResponderError) -> ! {
    tracing::error!("❌ Startup failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 環境變數設定，再套用命令列覆蓋
    let mut config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(args.verbose);
            exit_with(&e);
        }
    };
    args.apply(&mut config);

    logger::init_logger(args.verbose, config.log_format);
    tracing::info!("Starting slack-options-responder");
    tracing::debug!("Server config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    // 目錄載入失敗時不提供服務
    let source = FileCatalogSource::new(&config.catalog_file);
    tracing::info!("📁 Loading catalog from {}", source.describe());
    let catalog = match source.load() {
        Ok(catalog) => catalog,
        Err(e) => exit_with(&e),
    };

    if catalog.is_empty() {
        tracing::warn!("Catalog is empty; every request will receive an empty options list");
    }

    if args.check {
        tracing::info!("✅ Configuration and catalog are valid");
        println!("✅ Configuration and catalog are valid ({} entries)", catalog.len());
        return Ok(());
    }

    let verifier = SignatureVerifier::new(config.signing_secret.clone());
    let pipeline = Arc::new(RequestPipeline::new(Arc::new(catalog), verifier));

    if let Err(e) = http::serve(&config.bind_address(), pipeline).await {
        exit_with(&e);
    }

    Ok(())
}
