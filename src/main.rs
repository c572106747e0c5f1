use anyhow::Context;
use clap::Parser;
use de_analyzer::transport::{router_with_stats, server};
use de_analyzer::utils::error::ErrorSeverity;
use de_analyzer::utils::monitor::{RequestStats, SystemMonitor};
use de_analyzer::utils::{logger, validation::Validate};
use de_analyzer::{
    build_collaborator, AnalyzerError, CliConfig, ConfigProvider, ServerSettings, TomlConfig,
    TransportShim,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("🚀 Starting Differential Equation Analyzer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入配置：指定 --config 時以 TOML 檔案為準
    let (settings, provider): (ServerSettings, Box<dyn ConfigProvider>) = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let toml_config = TomlConfig::from_file(path).unwrap_or_else(|e| exit_with(&e));
            if let Err(e) = toml_config.validate() {
                exit_with(&e);
            }
            (
                toml_config.server_settings(),
                Box::new(toml_config) as Box<dyn ConfigProvider>,
            )
        }
        None => {
            if let Err(e) = config.validate() {
                exit_with(&e);
            }
            (
                config.server_settings(),
                Box::new(config.clone()) as Box<dyn ConfigProvider>,
            )
        }
    };

    tracing::info!("✅ Configuration loaded and validated successfully");

    let collaborator = build_collaborator(provider.as_ref());
    tracing::info!("🔧 Using {} collaborator", collaborator.name());
    let shim = Arc::new(TransportShim::new(collaborator));
    let stats = Arc::new(RequestStats::new());

    if settings.monitor {
        tracing::info!("🔍 System monitoring enabled");
        let monitor = SystemMonitor::new(true);
        monitor.log_stats("Startup");
        monitor.spawn_periodic(
            Duration::from_secs(settings.monitor_interval_seconds),
            Arc::clone(&stats),
        );
    }

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);

    server::serve(listener, router_with_stats(shim, stats)).await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

fn exit_with(e: &AnalyzerError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
