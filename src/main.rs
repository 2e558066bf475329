//! iplocate - resolve IP addresses through a geolocation provider
//!
//! This is the composition root that wires together all the components.
//! Usage: `iplocate [IP...]`; with no address the caller's own is resolved.

use ip_locator::{build_service, load_config, CancelToken, LocatorService, ReqwestTransport};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let mut cfg = load_config()?;

    // Positional addresses override IPLOCATE_TARGET_IPS
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        cfg.target_ips = args;
    }

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "looking up {} address(es) with {}",
        cfg.target_ips.len().max(1),
        cfg.provider
    );

    // ===== COMPOSITION ROOT =====

    let transport = Arc::new(ReqwestTransport::new());
    let locator = LocatorService::new(transport);
    let service = build_service(cfg.provider, cfg.service_options());

    // Ctrl-C aborts the exchange
    let cancel = CancelToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let records = locator.locate(service.as_ref(), Some(&cancel)).await?;
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
