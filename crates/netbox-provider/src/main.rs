//! terraform-provider-netbox
//!
//! Serves the NetBox provider over the JSON-lines RPC protocol on
//! stdin/stdout. Logs go to stderr; set `RUST_LOG` to adjust verbosity.
//! The host configures the provider with a `configure` request; values it
//! leaves out are read from `NETBOX_SERVER_URL`, `NETBOX_API_TOKEN` and
//! `NETBOX_INSECURE`.

use anyhow::{Context, Result};
use netbox_provider::host;
use netbox_provider::provider::NetBoxProvider;
use std::sync::Arc;
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting NetBox provider {}", env!("CARGO_PKG_VERSION"));

    let provider = NetBoxProvider::unconfigured();
    info!(
        "Serving {} resource types, waiting for configure",
        provider.resource_types().len()
    );

    host::serve(Arc::new(provider), BufReader::new(stdin()), stdout())
        .await
        .context("serving provider requests")?;

    info!("NetBox provider stopped");
    Ok(())
}
