//! JSON-lines RPC adapter
//!
//! The host writes one request object per line on stdin and reads one
//! response object per line from stdout:
//!
//! ```text
//! {"request_id": 7, "rpc": "read", "type_name": "netbox_site", "state": {...}}
//! {"request_id": 7, "ok": true, "result": {...}}
//! ```
//!
//! Requests are served concurrently, one task each, so responses may arrive
//! out of order; `request_id` is echoed to correlate them. A `read` of an
//! object deleted outside Terraform answers `"result": null`.
//!
//! The host sends `configure` with the provider block first; until it
//! succeeds, operations that reach NetBox fail with "provider not
//! configured". Unset block values fall back to `NETBOX_*` environment
//! variables.

use crate::config::{ProviderBlock, ProviderConfig};
use crate::error::ProviderError;
use crate::provider::NetBoxProvider;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// One operation requested by the host
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "rpc", rename_all = "snake_case")]
pub enum Call {
    Metadata,
    Configure {
        #[serde(default)]
        config: ProviderBlock,
    },
    Schema {
        type_name: String,
    },
    Validate {
        type_name: String,
        config: Json,
    },
    Plan {
        type_name: String,
        config: Json,
        #[serde(default)]
        prior_state: Option<Json>,
    },
    Create {
        type_name: String,
        planned_state: Json,
    },
    Read {
        type_name: String,
        state: Json,
    },
    Update {
        type_name: String,
        planned_state: Json,
        prior_state: Json,
    },
    Delete {
        type_name: String,
        state: Json,
    },
    ImportState {
        type_name: String,
        id: String,
    },
}

impl Call {
    fn rpc(&self) -> &'static str {
        match self {
            Call::Metadata => "metadata",
            Call::Configure { .. } => "configure",
            Call::Schema { .. } => "schema",
            Call::Validate { .. } => "validate",
            Call::Plan { .. } => "plan",
            Call::Create { .. } => "create",
            Call::Read { .. } => "read",
            Call::Update { .. } => "update",
            Call::Delete { .. } => "delete",
            Call::ImportState { .. } => "import_state",
        }
    }
}

/// Answer to one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub request_id: Json,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn from_result(request_id: Json, result: Result<Json, ProviderError>) -> Self {
        match result {
            Ok(result) => Self {
                request_id,
                ok: true,
                result: Some(result),
                error: None,
            },
            Err(e) => Self {
                request_id,
                ok: false,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Run one call against the provider
pub async fn dispatch(provider: &NetBoxProvider, call: Call) -> Result<Json, ProviderError> {
    match call {
        Call::Metadata => {
            let metadata = provider.metadata();
            Ok(serde_json::json!({
                "type_name": metadata.type_name,
                "version": metadata.version,
                "resource_types": provider.resource_types(),
            }))
        }
        Call::Configure { config } => {
            let config = ProviderConfig::from_block(&config)?;
            provider.configure(&config).await?;
            Ok(Json::Null)
        }
        Call::Schema { type_name } => Ok(serde_json::to_value(provider.resource(&type_name)?.schema())?),
        Call::Validate { type_name, config } => {
            provider.resource(&type_name)?.validate(&config)?;
            Ok(Json::Null)
        }
        Call::Plan {
            type_name,
            config,
            prior_state,
        } => Ok(serde_json::to_value(
            provider.resource(&type_name)?.plan(&config, prior_state.as_ref())?,
        )?),
        Call::Create {
            type_name,
            planned_state,
        } => {
            provider
                .configured_resource(&type_name, "create")?
                .create(planned_state)
                .await
        }
        Call::Read { type_name, state } => Ok(provider
            .configured_resource(&type_name, "read")?
            .read(state)
            .await?
            .unwrap_or(Json::Null)),
        Call::Update {
            type_name,
            planned_state,
            prior_state,
        } => {
            provider
                .configured_resource(&type_name, "update")?
                .update(planned_state, prior_state)
                .await
        }
        Call::Delete { type_name, state } => {
            provider
                .configured_resource(&type_name, "delete")?
                .delete(state)
                .await?;
            Ok(Json::Null)
        }
        Call::ImportState { type_name, id } => provider
            .configured_resource(&type_name, "import_state")?
            .import_state(&id),
    }
}

/// Decode one request line and answer it
pub async fn handle_line(provider: &NetBoxProvider, line: &str) -> Response {
    let raw: Json = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Discarding malformed request line: {}", e);
            return Response::from_result(
                Json::Null,
                Err(ProviderError::UnsupportedOperation(format!("malformed request: {}", e))),
            );
        }
    };
    let request_id = raw.get("request_id").cloned().unwrap_or(Json::Null);

    let call: Call = match serde_json::from_value(raw) {
        Ok(call) => call,
        Err(e) => {
            return Response::from_result(
                request_id,
                Err(ProviderError::UnsupportedOperation(e.to_string())),
            );
        }
    };

    debug!("Handling {} request {}", call.rpc(), request_id);
    let result = dispatch(provider, call).await;
    if let Err(e) = &result {
        warn!("Request {} failed: {}", request_id, e);
    }
    Response::from_result(request_id, result)
}

/// Serve requests from `input` until EOF, writing responses to `output`
///
/// Returns once every in-flight request has been answered.
pub async fn serve<R, W>(provider: Arc<NetBoxProvider>, input: R, output: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();

    let writer = tokio::spawn(async move {
        let mut output = output;
        while let Some(response) = rx.recv().await {
            let mut line = serde_json::to_vec(&response).map_err(io::Error::other)?;
            line.push(b'\n');
            output.write_all(&line).await?;
            output.flush().await?;
        }
        Ok::<(), io::Error>(())
    });

    let mut lines = input.lines();
    let mut served = 0_u64;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        served += 1;
        let provider = Arc::clone(&provider);
        let tx = tx.clone();
        tokio::spawn(async move {
            let response = handle_line(&provider, &line).await;
            if tx.send(response).is_err() {
                warn!("Response writer closed, dropping response");
            }
        });
    }
    drop(tx);

    writer.await.map_err(io::Error::other)??;
    info!("Input closed after {} requests", served);
    Ok(())
}
