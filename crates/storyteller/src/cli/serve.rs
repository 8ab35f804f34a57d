//! `storyteller serve`

use storyteller::{StorytellerConfig, build_webhook};
use storyteller_error::StorytellerResult;
use storyteller_webhook::serve;
use tracing::{info, instrument};

/// Run the webhook until Ctrl-C.
#[instrument(skip(config))]
pub async fn serve_webhook(
    config: &StorytellerConfig,
    host: Option<String>,
    port: Option<u16>,
) -> StorytellerResult<()> {
    let mut server = config.server().clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    let addr = server.addr()?;

    let webhook = build_webhook(config)?;
    for endpoint in webhook.endpoints() {
        info!(path = endpoint.path(), mode = %endpoint.config().mode, "Endpoint");
    }

    serve(addr, webhook.router()).await?;
    Ok(())
}
