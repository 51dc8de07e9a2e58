// Streaming session service backing the /sse endpoint

use crate::dispatch::Dispatcher;
use crate::mcp::ToolServer;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub(crate) type SessionService = StreamableHttpService<ToolServer, LocalSessionManager>;

/// Create the session service. Each new session gets its own `ToolServer`
/// handle over the shared dispatcher; the session holds no other state.
pub(crate) fn create_session_service(
    dispatcher: Arc<Dispatcher>,
    keep_alive: Duration,
    cancellation_token: CancellationToken,
) -> SessionService {
    let service_factory = move || Ok(ToolServer::new(dispatcher.clone()));

    StreamableHttpService::new(
        service_factory,
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            stateful_mode: true,
            sse_keep_alive: Some(keep_alive),
            sse_retry: Some(Duration::from_secs(3)),
            cancellation_token,
        },
    )
}
