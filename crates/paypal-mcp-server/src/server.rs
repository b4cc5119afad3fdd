use crate::catalog;
use crate::config::ServerConfig;
use crate::mcp::{error_codes, Message, Payload, Protocol, Registry, Transport};
use anyhow::{Context, Result};
use paypal_api::PayPalClient;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, span, Instrument, Level};

const SERVER_NAME: &str = "PayPal";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The main MCP server: a dispatcher over the capability registry, connected
/// to a framed transport.
#[derive(Clone)]
pub struct PayPalMcpServer {
    client: Arc<PayPalClient>,
    registry: Arc<Registry>,
}

impl PayPalMcpServer {
    /// Creates a new `PayPalMcpServer` from configuration: builds the API
    /// client and the registry from the static catalog filtered by the
    /// enablement map.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let client = PayPalClient::new(paypal_api::Config::new(
            config.access_token.clone(),
            config.sandbox,
        ))
        .context("failed to build PayPal API client")?;

        let registry = Registry::build(catalog::capabilities(), &config.actions)
            .context("failed to build capability registry")?;
        info!(tools = registry.len(), "Registered tools");

        Ok(Self {
            client: Arc::new(client),
            registry: Arc::new(registry),
        })
    }

    /// Assembles a server from pre-built parts. Used by tests to point the
    /// client at a local mock API.
    pub fn with_parts(client: PayPalClient, registry: Registry) -> Self {
        Self {
            client: Arc::new(client),
            registry: Arc::new(registry),
        }
    }

    /// Runs the server over stdio until the input stream closes.
    pub async fn run(self) -> Result<()> {
        info!("PayPal MCP Server running on stdio");
        self.serve(Transport::stdio()).await
    }

    /// Connects the dispatcher to a transport and processes messages until
    /// the input stream ends, then waits for in-flight handlers so every
    /// received message still gets its response before the transport closes.
    /// Each message is handled on its own task so one slow handler cannot
    /// starve message intake; responses correlate by id.
    pub async fn serve<R, W>(&self, transport: Transport<R, W>) -> Result<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        transport.on_message(move |message| {
            let _ = tx.send(message);
        });
        transport.on_error(|e| error!(error = %e, "Transport error"));
        transport.on_close(|| info!("Transport closed"));
        transport.start()?;

        let mut inflight = JoinSet::new();
        loop {
            tokio::select! {
                received = rx.recv() => {
                    let Some(message) = received else { break };
                    self.spawn_dispatch(&mut inflight, &transport, message);
                }
                _ = transport.wait_until_input_done() => break,
            }
        }

        // Messages decoded before the input ended may still be queued; every
        // one of them gets its response before the writer goes away.
        while let Ok(message) = rx.try_recv() {
            self.spawn_dispatch(&mut inflight, &transport, message);
        }
        while inflight.join_next().await.is_some() {}
        transport.close();

        info!("Input stream closed. Shutting down.");
        Ok(())
    }

    fn spawn_dispatch<R, W>(
        &self,
        inflight: &mut JoinSet<()>,
        transport: &Transport<R, W>,
        message: Message,
    ) where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let server = self.clone();
        let transport = transport.clone();
        inflight.spawn(async move {
            if let Some(response) = server.dispatch(message).await {
                if let Err(e) = transport.send(&response).await {
                    error!(error = %e, "Failed to send response");
                }
            }
        });
    }

    /// Routes one inbound message to a response. Pure with respect to the
    /// transport, so tests can exercise it directly.
    pub async fn dispatch(&self, message: Message) -> Option<Message> {
        let request_span = span!(Level::INFO, "request", request_id = %message.id);
        async move {
            match message.payload {
                Payload::Ping => Some(self.ping_response(message.id)),
                Payload::Request(request) => Some(
                    self.handle_request(message.id, &request.method, request.params)
                        .await,
                ),
                Payload::Response(_) => {
                    // The protocol is request/response; inbound responses have
                    // no meaning here.
                    debug!("Ignoring inbound response message");
                    None
                }
            }
        }
        .instrument(request_span)
        .await
    }

    fn ping_response(&self, id: Value) -> Message {
        debug!("Responding to ping");
        let result = json!({
            "id": id.clone(),
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "capabilities": self.registry.methods(),
        });
        Protocol::success_response(id, result)
    }

    async fn handle_request(&self, id: Value, method: &str, params: Value) -> Message {
        debug!(method, "Handling request");

        let Some(capability) = self.registry.get(method) else {
            return Protocol::error_response(
                id,
                error_codes::METHOD_NOT_FOUND,
                "Method not found",
                Some(json!(format!("Method '{method}' not found"))),
            );
        };

        // Absent params mean an empty object.
        let params = if params.is_null() { json!({}) } else { params };

        if let Err(violations) = capability.schema.validate(&params) {
            return Protocol::error_response(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params: {}", violations.join("; ")),
                Some(json!(violations)),
            );
        }

        match capability.handler.execute(&self.client, params).await {
            Ok(result) => Protocol::success_response(id, result),
            Err(e) => {
                error!(method, code = e.code, error = %e.message, "Tool execution failed");
                let (message, data) = if e.code == error_codes::INTERNAL_ERROR {
                    ("Internal error".to_string(), Some(json!(e.message)))
                } else {
                    (format!("Invalid params: {}", e.message), None)
                };
                Protocol::error_response(id, e.code, message, data)
            }
        }
    }
}
