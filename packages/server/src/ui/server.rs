//! Server execution logic.

use std::{future::Future, io, net::SocketAddr, sync::Arc};

use tokio::{net::TcpListener, sync::watch};

use crate::usecase::ChatRoom;

use super::{
    error::ServerError,
    handler::{http::admin_router, tcp::handle_stream},
    listen_addr::ListenAddr,
    signal::shutdown_signal,
    state::AppState,
};

/// Chat relay server
///
/// Owns the bound listening socket(s); events of accepted connections are
/// dispatched to the shared [`ChatRoom`].
///
/// # Example
///
/// ```ignore
/// let chat_room = Arc::new(ChatRoom::new(Arc::new(InMemoryConnectionRegistry::new())));
/// let server = Server::bind(&"tcp://:9000".parse()?, chat_room).await?;
/// server.run().await?;
/// ```
pub struct Server {
    listener: TcpListener,
    admin_listener: Option<TcpListener>,
    chat_room: Arc<ChatRoom>,
}

impl Server {
    /// Bind the chat listener.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if the address cannot be bound
    /// (e.g. the port is already in use).
    pub async fn bind(
        listen_addr: &ListenAddr,
        chat_room: Arc<ChatRoom>,
    ) -> Result<Self, ServerError> {
        let listener = bind_first(listen_addr).await?;

        Ok(Self {
            listener,
            admin_listener: None,
            chat_room,
        })
    }

    /// Also serve the admin HTTP API on `addr` (e.g. "127.0.0.1:9001")
    pub async fn with_admin(mut self, addr: &str) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        self.admin_listener = Some(listener);
        Ok(self)
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn admin_addr(&self) -> Option<SocketAddr> {
        self.admin_listener
            .as_ref()
            .and_then(|listener| listener.local_addr().ok())
    }

    /// Run until Ctrl+C or SIGTERM
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(shutdown_signal()).await
    }

    /// Accept connections until `shutdown` resolves.
    ///
    /// Each accepted connection gets its own task; tasks of different
    /// connections run in parallel on the runtime's workers. Accept errors
    /// are logged and the loop keeps going.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let Server {
            listener,
            admin_listener,
            chat_room,
        } = self;

        tracing::info!("Chatroom server is running.");
        tracing::info!("Listening on tcp://{}", listener.local_addr()?);

        let (stop_tx, stop_rx) = watch::channel(false);

        // Admin HTTP API (optional)
        let admin_task = match admin_listener {
            Some(admin_listener) => {
                tracing::info!("Admin API listening on http://{}", admin_listener.local_addr()?);
                let app = admin_router(Arc::new(AppState {
                    chat_room: chat_room.clone(),
                }));
                let mut stop_rx = stop_rx.clone();
                Some(tokio::spawn(async move {
                    let result = axum::serve(admin_listener, app)
                        .with_graceful_shutdown(async move {
                            let _ = stop_rx.wait_for(|stop| *stop).await;
                        })
                        .await;
                    if let Err(e) = result {
                        tracing::error!("Admin API error: {}", e);
                    }
                }))
            }
            None => None,
        };

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let chat_room = chat_room.clone();
                        tokio::spawn(async move {
                            handle_stream(stream, peer, chat_room).await;
                        });
                    }
                    Err(e) => tracing::warn!("Failed to accept connection: {}", e),
                },
            }
        }

        let _ = stop_tx.send(true);
        if let Some(admin_task) = admin_task {
            let _ = admin_task.await;
        }

        tracing::info!(
            "Server shutdown complete ({} connection(s) still open)",
            chat_room.connection_count().await
        );

        Ok(())
    }
}

/// Bind the first host of `listen_addr` that accepts, reporting the last failure
async fn bind_first(listen_addr: &ListenAddr) -> Result<TcpListener, ServerError> {
    let mut last_error = None;
    for host in listen_addr.bind_hosts() {
        match TcpListener::bind((host, listen_addr.port())).await {
            Ok(listener) => return Ok(listener),
            Err(e) => {
                tracing::debug!("Failed to bind {}:{}: {}", host, listen_addr.port(), e);
                last_error = Some(e);
            }
        }
    }

    Err(ServerError::Bind {
        addr: listen_addr.to_string(),
        source: last_error
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no host to bind")),
    })
}
