//! HTTP server for the registry API.
//!
//! A dedicated thread pulls requests off the `tiny_http` listener and hands
//! them to the tokio runtime, which answers each one on the blocking pool.
//! A semaphore caps how many requests are handled at once. The entry store
//! is immutable, so handlers share the router without any locking.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use tiny_http::{Header, Request, Response, Server};
use tokio::sync::{Notify, Semaphore, mpsc};

use crate::api::{ApiResponse, Router};
use crate::config::schema::MAX_WORKERS;
use crate::error::ServerError;

/// Requests buffered between the accept thread and the dispatcher.
const QUEUE_DEPTH: usize = 64;

/// Handle for stopping a running server.
#[derive(Clone)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
    server: Arc<Server>,
}

impl ShutdownHandle {
    /// Signal the server to stop accepting requests.
    pub fn shutdown(&self) {
        self.notify.notify_one();
        self.server.unblock();
    }
}

/// A bound, not yet running, registry server.
pub struct RegistryServer {
    server: Arc<Server>,
    router: Arc<Router>,
    addr: SocketAddr,
    workers: usize,
    notify: Arc<Notify>,
}

impl RegistryServer {
    /// Bind the listener. Port 0 picks a free port; see [`Self::local_addr`].
    ///
    /// `workers` is clamped to `1..=MAX_WORKERS`.
    pub fn bind(addr: SocketAddr, router: Router, workers: usize) -> Result<Self, ServerError> {
        let server = Server::http(addr).map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;

        let addr = server.server_addr().to_ip().ok_or_else(|| ServerError::Bind {
            addr: addr.to_string(),
            reason: "unable to determine bound address".into(),
        })?;

        Ok(Self {
            server: Arc::new(server),
            router: Arc::new(router),
            addr,
            workers: workers.clamp(1, MAX_WORKERS),
            notify: Arc::new(Notify::new()),
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            notify: Arc::clone(&self.notify),
            server: Arc::clone(&self.server),
        }
    }

    /// Serve requests until the shutdown handle fires.
    pub async fn run(self) -> Result<(), ServerError> {
        let (tx, mut rx) = mpsc::channel::<Request>(QUEUE_DEPTH);

        let listener = Arc::clone(&self.server);
        let accept = thread::Builder::new()
            .name("mcpreg-accept".into())
            .spawn(move || {
                while let Ok(request) = listener.recv() {
                    if tx.blocking_send(request).is_err() {
                        break;
                    }
                }
            })?;

        tracing::info!(addr = %self.addr, workers = self.workers, "Registry server listening");

        let permit_count =
            u32::try_from(self.workers).map_err(|e| ServerError::Task(e.to_string()))?;
        let permits = Arc::new(Semaphore::new(self.workers));
        loop {
            tokio::select! {
                _ = self.notify.notified() => break,
                maybe_req = rx.recv() => {
                    let Some(request) = maybe_req else {
                        break;
                    };
                    let permit = Arc::clone(&permits)
                        .acquire_owned()
                        .await
                        .map_err(|e| ServerError::Task(e.to_string()))?;
                    let router = Arc::clone(&self.router);
                    tokio::task::spawn_blocking(move || {
                        respond(&router, request);
                        drop(permit);
                    });
                }
            }
        }

        self.server.unblock();
        rx.close();
        // Let in-flight requests finish before reporting shutdown
        let _drained = permits
            .acquire_many(permit_count)
            .await
            .map_err(|e| ServerError::Task(e.to_string()))?;
        accept
            .join()
            .map_err(|_| ServerError::Task("accept thread panicked".into()))?;

        tracing::info!(addr = %self.addr, "Registry server stopped");
        Ok(())
    }
}

/// Route one request and write the response.
fn respond(router: &Router, request: Request) {
    let method = request.method().to_string();
    let target = request.url().to_string();

    let response = router.handle(&method, &target);
    tracing::debug!(%method, %target, status = response.status, "Handled request");

    if let Err(e) = request.respond(to_http(&response)) {
        tracing::warn!(%method, %target, error = %e, "Failed to write response");
    }
}

fn to_http(response: &ApiResponse) -> Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_vec(&response.body).unwrap_or_else(|_| b"{}".to_vec());
    let mut http = Response::from_data(body).with_status_code(response.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        http = http.with_header(header);
    }
    http
}
