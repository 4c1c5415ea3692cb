// Connection handling module
// Serves a single accepted TCP connection.

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve an accepted connection on its own task.
///
/// The accept loop never waits on a connection: each one is wrapped in
/// `TokioIo`, handed to hyper's HTTP/1 connection driver, and served until
/// the peer closes or errors.
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    let state = Arc::clone(state);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let state = Arc::clone(&state);
            async move { handler::handle_request(req, state, peer_addr).await }
        });

        if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
            logger::log_connection_error(&e);
        }
    });
}
