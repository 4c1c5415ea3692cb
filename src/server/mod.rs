// Server module entry
// Listener setup, the accept loop, per-connection serving, and signals.

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file maps to server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export the pieces main wires together
pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use signal::spawn_shutdown_watcher;
