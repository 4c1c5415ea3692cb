use std::process::ExitCode;
use std::sync::Arc;

use devsrv::config::{self, AppState, Config};
use devsrv::logger;
use devsrv::server;

fn main() -> ExitCode {
    let cli_port = match parse_port_arg() {
        Ok(port) => port,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("Usage: devsrv [port]");
            return ExitCode::FAILURE;
        }
    };

    match run(cli_port) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli_port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    // Anchor to the executable's directory before anything touches the
    // filesystem, so a binary dropped into a site folder serves that folder
    // and finds its config there, whatever directory it was launched from.
    std::env::set_current_dir(config::executable_dir()?)?;

    let config = Config::load(cli_port)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = config.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&config)?;

    let root = config.resolve_root()?;
    let addr = config.socket_addr()?;
    let listener = server::create_listener(addr)
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    logger::log_server_start(&addr, &root);

    let state = Arc::new(AppState::new(config, root));
    let shutdown = server::spawn_shutdown_watcher();

    server::start_server_loop(listener, state, shutdown).await;

    Ok(())
}

fn parse_port_arg() -> Result<Option<u16>, String> {
    let Some(arg) = std::env::args().nth(1) else {
        return Ok(None);
    };
    match arg.parse::<u16>() {
        Ok(port) if port > 0 => Ok(Some(port)),
        _ => Err(format!(
            "Invalid port '{arg}': expected a number between 1 and 65535"
        )),
    }
}
