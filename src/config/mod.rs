mod state;
mod types;

pub use state::AppState;
pub use types::{Config, FilesConfig, LoggingConfig, ServerConfig};

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

impl Config {
    /// Loads configuration from defaults, an optional `devsrv.toml` next to
    /// the working directory, and the command-line port override (highest
    /// priority).
    pub fn load(cli_port: Option<u16>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("devsrv").required(false))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("files.directory_listing", true)?;

        if let Some(port) = cli_port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        builder.build()?.try_deserialize()
    }

    /// The address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("invalid listen address: {e}"))
    }

    /// Resolves the directory files are served from.
    ///
    /// A configured `files.root` wins; otherwise the server anchors itself to
    /// the directory the executable lives in, so a build dropped into a site
    /// folder serves that folder no matter where it was launched from.
    pub fn resolve_root(&self) -> io::Result<PathBuf> {
        let root = match self.files.root.as_deref() {
            Some(path) => PathBuf::from(path),
            None => executable_dir()?,
        };
        root.canonicalize()
    }
}

/// Directory the running executable sits in.
pub fn executable_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(PathBuf::from).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "executable path has no parent directory",
        )
    })
}
