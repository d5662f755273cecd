use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Extra bytes allowed on top of `max_upload_bytes` for multipart framing
/// (boundaries, part headers, small form fields).
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Server configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub bind_address: IpAddr,

    /// TCP port (default: 3000)
    pub port: u16,

    /// Flat directory holding uploaded files (default: "uploads")
    pub storage_dir: PathBuf,

    /// General static assets served at the document root (default: "public")
    pub public_dir: PathBuf,

    /// Stylesheet assets served at the document root (default: "styling")
    pub styling_dir: PathBuf,

    /// Maximum accepted upload size in bytes (default: 10 MB)
    pub max_upload_bytes: usize,

    /// Title shown on the listing page (default: "CS Library")
    pub site_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            storage_dir: PathBuf::from("uploads"),
            public_dir: PathBuf::from("public"),
            styling_dir: PathBuf::from("styling"),
            max_upload_bytes: 10 * 1024 * 1024, // 10 MB
            site_title: "CS Library".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            bind_address: env::var("BIND_ADDRESS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.bind_address),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.storage_dir),

            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.public_dir),

            styling_dir: env::var("STYLING_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.styling_dir),

            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_bytes),

            site_title: env::var("SITE_TITLE").unwrap_or(default.site_title),
        }
    }

    /// Loopback-only config for local development
    pub fn development() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            ..Self::default()
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Request body ceiling handed to axum. The per-file limit is enforced
    /// while streaming, so this only has to stop runaway bodies.
    pub fn request_body_limit(&self) -> usize {
        self.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}
