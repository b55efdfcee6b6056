//! Runtime configuration.
//!
//! Every option is a command-line flag with an environment-variable fallback.

use clap::builder::RangedU64ValueParser;
use clap::Parser;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3002;
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Product catalog service configuration
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "product-catalog", about = "In-memory product catalog HTTP service")]
pub struct CatalogConfig {
    /// Host to bind to
    #[arg(long, env = "CATALOG_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind to
    #[arg(long, env = "CATALOG_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Capacity of the store actor's request queue
    #[arg(long, env = "CATALOG_BUFFER_SIZE", default_value_t = DEFAULT_BUFFER_SIZE,
          value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub buffer_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CatalogConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
