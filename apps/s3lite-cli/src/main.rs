//! s3lite - file zone access to an S3-compatible object store.
//!
//! # Usage
//!
//! ```text
//! S3LITE_BASE_URL=https://myapp.com/minio S3LITE_ACCESS_KEY=... S3LITE_SECRET_KEY=... \
//!     s3lite put zone-1 boot.cfg ./boot.cfg
//! ```
//!
//! # Commands
//!
//! | Command | Effect |
//! |---------|--------|
//! | `buckets` | Print the raw bucket list document |
//! | `exists <zone>` | Exit 0 if the zone's bucket exists, 1 otherwise |
//! | `ls <zone>` | Print one file name per line |
//! | `put <zone> <name> [file]` | Upload `file` (stdin if omitted) |
//! | `get <zone> <name> [file]` | Download into `file` (stdout if omitted) |
//! | `rm <zone> <name>` | Delete a file |
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `S3LITE_BASE_URL` | *(required)* | Object store base URL |
//! | `S3LITE_ACCESS_KEY` | *(required)* | Access key id |
//! | `S3LITE_SECRET_KEY` | *(required)* | Secret key |
//! | `S3LITE_INSECURE_TLS` | `false` | Accept any TLS certificate |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod command;

use anyhow::{Context, Result};
use s3lite_client::{ClientConfig, S3FileZone};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::command::Command;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = ClientConfig::from_env().context("failed to load object store configuration")?;
    init_tracing(&config.log_level)?;

    info!(
        base_url = %config.base_url,
        insecure_tls = config.insecure_tls,
        version = VERSION,
        "starting s3lite",
    );

    let zone = S3FileZone::activate(&config).context("object store activation failed")?;
    let success = command.run(&zone)?;
    if !success {
        std::process::exit(1);
    }
    Ok(())
}
