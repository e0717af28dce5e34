//! warren - Browse and edit a tree of sops-encrypted secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use warren::cli::output;
use warren::cli::{execute, Cli};
use warren::error::{Error, ResolveError, StoreError, ToolError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("WARREN_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("warren=debug")
        } else {
            EnvFilter::new("warren=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Resolve(ResolveError::NotFound { .. }) => Some("run: warren list".to_string()),
            Error::Resolve(ResolveError::Collision { candidates, .. }) => candidates
                .first()
                .map(|c| format!("use the full name, e.g. warren get {}", c.name)),
            Error::Tool(ToolError::NotFound(_)) => {
                Some("install sops 3.9+ or pass --sops <path>".to_string())
            }
            Error::Store(StoreError::Unindexed(_)) => {
                Some("encrypt the file with sops or choose another name".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
