//! Command-line interface.

pub mod check;
pub mod completions;
pub mod output;
pub mod resolve;
pub mod secrets;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::vault::Vault;
use crate::error::Result;

/// warren - Browse and edit a tree of sops-encrypted secrets.
#[derive(Parser)]
#[command(
    name = "warren",
    about = "Browse and edit a tree of sops-encrypted secrets",
    version
)]
pub struct Cli {
    /// Store root directory (defaults to the current directory)
    #[arg(long, global = true, env = "WARREN_ROOT")]
    pub root: Option<PathBuf>,

    /// sops binary to run
    #[arg(long, global = true, env = "WARREN_SOPS")]
    pub sops: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// List secrets in the store
    List {
        /// Only list secrets in this namespace (and below)
        #[arg(short, long)]
        namespace: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a decrypted secret
    Get {
        /// Full or short secret name
        name: String,
        /// Print one field, e.g. `.db.password`
        #[arg(short, long)]
        field: Option<String>,
    },

    /// Create a secret or update its fields
    #[command(after_help = "\
VALUE forms:
  .db.password: hunter2      set one field
  .db.password: null         remove one field
  'user: admin\\nport: 5432'  structured YAML, merged field by field
  hunter2                    plain value, stored under 'value'
  -                          read VALUE from stdin")]
    Set {
        /// Full or short secret name
        name: String,
        /// Value to write (`-` reads stdin)
        #[arg(required_unless_present = "file")]
        value: Option<String>,
        /// Read a YAML or JSON document instead of VALUE
        #[arg(long, conflicts_with = "value")]
        file: Option<PathBuf>,
        /// Show the operations without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a secret file
    Rm {
        /// Full or short secret name
        name: String,
    },

    /// Show which file a name resolves to
    Resolve {
        /// Full or short secret name
        name: String,
    },

    /// Report whether files are sops-encrypted
    Check {
        /// Files to classify
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Store selection shared by every command that opens the store.
#[derive(Debug, Clone)]
pub struct Context {
    pub root: PathBuf,
    pub sops: Option<String>,
}

impl Context {
    fn from_cli(root: Option<PathBuf>, sops: Option<String>) -> Self {
        Self {
            root: root.unwrap_or_else(|| PathBuf::from(".")),
            sops,
        }
    }

    /// Open the selected store.
    pub fn open(&self) -> Result<Vault> {
        Vault::open_with_binary(&self.root, self.sops.as_deref())
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let ctx = Context::from_cli(cli.root, cli.sops);

    match cli.command {
        List { namespace, json } => secrets::list(&ctx, namespace.as_deref(), json),
        Get { name, field } => secrets::get(&ctx, &name, field.as_deref()),
        Set {
            name,
            value,
            file,
            dry_run,
        } => secrets::set(&ctx, &name, value.as_deref(), file.as_deref(), dry_run),
        Rm { name } => secrets::rm(&ctx, &name),
        Resolve { name } => resolve::execute(&ctx, &name),
        Check { files } => check::execute(&files),
        Completions { shell } => completions::execute(shell),
    }
}
