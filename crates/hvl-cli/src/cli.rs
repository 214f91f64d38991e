use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hvl",
    about = "Harvest Provenance Ledger — provenance records for agricultural production",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the ledger session file.
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Caller identity (hex ActorId) for this invocation.
    #[arg(long = "as", value_name = "IDENTITY", global = true)]
    pub caller: Option<String>,

    /// Path to a toml config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a new ledger session file
    Init(InitArgs),
    /// Generate a fresh actor identity
    Identity,
    /// Register a new produce batch
    Create(CreateArgs),
    /// Show one record
    Show(ShowArgs),
    /// List all records
    List,
    /// Verify a record against an expected cultivator
    Verify(VerifyArgs),
    /// Transfer record ownership
    Transfer(TransferArgs),
    /// Grant verification access
    Grant(GrantArgs),
    /// Revoke verification access
    Revoke(RevokeArgs),
    /// Append classification tags
    Append(AppendArgs),
    /// Overwrite a record's fields
    Modify(ModifyArgs),
    /// Delete a record
    Purge(PurgeArgs),
    /// Activate the emergency restriction
    Restrict(RestrictArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Protocol authority identity (hex). Defaults to the caller.
    #[arg(long)]
    pub authority: Option<String>,
    /// Overwrite an existing session file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub volume: u64,
    #[arg(short, long)]
    pub origin: String,
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: u64,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub id: u64,
    /// Expected cultivator identity (hex).
    #[arg(long)]
    pub expect: String,
}

#[derive(Args)]
pub struct TransferArgs {
    pub id: u64,
    /// Recipient identity (hex).
    #[arg(long)]
    pub to: String,
}

#[derive(Args)]
pub struct GrantArgs {
    pub id: u64,
    /// Grantee identity (hex).
    #[arg(long)]
    pub to: String,
}

#[derive(Args)]
pub struct RevokeArgs {
    pub id: u64,
    /// Identity (hex) whose access to revoke.
    #[arg(long)]
    pub target: String,
}

#[derive(Args)]
pub struct AppendArgs {
    pub id: u64,
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct ModifyArgs {
    pub id: u64,
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub volume: u64,
    #[arg(short, long)]
    pub origin: String,
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct PurgeArgs {
    pub id: u64,
}

#[derive(Args)]
pub struct RestrictArgs {
    pub id: u64,
}
