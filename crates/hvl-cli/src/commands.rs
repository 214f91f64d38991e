use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};
use colored::Colorize;

use hvl_registry::{RecordDraft, RegistryError};
use hvl_types::{ActorId, AssetRecord, SequenceId};

use crate::cli::*;
use crate::config::{CliConfig, DEFAULT_LEDGER_PATH};
use crate::session::Session;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::load_default()?,
    };
    let ledger_path = cli
        .ledger
        .clone()
        .or_else(|| config.ledger.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH));

    match cli.command {
        Command::Identity => cmd_identity()?,
        Command::Init(ref args) => cmd_init(&ledger_path, &cli, &config, args)?,
        Command::Show(ref args) => cmd_show(&ledger_path, args)?,
        Command::List => cmd_list(&ledger_path)?,
        ref command => {
            let caller = resolve_caller(&cli, &config)?;
            let session = Session::open(&ledger_path)?;
            let ctx = session.context(caller);
            match command {
                Command::Create(args) => {
                    let id = coded(session.registry().create_record(
                        &ctx,
                        RecordDraft::new(
                            args.name.clone(),
                            args.volume,
                            args.origin.clone(),
                            args.tags.clone(),
                        ),
                    ))?;
                    session.save()?;
                    println!(
                        "{} Record {} registered at height {}",
                        "✓".green().bold(),
                        id.to_string().yellow(),
                        session.height()
                    );
                }
                Command::Verify(args) => {
                    let expected = parse_actor(&args.expect)?;
                    let report = coded(session.registry().verify_authenticity(
                        &ctx,
                        SequenceId::new(args.id),
                        &expected,
                    ))?;
                    session.save()?;
                    let verdict = if report.is_authentic {
                        "authentic".green().bold()
                    } else {
                        "NOT authentic".red().bold()
                    };
                    println!("Record {} is {}", args.id.to_string().yellow(), verdict);
                    println!(
                        "  height: {}  age: {}  cultivator match: {}",
                        report.current_height,
                        report.age,
                        report.cultivator_match
                    );
                }
                Command::Transfer(args) => {
                    let recipient = parse_actor(&args.to)?;
                    coded(session.registry().transfer_ownership(
                        &ctx,
                        SequenceId::new(args.id),
                        &recipient,
                    ))?;
                    session.save()?;
                    println!(
                        "{} Record {} transferred to {}",
                        "✓".green().bold(),
                        args.id.to_string().yellow(),
                        recipient.short_id().cyan()
                    );
                }
                Command::Grant(args) => {
                    let grantee = parse_actor(&args.to)?;
                    coded(session.registry().grant_access(
                        &ctx,
                        SequenceId::new(args.id),
                        &grantee,
                    ))?;
                    session.save()?;
                    println!(
                        "{} Access to record {} granted to {}",
                        "✓".green().bold(),
                        args.id.to_string().yellow(),
                        grantee.short_id().cyan()
                    );
                }
                Command::Revoke(args) => {
                    let target = parse_actor(&args.target)?;
                    coded(session.registry().revoke_access(
                        &ctx,
                        SequenceId::new(args.id),
                        &target,
                    ))?;
                    session.save()?;
                    println!(
                        "{} Access to record {} revoked for {}",
                        "✓".green().bold(),
                        args.id.to_string().yellow(),
                        target.short_id().cyan()
                    );
                }
                Command::Append(args) => {
                    let merged = coded(session.registry().append_metadata(
                        &ctx,
                        SequenceId::new(args.id),
                        args.tags.clone(),
                    ))?;
                    session.save()?;
                    println!(
                        "{} Record {} tags: {}",
                        "✓".green().bold(),
                        args.id.to_string().yellow(),
                        merged.join(", ")
                    );
                }
                Command::Modify(args) => {
                    coded(session.registry().modify_record(
                        &ctx,
                        SequenceId::new(args.id),
                        RecordDraft::new(
                            args.name.clone(),
                            args.volume,
                            args.origin.clone(),
                            args.tags.clone(),
                        ),
                    ))?;
                    session.save()?;
                    println!(
                        "{} Record {} modified",
                        "✓".green().bold(),
                        args.id.to_string().yellow()
                    );
                }
                Command::Purge(args) => {
                    coded(
                        session
                            .registry()
                            .purge_record(&ctx, SequenceId::new(args.id)),
                    )?;
                    session.save()?;
                    println!(
                        "{} Record {} purged",
                        "✓".green().bold(),
                        args.id.to_string().yellow()
                    );
                }
                Command::Restrict(args) => {
                    coded(
                        session
                            .registry()
                            .activate_emergency_restriction(&ctx, SequenceId::new(args.id)),
                    )?;
                    session.save()?;
                    println!(
                        "{} Record {} placed under emergency restriction",
                        "✓".green().bold(),
                        args.id.to_string().yellow()
                    );
                }
                // Handled above.
                Command::Identity | Command::Init(_) | Command::Show(_) | Command::List => {
                    unreachable!()
                }
            }
        }
    }
    Ok(())
}

fn cmd_identity() -> anyhow::Result<()> {
    let id = ActorId::ephemeral();
    println!("{}", id.to_hex());
    println!("  short: {}", id.short_id().cyan());
    Ok(())
}

fn cmd_init(path: &Path, cli: &Cli, config: &CliConfig, args: &InitArgs) -> anyhow::Result<()> {
    let authority = match &args.authority {
        Some(hex) => parse_actor(hex)?,
        None => resolve_caller(cli, config)
            .map_err(|_| anyhow!("init needs --authority, --as, or a config identity"))?,
    };
    Session::init(path, authority, args.force)?;
    println!(
        "{} Initialized ledger in {}",
        "✓".green().bold(),
        path.display().to_string().bold()
    );
    println!("  Authority: {}", authority.short_id().cyan());
    Ok(())
}

fn cmd_show(path: &Path, args: &ShowArgs) -> anyhow::Result<()> {
    let session = Session::open(path)?;
    match session.registry().record(SequenceId::new(args.id)) {
        Some(record) => print_record(args.id, &record),
        None => bail!("error[{}]: record not found", RegistryError::ResourceNotFound.code()),
    }
    Ok(())
}

fn cmd_list(path: &Path) -> anyhow::Result<()> {
    let session = Session::open(path)?;
    let snapshot = session.registry().snapshot();
    if snapshot.records.is_empty() {
        println!("No records.");
        return Ok(());
    }
    for entry in &snapshot.records {
        let marker = if entry.record.restricted {
            "⚠".red().to_string()
        } else {
            " ".into()
        };
        println!(
            "{}{}  {}  {} ({} units) — {}",
            marker,
            entry.id.to_string().yellow(),
            entry.record.cultivator.short_id().cyan(),
            entry.record.produce_name.bold(),
            entry.record.volume,
            entry.record.tags.join(", ")
        );
    }
    Ok(())
}

fn print_record(id: u64, record: &AssetRecord) {
    println!("Record {}", id.to_string().yellow().bold());
    println!("  Produce:    {}", record.produce_name.bold());
    println!("  Cultivator: {}", record.cultivator.short_id().cyan());
    println!("  Volume:     {}", record.volume);
    println!("  Origin:     {}", record.origin);
    println!("  Registered: height {}", record.registered_at);
    println!("  Tags:       {}", record.tags.join(", "));
    if record.restricted {
        println!("  {}", "Under emergency restriction".red().bold());
    }
}

/// The caller for this invocation: `--as` wins over the config identity.
fn resolve_caller(cli: &Cli, config: &CliConfig) -> anyhow::Result<ActorId> {
    let hex = cli
        .caller
        .as_deref()
        .or(config.identity.as_deref())
        .ok_or_else(|| anyhow!("no caller identity: pass --as <hex> or set identity in hvl.toml"))?;
    parse_actor(hex)
}

fn parse_actor(hex: &str) -> anyhow::Result<ActorId> {
    ActorId::from_hex(hex).map_err(|e| anyhow!("invalid identity {hex:?}: {e}"))
}

/// Surface registry failures as their wire codes.
fn coded<T>(result: Result<T, RegistryError>) -> anyhow::Result<T> {
    result.map_err(|e| anyhow!("error[{}]: {}", e.code(), e))
}
