use std::sync::Arc;

use anyhow::Context;
use capsule::{Capsule, CapsuleConfig, FileStorage, Value};
use chrono::{DateTime, Utc};
use colored::Colorize;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let store = FileStorage::open(&cli.store)
        .with_context(|| format!("opening store {}", cli.store.display()))?;
    debug!(store = %cli.store.display(), prefix = %cli.prefix, ?config, "opening capsule");
    let mut capsule = Capsule::with_config(
        Arc::new(store),
        cli.prefix.clone(),
        Vec::<(String, Value)>::new(),
        config,
    )?;

    match cli.command {
        Command::Get(args) => cmd_get(&capsule, &args.key),
        Command::Set(args) => cmd_set(&mut capsule, args),
        Command::Has(args) => {
            println!("{}", capsule.has(&args.key)?);
            Ok(())
        }
        Command::Remove(args) => {
            capsule.remove(&args.key)?;
            println!("{} Removed {}", "✓".green(), capsule.prefix_key(&args.key).yellow());
            Ok(())
        }
        Command::Keys => {
            for key in capsule.keys() {
                println!("{key}");
            }
            Ok(())
        }
        Command::Flush => {
            let count = capsule.keys().count();
            capsule.flush()?;
            println!("{} Flushed {} keys from {}", "✓".green().bold(), count, prefix_label(&capsule));
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<CapsuleConfig> {
    let mut config = match &cli.config {
        Some(path) => CapsuleConfig::load(path)?,
        None => CapsuleConfig::default(),
    };
    if cli.no_hydrate_dates {
        config.hydrate_dates = false;
    }
    Ok(config)
}

fn cmd_get(capsule: &Capsule<FileStorage>, key: &str) -> anyhow::Result<()> {
    if !capsule.has(key)? {
        println!("{} {} is not set", "∅".dimmed(), capsule.prefix_key(key).yellow());
        return Ok(());
    }
    let value = capsule.get(key, Value::Undefined)?;
    match &value {
        Value::Date(_) => println!("{} {}", render(&value), "(date)".dimmed()),
        _ => println!("{}", render(&value)),
    }
    Ok(())
}

fn cmd_set(capsule: &mut Capsule<FileStorage>, args: SetArgs) -> anyhow::Result<()> {
    let value = parse_value(&args.value, args.date)?;
    capsule.set(&args.key, value)?;
    println!("{} Saved {}", "✓".green(), capsule.prefix_key(&args.key).yellow());
    Ok(())
}

fn prefix_label(capsule: &Capsule<FileStorage>) -> String {
    if capsule.prefix().is_empty() {
        "(no prefix)".to_string()
    } else {
        capsule.prefix().bold().to_string()
    }
}

/// Interpret a command-line value: a date with `--date`, else JSON, else text.
fn parse_value(raw: &str, date: bool) -> anyhow::Result<Value> {
    if date {
        let dt = DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("not an ISO-8601 date: {raw}"))?;
        return Ok(Value::Date(dt.with_timezone(&Utc)));
    }
    Ok(serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw)))
}

/// JSON rendering for display; strings are quoted so types stay visible.
fn render(value: &Value) -> String {
    match value.to_json() {
        Ok(Some(json)) => json.to_string(),
        Ok(None) => "undefined".to_string(),
        Err(_) => value.to_string(),
    }
}
