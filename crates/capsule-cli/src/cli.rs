use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "capsule",
    about = "Inspect and edit namespaced values in a Capsule store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON file holding the backing store
    #[arg(long, global = true, default_value = "capsule-store.json")]
    pub store: PathBuf,

    /// Namespace prefix of the capsule
    #[arg(short, long, global = true, default_value = "")]
    pub prefix: String,

    /// TOML file with capsule options
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep dates as plain text instead of rebuilding them
    #[arg(long, global = true)]
    pub no_hydrate_dates: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value stored under a key
    Get(KeyArgs),
    /// Store a value under a key
    Set(SetArgs),
    /// Check whether a key is stored
    Has(KeyArgs),
    /// Remove a key
    Remove(KeyArgs),
    /// List the keys of the capsule
    Keys,
    /// Remove every key of the capsule
    Flush,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    pub key: String,

    /// JSON value; text that is not JSON is stored as a string
    pub value: String,

    /// Parse the value as an ISO-8601 date
    #[arg(long)]
    pub date: bool,
}
