use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

mod commands;
mod sack;
mod transaction;

/// Command line options available through the `pkgsack` cli.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Opt {
    /// The subcommand to execute.
    #[clap(subcommand)]
    command: Command,

    /// A `name=path.json` repo metadata dump; may be repeated.
    #[clap(long = "repo", global = true)]
    repos: Vec<String>,

    /// Path to a JSON `RepoMetadata` dump of the installed set.
    #[clap(long, global = true)]
    installed: Option<PathBuf>,

    /// Path to a `SackConfig` TOML document.
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbose.
    #[clap(short, long, global = true)]
    verbose: bool,
}

/// Different commands supported by `pkgsack`.
#[derive(Debug, clap::Subcommand)]
enum Command {
    Query(commands::query::Opt),
    Install(commands::install::Opt),
    Resolve(commands::resolve::Opt),
}

fn main() -> Result<()> {
    let opt = Opt::parse();

    let default_filter = if opt.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let env_filter = EnvFilter::builder().with_default_directive(default_filter.into()).from_env()?;
    tracing_subscriber::fmt().with_env_filter(env_filter).without_time().init();

    let config = sack::load_config(opt.config.as_deref())?;
    let pkg_sack = sack::build_sack(config, &opt.repos, opt.installed.as_deref())?;

    match opt.command {
        Command::Query(query_opt) => commands::query::query(&pkg_sack, query_opt),
        Command::Install(install_opt) => commands::install::install(&pkg_sack, install_opt),
        Command::Resolve(resolve_opt) => commands::resolve::resolve(&pkg_sack, resolve_opt),
    }
}
