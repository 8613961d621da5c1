mod analysis;
mod app;
mod collectors;
mod config;
mod error;
mod models;
mod util;

use clap::Parser;
use config::{Config, RunOptions};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "fsgrowth",
    about = "daily filesystem growth tracker and capacity projector",
    version = "0.1"
)]
struct Cli {
    /// Mount path to track (repeatable; default: filesystems from the config file)
    #[arg(short, long = "filesystem", value_name = "MOUNT")]
    filesystem: Vec<String>,

    /// History file path
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Trailing report window in days
    #[arg(short, long, value_name = "DAYS")]
    window: Option<u32>,

    /// Analyze recorded history only, without taking a new sample
    #[arg(long)]
    no_collect: bool,

    /// Hand the report to the local MTA after a successful run
    #[arg(long)]
    send: bool,

    /// Suppress the report on stdout; log errors only
    #[arg(short, long)]
    quiet: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let cfg = Config::load();
    if cli.config {
        print_config(&cfg);
        return;
    }

    let opts = RunOptions {
        filesystems: if cli.filesystem.is_empty() {
            cfg.general.filesystems.clone()
        } else {
            cli.filesystem.clone()
        },
        history_file: cli.history.clone().unwrap_or_else(|| cfg.history_path()),
        window_days: cli.window.unwrap_or(cfg.report.window_days),
        collect: !cli.no_collect,
        send: cli.send,
        quiet: cli.quiet,
        mail: cfg.mail.clone(),
    };

    if opts.filesystems.is_empty() {
        eprintln!("fsgrowth: no filesystems to track (pass --filesystem or list them in the config file)");
        process::exit(1);
    }

    if let Err(err) = app::run(&opts) {
        eprintln!("fsgrowth: {err}");
        process::exit(err.exit_code());
    }
}

fn init_logging(quiet: bool) {
    let default = if quiet { "error" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_config(cfg: &Config) {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  filesystems  = {:?}", cfg.general.filesystems);
    println!("  history_file = {}", cfg.history_path().display());
    println!();
    println!("[report]");
    println!("  window_days = {}", cfg.report.window_days);
    println!();
    println!("[mail]");
    println!("  environment = {:?}", cfg.mail.environment);
    let recipient = if cfg.mail.recipient.is_empty() {
        "(not set)".to_string()
    } else {
        cfg.mail.recipient.clone()
    };
    println!("  recipient   = {}", recipient);
    println!("  sender      = {}", cfg.mail.sender);
}
