use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use fakenet::config::{self, Flags};
use fakenet::config_loader;
use fakenet::db::RequestContext;
use fakenet::factory::FakeTopology;
use fakenet::harness::{self, CallLog, FakeDb};
use fakenet::network::NetworkManager;

/// Output encodings for generated records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

/// Generate fake network topologies and resolve instance network info
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML flags file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of networks (one vif each)
    #[arg(short, long, default_value_t = harness::DEFAULT_NUM_NETWORKS)]
    networks: u32,

    /// Fixed IPs per vif
    #[arg(short, long, default_value_t = harness::DEFAULT_IPS_PER_VIF)]
    ips_per_vif: u32,

    /// Floating IPs per fixed IP (topology dump only)
    #[arg(long, default_value_t = 0)]
    floating_ips: u32,

    /// Enable IPv6 on every generated network
    #[arg(long)]
    ipv6: bool,

    /// Print the raw topology instead of the resolved network info
    #[arg(long)]
    topology: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging before the flags file is read
    let default_level = args
        .config
        .as_deref()
        .and_then(config_loader::peek_log_level)
        .unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Starting fakenet");

    let mut flags = match &args.config {
        Some(path) => {
            let unknown = config_loader::check_flags_compatibility(path)?;
            if !unknown.is_empty() {
                info!("Continuing without {} unknown flag key(s)", unknown.len());
            }
            config_loader::load_flags(path)?
        }
        None => Flags::from_env(),
    };
    if args.ipv6 {
        flags.use_ipv6 = true;
    }

    info!(
        "Topology: {} networks, {} ips per vif, ipv6 {}, {:?} manager",
        args.networks, args.ips_per_vif, flags.use_ipv6, flags.network_manager
    );

    let mode = flags.network_manager;
    config::install_flags(flags)?;

    let rendered = if args.topology {
        let topology = FakeTopology::generate(args.networks, args.ips_per_vif, args.floating_ips);
        render(&topology, args.format)?
    } else {
        if args.floating_ips > 0 {
            warn!("--floating-ips only applies to --topology output, ignoring");
        }
        let log = CallLog::new();
        let manager = NetworkManager::new(
            harness::HOST,
            mode,
            FakeDb::new(&log, args.networks, args.ips_per_vif),
        );
        let nw_info = manager
            .get_instance_nw_info(&RequestContext::default(), 0, 0, None)
            .wrap_err("Failed to resolve network info")?;
        info!("Resolved {} vifs", nw_info.len());
        render(&nw_info, args.format)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .wrap_err_with(|| format!("Failed to write output file '{}'", path.display()))?;
            info!("Wrote output to {:?}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered)
}
