//! fastfile - Zero-copy file region access and fast checksums

use clap::Parser;
use fastfile::cli::{ChecksumArgs, Cli, Commands, ConfigArgs, ReadArgs, StatArgs};
use fastfile::config::Config;
use fastfile::simd::{Checksum, Engine};
use fastfile::{file_stats, map_region, read_range};
use std::io::Write;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Read(args) => handle_read(args, &config)?,
        Commands::Checksum(args) => handle_checksum(args, &config)?,
        Commands::Stat(args) => handle_stat(args)?,
        Commands::Config(args) => handle_config_command(args)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("fastfile=info"),
        1 => EnvFilter::new("fastfile=debug"),
        2 => EnvFilter::new("fastfile=trace"),
        _ => EnvFilter::new("trace"),
    };

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

fn handle_read(args: ReadArgs, config: &Config) -> anyhow::Result<()> {
    let stats = file_stats(&args.file)?;
    let length = match args.length {
        Some(length) => length as usize,
        None => stats.size.saturating_sub(args.offset) as usize,
    };

    let use_mmap = !args.no_mmap && config.should_mmap(stats.size);
    tracing::debug!(
        file = %args.file.display(),
        offset = args.offset,
        length,
        mmap = use_mmap,
        "reading range"
    );

    // Hold the mapped view (when used) until the bytes are written out
    let mapped;
    let buffered;
    let bytes: &[u8] = if use_mmap {
        mapped = map_region(&args.file, args.offset, length)?;
        &mapped
    } else {
        buffered = read_range(&args.file, args.offset, length)?;
        &buffered
    };

    match &args.output {
        Some(path) => std::fs::write(path, bytes)?,
        None => std::io::stdout().write_all(bytes)?,
    }

    Ok(())
}

fn handle_checksum(args: ChecksumArgs, config: &Config) -> anyhow::Result<()> {
    let checksum = if args.scalar {
        Checksum::new(Engine::Scalar)
    } else {
        config.checksum()
    };

    let stats = file_stats(&args.file)?;
    tracing::debug!(
        file = %args.file.display(),
        size = stats.size,
        engine = ?checksum.engine(),
        "computing checksum"
    );

    let hex = if config.should_mmap(stats.size) {
        let region = map_region(&args.file, 0, stats.size as usize)?;
        checksum.digest_hex(&region)
    } else {
        let bytes = read_range(&args.file, 0, stats.size as usize)?;
        checksum.digest_hex(&bytes)
    };

    println!("{}  {}", hex, args.file.display());
    Ok(())
}

fn handle_stat(args: StatArgs) -> anyhow::Result<()> {
    let stats = file_stats(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string(&stats)?);
    } else {
        println!("size: {}", stats.size);
        println!("mtime: {}", stats.mtime);
    }

    Ok(())
}

fn handle_config_command(args: ConfigArgs) -> anyhow::Result<()> {
    if args.path {
        println!("{}", Config::default_config_path()?.display());
    } else if args.init {
        let config = Config::default();
        config.save()?;
        println!(
            "Created default configuration at {}",
            Config::default_config_path()?.display()
        );
    } else {
        let config = Config::load().unwrap_or_default();
        println!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}
