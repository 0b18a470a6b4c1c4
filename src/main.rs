use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use texpack::atlas::AtlasBuilder;
use texpack::cli::{CliArgs, CommonArgs, CompressionLevel, DescriptorFormat, PackMode};
use texpack::config::LoadedConfig;
use texpack::output::{save_atlas_image, write_json, write_xml};
use texpack::sprite::load_sprites;

/// Input used when neither the command line nor a config names any
const DEFAULT_INPUT: &str = "./*.png";

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();
    let format = cli.command.format();

    // Load config if specified and merge with CLI args
    let merged = merge_config_with_args(cli.command.args(), format)?;

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(if merged.quiet {
            log::LevelFilter::Warn
        } else if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("texpack v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Input: {}",
        merged
            .input
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!("Output PNG: {}", merged.output.display());
    info!("Descriptor: {}", merged.descriptor.display());
    info!("Mode: {:?}", merged.mode);

    let sprites = load_sprites(&merged.input)?;
    info!("Loaded {} sprites", sprites.len());

    let atlas = AtlasBuilder::new()
        .border(merged.border)
        .mode(merged.mode)
        .trim(merged.trim)
        .sort(merged.sort)
        .build(sprites)?;

    create_parent_dir(&merged.output)?;
    save_atlas_image(&atlas, &merged.output, merged.opaque, merged.compress)?;
    info!("Saved {}", merged.output.display());

    // Descriptors reference the image by file name only
    let image_name = merged
        .output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| merged.output.display().to_string());

    create_parent_dir(&merged.descriptor)?;
    match format {
        DescriptorFormat::Xml => write_xml(&atlas, &merged.descriptor, &image_name)?,
        DescriptorFormat::Json => write_json(&atlas, &merged.descriptor, &image_name)?,
    }
    info!("Generated {}", merged.descriptor.display());

    info!("Done!");

    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input: Vec<PathBuf>,
    output: PathBuf,
    descriptor: PathBuf,
    mode: PackMode,
    border: u32,
    trim: bool,
    sort: bool,
    opaque: bool,
    compress: Option<CompressionLevel>,
    verbose: bool,
    quiet: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CommonArgs, format: DescriptorFormat) -> Result<MergedConfig> {
    // Load config if specified
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Determine input files: CLI > config > default wildcard
    let input = if !args.input.is_empty() {
        args.input.clone()
    } else if let Some(inputs) = loaded_config
        .as_ref()
        .map(LoadedConfig::resolve_inputs)
        .filter(|inputs| !inputs.is_empty())
    {
        inputs
    } else {
        vec![PathBuf::from(DEFAULT_INPUT)]
    };

    // Determine output paths: CLI > config > default
    let output = args.output.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(LoadedConfig::resolve_output)
            .unwrap_or_else(|| PathBuf::from("out.png"))
    });

    let descriptor = args
        .descriptor
        .clone()
        .or_else(|| loaded_config.as_ref().and_then(LoadedConfig::resolve_descriptor))
        .unwrap_or_else(|| format.default_path());

    // For numeric and enum fields: CLI > config > default
    let mode = args.mode.unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.config.mode)
            .unwrap_or_default()
    });

    let border = args.border.unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.config.border)
            .unwrap_or(2)
    });

    // Boolean flags: CLI presence wins, otherwise use config
    let trim = if args.trim {
        true
    } else if let Some(ref lc) = loaded_config {
        lc.config.trim
    } else {
        false
    };

    let sort = if args.sort_off {
        false
    } else if let Some(ref lc) = loaded_config {
        lc.config.sort
    } else {
        true
    };

    let opaque = if args.opaque {
        true
    } else if let Some(ref lc) = loaded_config {
        lc.config.opaque
    } else {
        false
    };

    // Compress: CLI option overrides config
    let compress = if args.compress.is_some() {
        args.compress
    } else if let Some(c) = loaded_config.as_ref().and_then(|lc| lc.config.compress.as_ref()) {
        Some(
            c.level()
                .map_err(|e| anyhow::anyhow!("invalid compress value in config file: {}", e))?,
        )
    } else {
        None
    };

    Ok(MergedConfig {
        input,
        output,
        descriptor,
        mode,
        border,
        trim,
        sort,
        opaque,
        compress,
        verbose: args.verbose,
        quiet: args.quiet,
    })
}
