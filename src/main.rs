use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use asset_semver::asset::{self, AssetKind, AssetType, detect_asset_kind};
use asset_semver::config::{self, Config};
use asset_semver::package::{convert_manifest, read_manifest};
use asset_semver::semver::detect;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asset-semver")]
#[command(version, about = "Convert npm/bower versions into Composer constraints")]
struct Cli {
    /// Config file, defaults to $XDG_CONFIG_HOME/asset-semver/config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to the data directory instead of stderr
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert single versions
    Version {
        #[arg(short, long, value_enum, default_value_t = AssetChoice::Npm)]
        asset: AssetChoice,
        #[arg(required = true)]
        versions: Vec<String>,
    },
    /// Convert a version range
    Range {
        #[arg(short, long, value_enum, default_value_t = AssetChoice::Npm)]
        asset: AssetChoice,
        range: String,
    },
    /// Convert one declared dependency, including VCS locations
    Dependency {
        #[arg(short, long, value_enum, default_value_t = AssetChoice::Npm)]
        asset: AssetChoice,
        name: String,
        version: String,
    },
    /// Convert a package.json or bower.json into a Composer package
    Manifest {
        /// Asset type, detected from the file name when omitted
        #[arg(short, long, value_enum)]
        asset: Option<AssetChoice>,
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AssetChoice {
    Npm,
    Bower,
}

impl From<AssetChoice> for AssetKind {
    fn from(choice: AssetChoice) -> Self {
        match choice {
            AssetChoice::Npm => AssetKind::Npm,
            AssetChoice::Bower => AssetKind::Bower,
        }
    }
}

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    converted: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Version { asset, versions } => {
            let asset = enabled_asset(&config, asset.into())?;
            let converter = asset.version_converter();
            let mut output = Vec::with_capacity(versions.len());
            for version in &versions {
                output.push(VersionOutput {
                    version,
                    converted: converter.convert_version(version)?,
                });
            }
            print_json(&output)
        }
        Command::Range { asset, range } => {
            let asset = enabled_asset(&config, asset.into())?;
            println!("{}", asset.version_converter().convert_range(&range)?);
            Ok(())
        }
        Command::Dependency {
            asset,
            name,
            version,
        } => {
            let asset = enabled_asset(&config, asset.into())?;
            print_json(&detect(asset.as_ref(), &name, &version)?)
        }
        Command::Manifest { asset, path } => {
            let kind = match asset {
                Some(choice) => choice.into(),
                None => manifest_kind(&path)?,
            };
            let asset = enabled_asset(&config, kind)?;

            info!("Converting {} manifest {}", kind.as_str(), path.display());
            let manifest = read_manifest(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            let package = convert_manifest(asset.as_ref(), &manifest, &config.conversion.options())?;
            print_json(&package)
        }
    }
}

fn init_logging(to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if !to_file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return Ok(None);
    }

    let log_path = config::log_path();
    let log_dir = log_path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let file_name = log_path
        .file_name()
        .context("Log path has no file name")?;

    let appender = tracing_appender::rolling::never(log_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn enabled_asset(config: &Config, kind: AssetKind) -> anyhow::Result<Box<dyn AssetType>> {
    if !config.assets.is_enabled(kind) {
        bail!("Asset type '{}' is disabled in the config", kind.as_str());
    }
    Ok(asset::asset_type(kind))
}

fn manifest_kind(path: &Path) -> anyhow::Result<AssetKind> {
    match detect_asset_kind(path) {
        Some(kind) => Ok(kind),
        None => bail!(
            "Cannot detect asset type of {}, pass --asset",
            path.display()
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
