use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sbomsource::config::{ConfigOverrides, SourceConfig, DEFAULT_CONFIG_FILE};
use sbomsource::error::SourceError;
use sbomsource::output::{self, OutputFormat};

#[derive(Parser)]
#[command(
    name = "sbom-source",
    about = "Validate SBOM source configuration and describe scan sources",
    version,
    author
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the source configuration and print the normalized result
    Validate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,
    },

    /// Describe a directory, file, or image reference
    Describe {
        /// Directory, file, or image reference
        target: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "json")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Generate a starter .sbom-source.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Explain config keys with restricted values
    Fields,
}

#[derive(Args)]
struct SourceArgs {
    /// Config file path
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_FILE, env = "SBOM_SOURCE_CONFIG")]
    config: PathBuf,

    /// Name of the source being described
    #[arg(long, env = "SBOM_SOURCE_NAME")]
    name: Option<String>,

    /// Version of the source being described
    #[arg(long = "source-version", env = "SBOM_SOURCE_VERSION")]
    version: Option<String>,

    /// Supplier of the source
    #[arg(long, env = "SBOM_SOURCE_SUPPLIER")]
    supplier: Option<String>,

    /// SBOM author as Type:Name[:Email] (repeatable)
    #[arg(long = "author", env = "SBOM_SOURCE_AUTHORS")]
    authors: Vec<String>,

    /// Explicit source type (dir, file, registry, docker, podman, ...)
    #[arg(long, env = "SBOM_SOURCE_SOURCE")]
    source: Option<String>,

    /// Prefix applied to every reported file path
    #[arg(long, env = "SBOM_SOURCE_BASE_PATH")]
    base_path: Option<PathBuf>,

    /// File digest algorithm (repeatable)
    #[arg(long = "digest", env = "SBOM_SOURCE_FILE_DIGESTS", value_delimiter = ',')]
    digests: Vec<String>,

    /// Default image pull source (registry, docker, podman)
    #[arg(long, env = "SBOM_SOURCE_IMAGE_DEFAULT_PULL_SOURCE")]
    default_pull_source: Option<String>,

    /// Max bytes read from one image layer (e.g. 500MB)
    #[arg(long, env = "SBOM_SOURCE_IMAGE_MAX_LAYER_SIZE")]
    max_layer_size: Option<String>,
}

impl SourceArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            name: self.name.clone(),
            version: self.version.clone(),
            supplier: self.supplier.clone(),
            authors: non_empty(&self.authors),
            source: self.source.clone(),
            base_path: self.base_path.clone(),
            digests: non_empty(&self.digests),
            default_pull_source: self.default_pull_source.clone(),
            max_layer_size: self.max_layer_size.clone(),
        }
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Validate { source, format } => cmd_validate(source, format),
        Commands::Describe {
            target,
            source,
            format,
            output,
        } => cmd_describe(target, source, format, output),
        Commands::Init { force } => cmd_init(force),
        Commands::Fields => cmd_fields(),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn parse_format(format_str: &str, fallback: OutputFormat) -> OutputFormat {
    OutputFormat::from_str_lenient(format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using {:?}", format_str, fallback);
        fallback
    })
}

fn cmd_validate(source: SourceArgs, format_str: String) -> Result<i32, SourceError> {
    let format = parse_format(&format_str, OutputFormat::Console);
    let settings = sbomsource::load_settings(&source.config, &source.overrides())?;
    let rendered = output::render_settings(&settings, format)?;
    println!("{}", rendered);
    Ok(0)
}

fn cmd_describe(
    target: String,
    source: SourceArgs,
    format_str: String,
    output_path: Option<PathBuf>,
) -> Result<i32, SourceError> {
    let format = parse_format(&format_str, OutputFormat::Json);
    let settings = sbomsource::load_settings(&source.config, &source.overrides())?;
    let description = sbomsource::describe(&settings, &target)?;
    let rendered = output::render_description(&description, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => println!("{}", rendered),
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, SourceError> {
    let path = PathBuf::from(DEFAULT_CONFIG_FILE);

    if path.exists() && !force {
        eprintln!("{} already exists. Use --force to overwrite.", DEFAULT_CONFIG_FILE);
        return Ok(1);
    }

    std::fs::write(&path, SourceConfig::starter_toml())?;
    println!("Created {}", DEFAULT_CONFIG_FILE);

    Ok(0)
}

fn cmd_fields() -> Result<i32, SourceError> {
    for (key, description) in SourceConfig::describe_fields() {
        println!("{}", key);
        for line in description.lines() {
            println!("    {}", line);
        }
        println!();
    }
    Ok(0)
}
