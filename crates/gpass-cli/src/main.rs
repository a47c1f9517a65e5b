//! gpass2keepass: convert a GPass 0.5.x password file to KeePassX XML
//!
//! Usage:
//!   gpass2keepass [--config FILE] [--encoding LABEL] <input.gps> <output.xml>
//!
//! The master password is prompted for on the terminal unless
//! `GPASS_PASSWORD` is set. The output file is NOT encrypted.

mod keepassx;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use encoding_rs::Encoding;
use gpass_core::config::{GpassConfig, OutputConfig};
use gpass_core::GpassError;
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use tracing::info;

const PLAINTEXT_WARNING: &str = "\
Note: this will write an *unencrypted* XML file of your passwords for
importing them into KeePass. Please make sure the target file is
accessible only by you (and preferably on an encrypted file system
or tmpfs).
";

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "gpass2keepass",
    version,
    about = "Convert a GPass password file to KeePassX XML"
)]
struct Cli {
    /// Encrypted GPass file (usually ~/.gpass/passwords.gps)
    input: PathBuf,

    /// Destination KeePassX XML file
    output: PathBuf,

    /// Path to config.toml (default: ~/.config/gpass2keepass/config.toml)
    #[arg(long, short = 'c', env = "GPASS_CONFIG")]
    config: Option<PathBuf>,

    /// Charset the GPass file was written in (overrides config and locale)
    #[arg(long, short = 'e')]
    encoding: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides config
    #[arg(long, env = "GPASS_LOG")]
    log: Option<String>,

    /// Log format; overrides config
    #[arg(long, env = "GPASS_LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Usage errors exit 1; --help and --version keep clap's behaviour
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = load_config(&config_path)?;

    let level = cli.log.as_deref().unwrap_or(&config.log.level);
    let format = match &cli.log_format {
        Some(format) => format.clone(),
        None => parse_log_format(&config.log.format)?,
    };
    init_logging(level, &format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "gpass2keepass starting"
    );

    config.output.validate()?;
    let encoding = resolve_encoding(cli.encoding.as_deref(), &config)?;

    let password = std::env::var("GPASS_PASSWORD").ok().map(SecretString::from);
    convert(&cli, &config.output, encoding, password)
}

/// `password` is prompted for on the terminal when `None`.
fn convert(
    cli: &Cli,
    output: &OutputConfig,
    encoding: &'static Encoding,
    password: Option<SecretString>,
) -> Result<()> {
    let data = std::fs::read(&cli.input)
        .with_context(|| format!("reading GPass file: {}", cli.input.display()))?;

    eprintln!("{PLAINTEXT_WARNING}");
    let password = match password {
        Some(password) => password,
        None => SecretString::from(
            rpassword::prompt_password("Please enter your GPass master password: ")
                .context("reading master password")?,
        ),
    };

    let entries = gpass_format::import_data(&data, &password, encoding).map_err(|e| match e {
        GpassError::Password => anyhow::anyhow!(
            "wrong password or not a GPass 1.1.0 file: {}",
            cli.input.display()
        ),
        other => anyhow::Error::new(other)
            .context(format!("decoding GPass file: {}", cli.input.display())),
    })?;

    let xml = keepassx::render(&entries, output)?;
    write_private(&cli.output, xml.as_bytes(), output.file_mode)
        .with_context(|| format!("writing XML: {}", cli.output.display()))?;

    info!(
        entries = entries.len(),
        encoding = encoding.name(),
        output = %cli.output.display(),
        "conversion complete"
    );
    println!("Wrote {} entries to {}", entries.len(), cli.output.display());
    Ok(())
}

// ── Config loading ────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<GpassConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config: {}", path.display()))
    } else {
        Ok(GpassConfig::default())
    }
}

fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_default();
    PathBuf::from(home).join(".config/gpass2keepass/config.toml")
}

/// CLI flag > config file > locale environment
fn resolve_encoding(flag: Option<&str>, config: &GpassConfig) -> Result<&'static Encoding> {
    let label = flag.or(config.import.source_encoding.as_deref());
    match label {
        Some(label) => Ok(gpass_format::encoding_for_label(label)?),
        None => Ok(gpass_format::locale_encoding()),
    }
}

fn parse_log_format(s: &str) -> Result<LogFormat> {
    LogFormat::from_str(s, true)
        .map_err(|e| anyhow::anyhow!("invalid log format {s:?} in config: {e}"))
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

/// Write `data` to `path`, restricting permissions to `mode` on Unix.
///
/// An existing file is truncated and its permissions tightened too.
fn write_private(path: &Path, data: &[u8], mode: u32) -> Result<()> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(mode))?;
    }

    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}
