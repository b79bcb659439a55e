//! pd - personal data guard
//!
//! The entry point for the `pd` binary:
//! - Password hashing and verification
//! - Redacted logging of user rows
//! - Ad-hoc redaction of `key=value;` messages

use clap::{Args, Parser, Subcommand};
use pd_core::config::AppConfig;
use pd_core::exit_codes::ExitCode;
use pd_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use pd_core::{compose_message, JsonlSource, Result};
use pd_log::{check_logger_name, LogPipeline};
use pd_redact::{FieldSet, RedactionEngine, RedactionSpec, DEFAULT_REDACTION, DEFAULT_SEPARATOR};
use pd_vault::SecretVault;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Personal data guard - keep PII out of logs and plaintext out of storage
#[derive(Parser)]
#[command(name = "pd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Diagnostics level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Diagnostics format (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a password, print the hash and check it verifies
    HashPassword(HashPasswordArgs),

    /// Check a password against a stored hash (password from --password,
    /// PD_PASSWORD or the first line of stdin)
    Verify(VerifyArgs),

    /// Log user rows through the redacting pipeline (to stderr)
    LogUsers(LogUsersArgs),

    /// Redact a message, or each line of stdin, to stdout
    Filter(FilterArgs),
}

#[derive(Args, Debug)]
struct HashPasswordArgs {
    /// Password to hash
    #[arg(long, default_value = "MyAmazingPassw0rd")]
    password: String,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Stored PHC hash string
    #[arg(long)]
    hash: String,

    /// Candidate password; prefer PD_PASSWORD or stdin, argv is visible to other users
    #[arg(long, env = "PD_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Args, Debug)]
struct LogUsersArgs {
    /// JSON lines file with user rows, `-` for stdin
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Logger name shown in every line (no '=', ';' or whitespace)
    #[arg(long, value_parser = parse_logger_name)]
    logger: Option<String>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Comma-separated fields to redact (default: name,email,phone,ssn,password)
    #[arg(long, value_delimiter = ',')]
    fields: Option<Vec<String>>,

    /// Separator between pairs
    #[arg(long, default_value_t = DEFAULT_SEPARATOR)]
    separator: char,

    /// Replacement text for redacted values
    #[arg(long, default_value = DEFAULT_REDACTION)]
    redaction: String,

    /// Message to redact; reads stdin lines when absent
    message: Option<String>,
}

fn parse_logger_name(name: &str) -> std::result::Result<String, String> {
    check_logger_name(name, DEFAULT_SEPARATOR)
        .map(|()| name.to_string())
        .map_err(str::to_string)
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => cli.global.log_level,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let outcome = match cli.command {
        Commands::HashPassword(args) => run_hash_password(&args),
        Commands::Verify(args) => run_verify(&args),
        Commands::LogUsers(args) => run_log_users(&args),
        Commands::Filter(args) => run_filter(&args),
    };

    let code = match outcome {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("pd: {}", err);
            err.exit_code()
        }
    };
    code.into()
}

fn run_hash_password(args: &HashPasswordArgs) -> Result<ExitCode> {
    let config = AppConfig::from_env()?;
    let vault = SecretVault::with_params(config.vault)?;
    let hash = vault.hash(&args.password)?;
    tracing::debug!(params = ?vault.params(), "hashed password");

    let mut out = io::stdout().lock();
    writeln!(out, "{}", hash)?;
    writeln!(out, "{}", vault.verify(&hash, &args.password))?;
    Ok(ExitCode::Clean)
}

fn run_verify(args: &VerifyArgs) -> Result<ExitCode> {
    let candidate = match &args.password {
        Some(password) => password.clone(),
        None => read_password(io::stdin().lock())?,
    };
    let matched = SecretVault::new().verify(&args.hash, &candidate);
    writeln!(io::stdout().lock(), "{}", matched)?;
    Ok(if matched {
        ExitCode::Clean
    } else {
        ExitCode::Mismatch
    })
}

/// First line of `reader`, without its line terminator.
fn read_password(mut reader: impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(len);
    Ok(line)
}

fn run_log_users(args: &LogUsersArgs) -> Result<ExitCode> {
    let config = AppConfig::from_env()?;
    let input = args.input.clone().unwrap_or(config.rows);
    let name = args.logger.clone().unwrap_or(config.logger_name);

    let logger = LogPipeline::builder(name).sink(io::stderr()).build()?;
    let source = JsonlSource::open(&input)?;

    let mut count = 0usize;
    for row in source {
        logger.info(&compose_message(&row?))?;
        count += 1;
    }
    tracing::debug!(rows = count, input = %input.display(), "logged user rows");
    Ok(ExitCode::Clean)
}

fn run_filter(args: &FilterArgs) -> Result<ExitCode> {
    let fields = match &args.fields {
        Some(names) => FieldSet::new(names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()))?,
        None => FieldSet::pii(),
    };
    let spec = RedactionSpec::new(fields, args.redaction.as_str(), args.separator)?;
    let engine = RedactionEngine::new(spec);

    let mut out = io::stdout().lock();
    match &args.message {
        Some(message) => writeln!(out, "{}", engine.filter(message))?,
        None => {
            for line in io::stdin().lock().lines() {
                writeln!(out, "{}", engine.filter(&line?))?;
            }
        }
    }
    Ok(ExitCode::Clean)
}
