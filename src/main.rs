/// Version injected at compile time via AZD_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("AZD_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{bail, Context, Result};
use azd::azure::auth::{self, StaticTokenCredential};
use azd::azure::client::ArmClient;
use azd::config::{Config, OutputFormat};
use azd::describer::{self, CallbackSink, DescribeContext};
use azd::table::{self, Qual, Row};
use azd::{DescribeError, ResourceKind};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Describe Azure resources and query them as tables
#[derive(Parser, Debug)]
#[command(name = "azd", version = VERSION, about, long_about = None)]
struct Args {
    /// Azure subscription to describe
    #[arg(short, long, global = true)]
    subscription: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Resource kinds described at the same time
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available tables
    Tables,

    /// Describe every resource of one or more kinds ("all" for every kind)
    Describe {
        /// ARM resource types, e.g. Microsoft.Network/loadBalancers
        #[arg(required = true)]
        kinds: Vec<String>,

        /// Print resources as they are produced instead of all at the end
        #[arg(long)]
        stream: bool,
    },

    /// List the rows of a table
    List {
        table: String,

        /// Keep only rows where column equals value
        #[arg(long = "where", value_name = "COLUMN=VALUE")]
        quals: Vec<Qual>,
    },

    /// Fetch one row of a table by its key columns
    Get {
        table: String,

        /// Key columns, e.g. name=nic1 resource_group=rg
        #[arg(required = true, value_name = "KEY=VALUE")]
        keys: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("azd {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("azd").join("azd.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".azd").join("azd.log");
    }
    PathBuf::from("azd.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    if let Err(err) = run(args).await {
        tracing::error!("{:#}", err);
        match err.downcast_ref::<DescribeError>() {
            Some(e) => eprintln!("Error: {}", e.user_message()),
            None => eprintln!("Error: {err:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load();
    let output = config.effective_output(args.output);

    if let Command::Tables = args.command {
        let tables: Vec<Value> = table::get_all_table_names()
            .into_iter()
            .filter_map(|name| {
                table::get_table(name).map(|t| {
                    json!({ "name": name, "kind": t.kind, "description": t.description })
                })
            })
            .collect();
        return print(output, &tables);
    }

    let ctx = connect(&args, &config)?;

    // Ctrl-C cancels whatever is running
    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            cancel.cancel();
        }
    });

    match args.command {
        Command::Tables => Ok(()),
        Command::Describe { kinds, stream } => {
            let kinds = parse_kinds(&kinds)?;
            if stream {
                describe_streaming(&ctx, &kinds, output).await
            } else {
                let concurrency = config.effective_concurrency(args.concurrency);
                let described = describer::describe_many(&ctx, &kinds, concurrency).await?;
                let by_kind: Vec<Value> = described
                    .into_iter()
                    .map(|(kind, resources)| json!({ "kind": kind, "resources": resources }))
                    .collect();
                print(output, &by_kind)
            }
        }
        Command::List { table: name, quals } => {
            let mut stdout = std::io::stdout();
            let mut first = true;
            table::list(&ctx, &name, &quals, |row| {
                write_record(&mut stdout, output, &row, first)?;
                first = false;
                Ok(())
            })
            .await?;
            Ok(())
        }
        Command::Get { table: name, keys } => {
            let keys = parse_keys(&keys)?;
            let row = table::get(&ctx, &name, &keys).await?;
            if row.is_none() {
                tracing::info!("No row in {} matches {:?}", name, keys);
            }
            write_lookup(&mut std::io::stdout(), output, row.as_ref())
        }
    }
}

/// Build the ARM client from flags, config and environment
fn connect(args: &Args, config: &Config) -> Result<DescribeContext> {
    let subscription = config
        .effective_subscription(args.subscription.as_deref())
        .context("No subscription configured. Set AZURE_SUBSCRIPTION_ID, run 'az login' or use --subscription")?;

    if !auth::validate_subscription_id(&subscription) {
        bail!("Invalid subscription ID '{}': expected a GUID", subscription);
    }

    tracing::info!(
        "Using subscription: {}, endpoint: {}",
        subscription,
        config.effective_endpoint()
    );

    let credential = Arc::new(StaticTokenCredential::from_env()?);
    let client =
        ArmClient::new(&subscription, credential)?.with_endpoint(config.effective_endpoint())?;

    Ok(DescribeContext::with_cancel(client, CancellationToken::new()))
}

fn parse_kinds(kinds: &[String]) -> Result<Vec<ResourceKind>> {
    if kinds.iter().any(|k| k.eq_ignore_ascii_case("all")) {
        return Ok(ResourceKind::ALL.to_vec());
    }

    kinds
        .iter()
        .map(|k| k.parse::<ResourceKind>().map_err(anyhow::Error::from))
        .collect()
}

fn parse_keys(keys: &[String]) -> Result<BTreeMap<String, String>> {
    keys.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => bail!("Expected KEY=VALUE, got '{}'", pair),
        })
        .collect()
}

/// Print every resource as soon as the describer hands it over
async fn describe_streaming(
    ctx: &DescribeContext,
    kinds: &[ResourceKind],
    output: OutputFormat,
) -> Result<()> {
    let mut stdout = std::io::stdout();
    let mut first = true;

    for kind in kinds {
        let mut sink = CallbackSink::new(|resource| {
            write_record(&mut stdout, output, &resource, first)?;
            first = false;
            Ok(())
        });
        describer::describe_into(ctx, *kind, &mut sink).await?;
    }

    Ok(())
}

/// One record per line (JSON) or per document (YAML)
fn write_record<W: Write, T: Serialize>(
    out: &mut W,
    output: OutputFormat,
    record: &T,
    first: bool,
) -> Result<()> {
    match output {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(record)?)?,
        OutputFormat::Yaml => {
            if !first {
                writeln!(out, "---")?;
            }
            write!(out, "{}", serde_yaml::to_string(record)?)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// A lookup that found nothing prints nothing and is not an error
fn write_lookup<W: Write>(out: &mut W, output: OutputFormat, row: Option<&Row>) -> Result<()> {
    match row {
        Some(row) => write_record(out, output, row, true),
        None => Ok(()),
    }
}

fn print<T: Serialize>(output: OutputFormat, value: &T) -> Result<()> {
    let text = match output {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", text.trim_end());
    Ok(())
}
