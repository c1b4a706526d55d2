//! Stockscan CLI - scan and look up inventory across ERP platforms

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::env;
use std::io::{self, Write};
use std::num::{NonZeroU32, NonZeroUsize};
use stockscan::{
    lookup, provider_by_name, scan, CredentialSource, CredentialStore, Credentials, ProductDetail,
    Provider, Record, ScanLimits, ScanOutcome, ScanQuery, ScanSession, StoreError, StoredEntry,
    PROVIDER_NAMES,
};
use tracing_subscriber::EnvFilter;

/// Output format for scan and get
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON
    Json,
}

/// Platforms with a built-in provider
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    /// Auvo field-service API
    Auvo,
    /// Omie ERP API
    Omie,
}

impl ProviderArg {
    fn name(self) -> &'static str {
        match self {
            ProviderArg::Auvo => "auvo",
            ProviderArg::Omie => "omie",
        }
    }
}

/// Limit presets the scan starts from
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Preset {
    /// One page of 100, up to 20 matches
    Quick,
    /// Ten pages of 50, up to 100 matches
    #[default]
    Standard,
    /// Ten pages of 500, no match cap
    Deep,
}

impl Preset {
    fn limits(self) -> ScanLimits {
        match self {
            Preset::Quick => ScanLimits::quick(),
            Preset::Standard => ScanLimits::standard(),
            Preset::Deep => ScanLimits::deep(),
        }
    }
}

/// Stockscan - fetch-and-filter search over inventory platforms
#[derive(Parser, Debug)]
#[command(name = "stockscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a listing page by page and filter records locally
    Scan(ScanArgs),
    /// Look up one record by its exact code
    Get(GetArgs),
    /// List the built-in listing endpoints
    Endpoints {
        /// Limit the listing to one platform
        #[arg(long, short, value_enum)]
        provider: Option<ProviderArg>,
    },
    /// Remove stored credentials for a platform
    Forget {
        /// Platform to forget
        #[arg(long, short, value_enum)]
        provider: ProviderArg,
    },
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Search term; empty scans everything the caps allow
    #[arg(default_value = "")]
    term: String,

    /// Platform to scan
    #[arg(long, short, value_enum)]
    provider: ProviderArg,

    /// Listing endpoint; defaults to the stored choice, then the built-in default
    #[arg(long, short)]
    endpoint: Option<String>,

    /// Limit preset the overrides below start from
    #[arg(long, value_enum, default_value = "standard")]
    preset: Preset,

    /// Page cap override
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Page size override
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: Option<u32>,

    /// Match cap override; 0 removes the cap
    #[arg(long)]
    max_matches: Option<usize>,

    #[command(flatten)]
    creds: CredentialArgs,

    /// Store the credentials and endpoint choice for later runs
    #[arg(long)]
    save: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    output: OutputFormat,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Exact product code to fetch
    code: String,

    /// Platform to query
    #[arg(long, short, value_enum)]
    provider: ProviderArg,

    #[command(flatten)]
    creds: CredentialArgs,

    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    output: OutputFormat,
}

#[derive(Args, Debug)]
struct CredentialArgs {
    /// API key (Auvo apiKey, Omie app_key)
    #[arg(long)]
    key: Option<String>,

    /// API secret (Auvo apiToken, Omie app_secret)
    #[arg(long)]
    secret: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => run_scan(args).await,
        Commands::Get(args) => run_get(args).await,
        Commands::Endpoints { provider } => run_endpoints(provider),
        Commands::Forget { provider } => run_forget(provider),
    }
}

async fn run_scan(args: ScanArgs) {
    let provider = resolve_provider(args.provider);
    let source = credential_source(provider.name(), &args.creds);

    let endpoint = match &args.endpoint {
        Some(name) => provider.endpoint(name).unwrap_or_else(|| {
            fail(format!(
                "{} has no endpoint '{}'; known endpoints: {}",
                provider.name(),
                name,
                endpoint_names(provider.as_ref()).join(", ")
            ))
        }),
        None => saved_endpoint(&source, provider.name())
            .and_then(|name| provider.endpoint(&name))
            .unwrap_or_else(|| provider.default_endpoint()),
    };

    let credentials = resolve_credentials(&source, provider.name());

    if args.save {
        save_credentials(provider.name(), &credentials, &endpoint.name);
    }

    let limits = merge_limits(
        args.preset.limits(),
        args.max_pages,
        args.page_size,
        args.max_matches,
    );
    let query = ScanQuery::new(args.term).with_limits(limits);

    let session = scan(provider.as_ref(), &credentials, &endpoint, &query).await;

    match args.output {
        OutputFormat::Table => writeln_safe(&format_session(&session)),
        OutputFormat::Json => writeln_safe(&to_json(&session)),
    }

    if session.outcome.is_failure() {
        std::process::exit(1);
    }
}

async fn run_get(args: GetArgs) {
    let provider = resolve_provider(args.provider);
    let source = credential_source(provider.name(), &args.creds);
    let credentials = resolve_credentials(&source, provider.name());

    match lookup(provider.as_ref(), &credentials, &args.code).await {
        Ok(detail) => match args.output {
            OutputFormat::Table => writeln_safe(&format_detail(&detail)),
            OutputFormat::Json => writeln_safe(&to_json(&detail)),
        },
        Err(e) => fail(e.to_string()),
    }
}

fn run_endpoints(choice: Option<ProviderArg>) {
    let names: Vec<&str> = match choice {
        Some(provider) => vec![provider.name()],
        None => PROVIDER_NAMES.to_vec(),
    };

    let mut out = String::new();
    for name in names {
        let Some(provider) = provider_by_name(name) else {
            continue;
        };
        let default = provider.default_endpoint().name;
        out.push_str(name);
        out.push('\n');
        for endpoint in provider.endpoints() {
            if endpoint.name == default {
                out.push_str(&format!("  {} (default)\n", endpoint.name));
            } else {
                out.push_str(&format!("  {}\n", endpoint.name));
            }
        }
    }
    writeln_safe(out.trim_end());
}

fn run_forget(choice: ProviderArg) {
    let store = match CredentialStore::at_default_path() {
        Ok(store) => store,
        Err(e) => fail(e.to_string()),
    };
    if let Err(e) = store.forget(choice.name()) {
        fail(e.to_string());
    }
    eprintln!("Stored credentials for {} removed", choice.name());
}

fn resolve_provider(choice: ProviderArg) -> Box<dyn Provider> {
    provider_by_name(choice.name())
        .unwrap_or_else(|| fail(format!("unknown provider '{}'", choice.name())))
}

/// Where this run's credentials come from: flags, then environment
/// variables, then the local store.
fn credential_source(provider: &str, creds: &CredentialArgs) -> CredentialSource {
    match supplied_credentials(
        creds.key.as_deref(),
        creds.secret.as_deref(),
        env_credentials(provider),
    ) {
        Ok(Some(credentials)) => CredentialSource::Supplied(credentials),
        Ok(None) => match CredentialStore::at_default_path() {
            Ok(store) => CredentialSource::Stored(store),
            Err(e) => fail(e.to_string()),
        },
        Err(message) => fail(message),
    }
}

/// Flags beat the environment. A half-given flag pair is an error rather
/// than a silent fallback.
fn supplied_credentials(
    flag_key: Option<&str>,
    flag_secret: Option<&str>,
    from_env: Option<Credentials>,
) -> Result<Option<Credentials>, &'static str> {
    match (flag_key, flag_secret) {
        (Some(key), Some(secret)) => Ok(Some(Credentials::new(key, secret))),
        (None, None) => Ok(from_env),
        _ => Err("--key and --secret must be given together"),
    }
}

/// Credentials from STOCKSCAN_<PROVIDER>_KEY and _SECRET, if both are set.
fn env_credentials(provider: &str) -> Option<Credentials> {
    let prefix = format!("STOCKSCAN_{}", provider.to_uppercase());
    let key = env::var(format!("{prefix}_KEY")).ok()?;
    let secret = env::var(format!("{prefix}_SECRET")).ok()?;
    Some(Credentials::new(key, secret))
}

fn resolve_credentials(source: &CredentialSource, provider: &str) -> Credentials {
    match source.resolve(provider) {
        Ok(credentials) => credentials,
        Err(StoreError::NoEntry { .. }) => fail(format!(
            "no credentials for {provider}: pass --key and --secret, \
             set STOCKSCAN_{0}_KEY and STOCKSCAN_{0}_SECRET, \
             or store them once with --save",
            provider.to_uppercase()
        )),
        Err(e) => fail(e.to_string()),
    }
}

fn save_credentials(provider: &str, credentials: &Credentials, endpoint: &str) {
    let store = match CredentialStore::at_default_path() {
        Ok(store) => store,
        Err(e) => fail(e.to_string()),
    };
    let entry = StoredEntry {
        key: credentials.key.clone(),
        secret: credentials.secret.clone(),
        endpoint: Some(endpoint.to_string()),
    };
    if let Err(e) = store.save_entry(provider, entry) {
        fail(e.to_string());
    }
    eprintln!(
        "Stored credentials for {} in {}",
        provider,
        store.path().display()
    );
}

/// The endpoint name remembered for this provider, if any.
fn saved_endpoint(source: &CredentialSource, provider: &str) -> Option<String> {
    let CredentialSource::Stored(store) = source else {
        return None;
    };
    store.entry(provider).ok().and_then(|entry| entry.endpoint)
}

fn endpoint_names(provider: &dyn Provider) -> Vec<String> {
    provider.endpoints().into_iter().map(|e| e.name).collect()
}

/// Preset limits with the per-flag overrides applied on top.
fn merge_limits(
    preset: ScanLimits,
    max_pages: Option<u32>,
    page_size: Option<u32>,
    max_matches: Option<usize>,
) -> ScanLimits {
    ScanLimits {
        max_pages: max_pages.and_then(NonZeroU32::new).unwrap_or(preset.max_pages),
        page_size: page_size.and_then(NonZeroU32::new).unwrap_or(preset.page_size),
        max_matches: match max_matches {
            None => preset.max_matches,
            Some(0) => None,
            Some(cap) => NonZeroUsize::new(cap),
        },
    }
}

/// Table plus summary for one finished scan.
fn format_session(session: &ScanSession) -> String {
    let mut out = String::new();
    if !session.matches.is_empty() {
        out.push_str(&format_table(&session.matches));
        out.push('\n');
    }
    out.push_str(&format_summary(session));
    out
}

/// Aligned table over the display fields, skipping columns no record fills.
fn format_table(records: &[Record]) -> String {
    let columns: [(&str, fn(&Record) -> String); 5] = [
        ("ID", |r| text_cell(&r.id)),
        ("NAME", |r| text_cell(&r.name)),
        ("CODE", |r| text_cell(&r.code)),
        ("QTY", |r| number_cell(r.quantity)),
        ("PRICE", |r| number_cell(r.price)),
    ];

    let mut headers: Vec<&str> = Vec::new();
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); records.len()];
    for (header, cell) in columns {
        let cells: Vec<String> = records.iter().map(cell).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        headers.push(header);
        for (row, value) in rows.iter_mut().zip(cells) {
            row.push(value);
        }
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain([header.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &widths, headers.iter().map(|h| h.to_string()));
    for row in rows {
        push_row(&mut out, &widths, row);
    }
    out
}

fn push_row(out: &mut String, widths: &[usize], cells: impl IntoIterator<Item = String>) {
    let mut line = String::new();
    for (cell, width) in cells.into_iter().zip(widths) {
        line.push_str(&format!("{:<width$}  ", cell, width = *width));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn text_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Counter line plus whatever caveat the outcome carries.
fn format_summary(session: &ScanSession) -> String {
    let mut out = format!(
        "{} of {} records matched, {} page{} read",
        session.matches.len(),
        session.records_seen,
        session.pages_read,
        if session.pages_read == 1 { "" } else { "s" },
    );

    match &session.outcome {
        ScanOutcome::EndOfData => {
            if session.is_empty_result() {
                out.push_str("\nno matches; the scan reached the end of the listing");
            }
        }
        ScanOutcome::PageLimit => {
            out.push_str("\nstopped at the page cap; the listing may hold more (--max-pages raises it)");
        }
        ScanOutcome::MatchLimit => {
            out.push_str("\nstopped at the match cap (--max-matches raises it, 0 removes it)");
        }
        ScanOutcome::AuthFailed { message } => {
            out.push_str(&format!("\nauthentication failed: {message}"));
        }
        ScanOutcome::TransportFailed { message } => {
            out.push_str(&format!("\ntransport failure: {message}"));
        }
        ScanOutcome::RemoteError { status, message } => {
            out.push_str(&format!("\nthe platform answered HTTP {status}: {message}"));
        }
    }

    if session.outcome.is_failure() && !session.matches.is_empty() {
        out.push_str("\nmatches above came from pages read before the failure");
    }
    out
}

/// One line per present field of a looked-up product.
fn format_detail(detail: &ProductDetail) -> String {
    let mut lines: Vec<String> = Vec::new();
    push_field(&mut lines, "code", detail.code.clone());
    push_field(&mut lines, "description", detail.description.clone());
    push_field(&mut lines, "unit price", detail.unit_price.map(|v| v.to_string()));
    push_field(&mut lines, "ncm", detail.ncm.clone());
    push_field(&mut lines, "family", detail.family.clone());
    push_field(&mut lines, "origin", detail.origin.clone());
    push_field(&mut lines, "net weight", detail.net_weight.map(|v| v.to_string()));
    lines.push(format!(
        "{:<13}{}",
        "status",
        if detail.active { "active" } else { "inactive" }
    ));
    lines.join("\n")
}

fn push_field(lines: &mut Vec<String>, label: &str, value: Option<String>) {
    if let Some(value) = value {
        lines.push(format!("{label:<13}{value}"));
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| fail(format!("serializing output: {e}")))
}

/// Print an error the way the shell expects and bail.
fn fail(message: impl AsRef<str>) -> ! {
    eprintln!("Error: {}", message.as_ref());
    std::process::exit(1);
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
