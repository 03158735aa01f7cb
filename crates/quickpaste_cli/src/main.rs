//! Command-line shell for creating pastes on a QuickPaste backend.

use anyhow::{anyhow, bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use quickpaste_client::{spawn_backend, Banner, HttpPasteApi, PasteSession, ShellView};
use quickpaste_core::{AppError, Config, ExpiryPreset, LanguageEntry, TITLE_MAX_CHARS};
use serde_json::json;
use std::io::{self, Read};
use std::time::{Duration, Instant};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const ERROR_PAGE_MESSAGE: &str = "Something went wrong loading the language list. Try again later.";

#[derive(Parser)]
#[command(name = "qpaste", about = "QuickPaste CLI", version)]
struct Cli {
    /// Backend base URL (overrides SERVER_URL)
    #[arg(short, long)]
    server: Option<String>,

    /// Public site URL used to print absolute paste links (overrides SITE_URL)
    #[arg(long)]
    site: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// List supported languages
    Langs,
    /// Create a paste from a file or stdin
    New {
        /// Read the body from this file instead of stdin
        #[arg(short, long)]
        file: Option<String>,
        /// Paste title (max 255 chars)
        #[arg(long)]
        title: Option<String>,
        /// Language code from `qpaste langs`
        #[arg(short, long)]
        language: Option<String>,
        /// Expiry: never, 10m, 1h, 1d, 1mo, 6mo, 1y
        #[arg(short, long, default_value = "never")]
        expires: ExpiryPreset,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quickpaste=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_body(file: Option<&str>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn format_languages(entries: &[LanguageEntry], json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(entries)
            .map_err(|err| format!("response encoding error: {}", err));
    }
    let rows: Vec<String> = entries
        .iter()
        .map(|entry| format!("{:<20} {}", entry.language_code, entry.display_name))
        .collect();
    Ok(rows.join("\n"))
}

fn format_created(config: &Config, path: &str, json: bool) -> Result<String, String> {
    let link = config.display_link(path);
    if json {
        let id = path.rsplit('/').next().unwrap_or_default();
        return serde_json::to_string_pretty(&json!({ "id": id, "path": path, "url": link }))
            .map_err(|err| format!("response encoding error: {}", err));
    }
    Ok(format!("Created: {}", link))
}

fn title_warning(view: &ShellView<'_>) -> Option<String> {
    match view {
        ShellView::Form(form) if form.title_over_limit => Some(format!(
            "title is longer than {} characters",
            TITLE_MAX_CHARS
        )),
        _ => None,
    }
}

fn banner_lines(view: &ShellView<'_>) -> Vec<&'static str> {
    match view {
        ShellView::Form(form) => form.banners.iter().copied().map(Banner::message).collect(),
        _ => Vec::new(),
    }
}

/// Block until the session stops waiting on the backend.
fn settle(session: &mut PasteSession, limit: Duration) -> anyhow::Result<()> {
    let deadline = Instant::now() + limit;
    while session.is_pending() {
        if Instant::now() >= deadline {
            bail!("timed out waiting for the backend");
        }
        session.wait_for_event(POLL_INTERVAL);
    }
    Ok(())
}

fn mount_session(config: &Config) -> anyhow::Result<PasteSession> {
    let api = HttpPasteApi::new(config)?;
    let backend = spawn_backend(api)?;
    let mut session = PasteSession::mount(backend)?;
    settle(&mut session, settle_limit(config))?;
    if matches!(session.view(), ShellView::ErrorPage) {
        eprintln!("{}", ERROR_PAGE_MESSAGE);
        std::process::exit(1);
    }
    Ok(session)
}

fn settle_limit(config: &Config) -> Duration {
    Duration::from_secs(config.request_timeout_secs.saturating_add(5))
}

fn exit_with_banners(view: &ShellView<'_>) -> ! {
    for line in banner_lines(view) {
        eprintln!("{}", line);
    }
    std::process::exit(1);
}

fn create_paste(
    config: &Config,
    body: String,
    title: Option<String>,
    language: Option<String>,
    expires: ExpiryPreset,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = mount_session(config)?;

    if let Some(title) = title {
        session.set_title(title)?;
        if let Some(message) = title_warning(&session.view()) {
            warn!("{}", message);
        }
    }
    session.set_body(body)?;
    if let Some(language) = language {
        session.select_language(&language).map_err(|err| match err {
            AppError::UnknownLanguage(code) => anyhow!(
                "unknown language '{}'; run `qpaste langs` to list supported languages",
                code
            ),
            other => other.into(),
        })?;
    }
    session.select_expiry(expires)?;

    match session.submit() {
        Ok(()) => {}
        Err(AppError::BodyRequired) => exit_with_banners(&session.view()),
        Err(err) => return Err(err.into()),
    }
    settle(&mut session, settle_limit(config))?;

    let Some(path) = session.redirect_target() else {
        exit_with_banners(&session.view());
    };
    let output = format_created(config, &path, json).map_err(|message| anyhow!(message))?;
    println!("{}", output);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let Cli {
        server,
        site,
        json,
        timeout,
        command,
    } = Cli::parse();

    let load_config = move || {
        init_tracing();
        Config::from_env().with_overrides(server, site, timeout)
    };

    match command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        Commands::Langs => {
            let config = load_config();
            let session = mount_session(&config)?;
            let entries = match session.view() {
                ShellView::Form(form) => form.languages.to_vec(),
                _ => Vec::new(),
            };
            let output = format_languages(&entries, json).map_err(|message| anyhow!(message))?;
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Commands::New {
            file,
            title,
            language,
            expires,
        } => {
            let config = load_config();
            let body = read_body(file.as_deref())?;
            create_paste(&config, body, title, language, expires, json)?;
        }
    }

    Ok(())
}
