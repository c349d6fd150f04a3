mod display;
mod repl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use urlguard_core::colors::PaletteExt;
use urlguard_core::output::OutputFormat;
use urlguard_core::{
    CheckClient, DomainList, Journal, Monitor, MonitorConfig, Settings, WebhookNotifier,
};

#[derive(Parser)]
#[command(name = "urlguard")]
#[command(about = "Domain block monitor - validation checks, webhook alerts, daily journals")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format (human or json)
    #[arg(short, long, default_value = "human", global = true)]
    format: String,

    /// Config file (TOML). Defaults to ./urlguard.toml when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every domain in the list on an interval until Ctrl+C
    Monitor,
    /// Check the given domains once
    Check {
        /// Domains or URLs to check
        #[arg(required = true)]
        domains: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Some(Commands::Monitor) => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let output_format: OutputFormat = cli.format.parse().unwrap_or_default();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Monitor) => run_monitor(settings, output_format).await,
        Some(Commands::Check { domains }) => run_check(settings, output_format, domains).await,
        None => {
            // Start the interactive checker
            let mut repl = repl::Repl::new(&settings, output_format)?;
            repl.run().await
        }
    }
}

async fn run_monitor(settings: Settings, output_format: OutputFormat) -> anyhow::Result<()> {
    // Fail before touching anything else when alerts could not be delivered
    settings.require_webhook()?;

    let domains = DomainList::new(&settings.domains_file);
    if domains.bootstrap_if_missing()? {
        println!(
            "{} Created {}. Add the domains to monitor, then run again.",
            "📝".accent(),
            domains.path().display()
        );
        return Ok(());
    }

    let checker = CheckClient::from_settings(&settings.checker)?;
    let notifier = WebhookNotifier::from_settings(&settings.webhook)?
        .ok_or_else(|| anyhow::anyhow!("webhook.url is not configured"))?;
    let journal = Journal::new(&settings.logs_dir);
    let config = MonitorConfig::from_settings(&settings);

    display::print_monitor_banner(&settings);

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let monitor = Monitor::new(
        domains,
        Box::new(checker),
        Box::new(notifier),
        journal,
        config,
    )
    .with_callback(display::monitor_reporter(output_format));

    let cycles = monitor.run(cancel_rx).await;

    println!("\n{} Monitor stopped after {} cycle(s)", "👋".accent(), cycles);
    Ok(())
}

async fn run_check(
    settings: Settings,
    output_format: OutputFormat,
    domains: Vec<String>,
) -> anyhow::Result<()> {
    let checker = CheckClient::from_settings(&settings.checker)?;
    let notifier = WebhookNotifier::from_settings(&settings.webhook)?;
    if notifier.is_none() {
        tracing::warn!("webhook.url is not configured, abnormal results will not be alerted");
    }

    let formatter = urlguard_core::output::get_formatter(output_format);
    urlguard_core::inspect_domains(
        &checker,
        notifier.as_ref().map(|n| n as &dyn urlguard_core::Notifier),
        &domains,
        settings.request_spacing(),
        |outcome| println!("{}", formatter.format_outcome(outcome)),
    )
    .await;

    Ok(())
}
