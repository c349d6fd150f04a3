use std::io::Write;
use std::sync::Arc;

use colored::Colorize;
use urlguard_core::colors::PaletteExt;
use urlguard_core::output::{get_formatter, OutputFormat};
use urlguard_core::{MonitorCallback, MonitorEvent, Settings};

pub fn print_monitor_banner(settings: &Settings) {
    println!("{}", "=".repeat(60).muted());
    println!("{}", "urlguard monitor started".accent().bold());
    println!(
        "  {} {}s",
        "interval:".label(),
        settings.check_interval_secs
    );
    println!(
        "  {} {}",
        "domains: ".label(),
        settings.domains_file.display()
    );
    println!("  {} {}", "journal: ".label(), settings.logs_dir.display());
    println!("  Press {} to stop", "Ctrl+C".caution());
    println!("{}", "=".repeat(60).muted());
}

/// Print monitor progress as it happens
pub fn monitor_reporter(format: OutputFormat) -> MonitorCallback {
    let formatter = get_formatter(format);
    let use_json = matches!(format, OutputFormat::Json);

    Arc::new(move |event: &MonitorEvent<'_>| match event {
        MonitorEvent::CycleStarted { domains, timestamp } => {
            if !use_json {
                println!(
                    "\n[{}] {} checking {} domain(s)",
                    timestamp,
                    "🔍".accent(),
                    domains
                );
            }
        }
        MonitorEvent::NoDomains => {
            if !use_json {
                println!(
                    "{} No domains to check, edit the domain list to add some",
                    "⚠".caution()
                );
            }
        }
        MonitorEvent::DomainChecked(outcome) => {
            println!("{}", formatter.format_outcome(outcome));
        }
        MonitorEvent::CycleFinished(summary) => {
            println!("{}", formatter.format_summary(summary));
        }
        MonitorEvent::Sleeping(interval) => {
            if !use_json {
                println!(
                    "{}",
                    format!("Next check in {}s", interval.as_secs()).muted()
                );
            }
            let _ = std::io::stdout().flush();
        }
    })
}
