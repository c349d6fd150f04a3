mod commands;
mod completer;

pub use commands::{CommandContext, CommandResult};
pub use completer::UrlguardCompleter;

use std::io::Write;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Editor};
use urlguard_core::colors::PaletteExt;
use urlguard_core::output::{get_formatter, OutputFormat};
use urlguard_core::{CheckClient, Notifier, Settings, WebhookNotifier};

use crate::display::CheckSpinner;

const HISTORY_FILE: &str = ".urlguard_history";

const EXIT_WORDS: &[&str] = &["exit", "quit", "q"];

fn history_path() -> std::path::PathBuf {
    dirs::home_dir()
        .map(|p| p.join(HISTORY_FILE))
        .unwrap_or_else(|| HISTORY_FILE.into())
}

pub struct Repl {
    editor: Editor<UrlguardCompleter, DefaultHistory>,
    context: CommandContext,
}

impl Repl {
    pub fn new(settings: &Settings, output_format: OutputFormat) -> anyhow::Result<Self> {
        let config = rustyline::Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(rustyline::EditMode::Emacs)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(UrlguardCompleter::new()));
        let _ = editor.load_history(&history_path());

        let checker = CheckClient::from_settings(&settings.checker)?;
        let notifier = WebhookNotifier::from_settings(&settings.webhook)?;

        Ok(Self {
            editor,
            context: CommandContext::new(output_format, checker, notifier),
        })
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.print_banner();

        loop {
            let prompt = self.get_prompt();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    self.editor.add_history_entry(line)?;

                    match self.execute_line(line).await {
                        CommandResult::Continue => {}
                        CommandResult::Exit => break,
                        CommandResult::Error(e) => {
                            eprintln!("{} {}", "Error:".alert().bold(), e);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("exit");
                    break;
                }
                Err(err) => {
                    eprintln!("{} {:?}", "Error:".alert().bold(), err);
                    break;
                }
            }
        }

        let _ = self.editor.save_history(&history_path());

        Ok(())
    }

    fn print_banner(&self) {
        println!();
        println!("{}", "=".repeat(50).muted());
        println!(
            "  {} - interactive domain check",
            format!("urlguard v{}", env!("CARGO_PKG_VERSION")).accent().bold()
        );
        println!("{}", "=".repeat(50).muted());
        if self.context.notifier.is_none() {
            println!(
                "  {}",
                "No webhook configured: abnormal results will not be alerted".caution()
            );
        }
        println!(
            "  Type a domain or URL to check it, {} for commands\n",
            "help".ok()
        );
    }

    fn get_prompt(&self) -> String {
        let format_indicator = match self.context.output_format {
            OutputFormat::Human => "",
            OutputFormat::Json => " [json]",
        };
        format!(
            "{}{} ",
            "urlguard".label().bold(),
            format!("{}›", format_indicator).white()
        )
    }

    async fn execute_line(&mut self, line: &str) -> CommandResult {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            return CommandResult::Continue;
        }

        let command = parts[0].to_lowercase();
        let args = &parts[1..];

        match command.as_str() {
            "help" | "?" => {
                self.print_help();
                CommandResult::Continue
            }
            c if EXIT_WORDS.contains(&c) => CommandResult::Exit,
            "check" => match args.first() {
                Some(domain) => self.execute_check(domain).await,
                None => CommandResult::Error("Usage: check <domain|url>".to_string()),
            },
            "set" => self.execute_set(args),
            "clear" => {
                print!("\x1B[2J\x1B[1;1H");
                let _ = std::io::stdout().flush();
                CommandResult::Continue
            }
            // Anything else is the domain or URL to check
            _ => self.execute_check(line).await,
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "CHECK".accent().bold());
        println!("  {:<30} Check a domain or URL", "<domain|url>".label());
        println!("  {:<30} Same, explicitly", "check <domain|url>".label());
        println!();
        println!("{}", "SETTINGS".accent().bold());
        println!("  {:<30} Change output format", "set output <human|json>".label());
        println!("  {:<30} Clear screen", "clear".label());
        println!("  {:<30} Exit the program", "exit | quit | q".label());
        println!();
    }

    async fn execute_check(&self, domain: &str) -> CommandResult {
        let spinner = CheckSpinner::start(domain);

        let notifier = self.context.notifier.as_ref().map(|n| n as &dyn Notifier);
        let outcome = urlguard_core::inspect_domain(&self.context.checker, notifier, domain).await;
        spinner.stop();

        if matches!(self.context.output_format, OutputFormat::Human) {
            println!("{}", "Raw response:".muted());
            let raw = outcome
                .result
                .as_ref()
                .map(|r| serde_json::to_string_pretty(r).unwrap_or_default())
                .unwrap_or_else(|| "null".to_string());
            println!("{}\n", raw);
        }

        let formatter = get_formatter(self.context.output_format);
        println!("{}", formatter.format_outcome(&outcome));
        CommandResult::Continue
    }

    fn execute_set(&mut self, args: &[&str]) -> CommandResult {
        match args {
            ["output", format] => match format.parse::<OutputFormat>() {
                Ok(format) => {
                    self.context.output_format = format;
                    println!("Output format set to {}", format!("{:?}", format).to_lowercase().ok());
                    CommandResult::Continue
                }
                Err(e) => CommandResult::Error(e),
            },
            _ => CommandResult::Error("Usage: set output <human|json>".to_string()),
        }
    }
}
