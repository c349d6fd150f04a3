use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;

const COMMANDS: &[&str] = &["help", "exit", "quit", "check", "set", "clear"];

const SET_OPTIONS: &[&str] = &["output"];

const OUTPUT_FORMATS: &[&str] = &["human", "json"];

pub struct UrlguardCompleter;

impl UrlguardCompleter {
    pub fn new() -> Self {
        Self
    }
}

fn pairs(candidates: &[&str], prefix: &str) -> Vec<Pair> {
    candidates
        .iter()
        .filter(|c| c.starts_with(prefix))
        .map(|c| Pair {
            display: c.to_string(),
            replacement: c.to_string(),
        })
        .collect()
}

impl Completer for UrlguardCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();

        if words.is_empty() || (words.len() == 1 && !line_to_cursor.ends_with(' ')) {
            let prefix = words.first().copied().unwrap_or("");
            let start = line_to_cursor.len() - prefix.len();
            return Ok((start, pairs(COMMANDS, prefix)));
        }

        let current_word = if line_to_cursor.ends_with(' ') {
            ""
        } else {
            words.last().copied().unwrap_or("")
        };
        let start = line_to_cursor.len() - current_word.len();

        if words[0].eq_ignore_ascii_case("set") {
            if words.len() == 1 || (words.len() == 2 && !line_to_cursor.ends_with(' ')) {
                return Ok((start, pairs(SET_OPTIONS, current_word)));
            } else if words[1] == "output" {
                return Ok((start, pairs(OUTPUT_FORMATS, current_word)));
            }
        }

        Ok((pos, vec![]))
    }
}

impl Hinter for UrlguardCompleter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if line.is_empty() || pos < line.len() || !line.ends_with(' ') {
            return None;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() != 1 {
            return None;
        }

        match words[0].to_lowercase().as_str() {
            "check" => Some("<domain|url>".to_string()),
            "set" => Some("output <human|json>".to_string()),
            _ => None,
        }
    }
}

impl Highlighter for UrlguardCompleter {}
impl Validator for UrlguardCompleter {}
impl Helper for UrlguardCompleter {}
