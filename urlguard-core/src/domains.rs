//! Monitored domain list, re-read from disk on every cycle.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, UrlguardError};

const TEMPLATE: &str = "\
# Domain list
# One domain or URL per line. Lines starting with # are comments and are skipped.
# Edits take effect on the next check cycle, no restart needed.

# Examples (replace with the domains you want to monitor)
# www.example.com
# https://shop.example.org/landing
";

/// Parse domain list content: trimmed, non-empty, non-comment lines in file order
pub fn parse_domain_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// File-backed domain list
#[derive(Debug, Clone)]
pub struct DomainList {
    path: PathBuf,
}

impl DomainList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the commented template if the list does not exist yet.
    ///
    /// Returns `true` when the template was created.
    pub fn bootstrap_if_missing(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, TEMPLATE)?;
        debug!(path = %self.path.display(), "Wrote domain list template");
        Ok(true)
    }

    /// Read the current list.
    ///
    /// A missing file is replaced by the template and reported as
    /// [`UrlguardError::DomainListCreated`]. Any other read failure is logged
    /// and yields an empty list.
    pub fn load(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_domain_list(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.bootstrap_if_missing()?;
                Err(UrlguardError::DomainListCreated(self.path.clone()))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read domain list");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let content = r#"
# header comment
a.example

   b.example
#c.example
  # indented comment
https://d.example/path
"#;

        let domains = parse_domain_list(content);
        assert_eq!(
            domains,
            vec!["a.example", "b.example", "https://d.example/path"]
        );
    }

    #[test]
    fn test_parse_order_independent_of_interleaving() {
        let valid = ["one.example", "two.example", "three.example"];
        let layouts = [
            "one.example\ntwo.example\nthree.example",
            "# x\n\none.example\n# y\ntwo.example\n\n\nthree.example\n# z",
            "\n\n\none.example\ntwo.example\n#\n#\nthree.example\n",
        ];

        for layout in layouts {
            assert_eq!(parse_domain_list(layout), valid);
        }
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        let domains = parse_domain_list("a.example\na.example\n");
        assert_eq!(domains, vec!["a.example", "a.example"]);
    }

    #[test]
    fn test_template_has_no_active_entries() {
        assert!(parse_domain_list(TEMPLATE).is_empty());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domains.txt");
        fs::write(&path, "# list\na.example\nb.example\n").unwrap();

        let list = DomainList::new(&path);
        assert_eq!(list.load().unwrap(), vec!["a.example", "b.example"]);
    }

    #[test]
    fn test_load_missing_file_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("domains.txt");

        let list = DomainList::new(&path);
        let result = list.load();

        assert!(matches!(result, Err(UrlguardError::DomainListCreated(p)) if p == path));
        assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
    }

    #[test]
    fn test_bootstrap_leaves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domains.txt");
        fs::write(&path, "a.example\n").unwrap();

        let list = DomainList::new(&path);
        assert!(!list.bootstrap_if_missing().unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "a.example\n");
    }

    #[test]
    fn test_unreadable_list_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file
        let list = DomainList::new(dir.path());
        assert!(list.load().unwrap().is_empty());
    }

    #[test]
    fn test_edits_visible_on_next_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domains.txt");
        fs::write(&path, "a.example\n").unwrap();

        let list = DomainList::new(&path);
        assert_eq!(list.load().unwrap(), vec!["a.example"]);

        fs::write(&path, "b.example\nc.example\n").unwrap();
        assert_eq!(list.load().unwrap(), vec!["b.example", "c.example"]);
    }
}
