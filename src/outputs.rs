//! Step outputs back to the invoking pipeline.
//!
//! The runner picks outputs up as `key=value` lines appended to the
//! file named by `GITHUB_OUTPUT`; older runners use the legacy
//! `::set-output` stdout command instead. Failures are surfaced as an
//! `::error::` workflow annotation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;
use crate::reconcile::Outcome;

/// Heredoc delimiter for multiline output values.
const EOF_MARKER: &str = "__RELEASE_SYNC_EOF__";

/// Destination for step outputs.
#[derive(Debug)]
pub struct OutputSink {
    path: Option<PathBuf>,
}

impl OutputSink {
    /// Sink writing to the runner-provided output file, when configured.
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os("GITHUB_OUTPUT")
                .map(PathBuf::from)
                .filter(|p| !p.as_os_str().is_empty()),
        }
    }

    /// Sink writing to an explicit file.
    pub fn to_file(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Set one output value.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        match &self.path {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                if value.contains('\n') {
                    writeln!(file, "{key}<<{EOF_MARKER}\n{value}\n{EOF_MARKER}")?;
                } else {
                    writeln!(file, "{key}={value}")?;
                }
            }
            None => println!("::set-output name={key}::{value}"),
        }
        Ok(())
    }

    /// Publish the outcome triple, in the order downstream steps read it.
    pub fn publish(&self, outcome: &Outcome) -> Result<()> {
        self.set("id", &outcome.id.to_string())?;
        self.set("html_url", &outcome.html_url)?;
        self.set("upload_url", &outcome.upload_url)?;
        Ok(())
    }
}

/// Report the run's failure reason as a workflow error annotation.
pub fn report_failure(message: &str) {
    println!("::error::{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_appends_triple_in_order() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let sink = OutputSink::to_file(file.path().to_path_buf());

        let outcome = Outcome {
            id: 42,
            html_url: "https://github.com/owner/repo/releases/v1".to_string(),
            upload_url: "https://uploads.github.com/repos/owner/repo/releases/42/assets".to_string(),
        };
        sink.publish(&outcome).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            written,
            "id=42\n\
             html_url=https://github.com/owner/repo/releases/v1\n\
             upload_url=https://uploads.github.com/repos/owner/repo/releases/42/assets\n"
        );
    }

    #[test]
    fn multiline_value_uses_heredoc_form() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let sink = OutputSink::to_file(file.path().to_path_buf());

        sink.set("notes", "line one\nline two").unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            written,
            format!("notes<<{EOF_MARKER}\nline one\nline two\n{EOF_MARKER}\n")
        );
    }

    #[test]
    fn set_appends_to_existing_content() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "earlier=1\n").unwrap();
        let sink = OutputSink::to_file(file.path().to_path_buf());

        sink.set("id", "7").unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(written, "earlier=1\nid=7\n");
    }
}
