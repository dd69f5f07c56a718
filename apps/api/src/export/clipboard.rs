//! Copy rendered pages to the system clipboard.
//!
//! Rich HTML is attempted first; if the sink cannot take it, the plain-text
//! rendition of the same pages is copied instead.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::render::{pages_html, pages_text, Page};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard does not accept {0}")]
    Unsupported(&'static str),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} exited with an error")]
    Exit(&'static str),

    #[error("Nothing to copy")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    Html,
    Text,
}

pub trait ClipboardSink: Send + Sync {
    fn write(&self, representation: Representation, content: &str) -> Result<(), ClipboardError>;
}

/// Tries HTML, then text. Returns the representation that was accepted.
pub fn copy_pages(pages: &[Page], sink: &dyn ClipboardSink) -> Result<Representation, ClipboardError> {
    if pages.is_empty() {
        return Err(ClipboardError::Empty);
    }
    match sink.write(Representation::Html, &pages_html(pages)) {
        Ok(()) => Ok(Representation::Html),
        Err(e) => {
            warn!("Rich clipboard copy failed, falling back to text: {e}");
            sink.write(Representation::Text, &pages_text(pages))?;
            Ok(Representation::Text)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Platform clipboard
// ────────────────────────────────────────────────────────────────────────────

/// Shells out to the platform clipboard tool.
/// - Linux: wl-copy, then xclip, then xsel (text only)
/// - macOS: pbcopy (text only)
/// - Windows: clip.exe (text only)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write(&self, representation: Representation, content: &str) -> Result<(), ClipboardError> {
        #[cfg(target_os = "linux")]
        {
            write_linux(representation, content)
        }

        #[cfg(target_os = "macos")]
        {
            match representation {
                Representation::Html => Err(ClipboardError::Unsupported("text/html")),
                Representation::Text => pipe_to("pbcopy", &[], content),
            }
        }

        #[cfg(target_os = "windows")]
        {
            match representation {
                Representation::Html => Err(ClipboardError::Unsupported("text/html")),
                Representation::Text => pipe_to("clip", &[], content),
            }
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            let _ = (representation, content);
            Err(ClipboardError::Unsupported("any content on this platform"))
        }
    }
}

#[cfg(target_os = "linux")]
fn write_linux(representation: Representation, content: &str) -> Result<(), ClipboardError> {
    let candidates: Vec<(&'static str, Vec<&str>)> = match representation {
        Representation::Html => vec![
            ("wl-copy", vec!["--type", "text/html"]),
            ("xclip", vec!["-selection", "clipboard", "-t", "text/html"]),
        ],
        Representation::Text => vec![
            ("wl-copy", vec![]),
            ("xclip", vec!["-selection", "clipboard"]),
            ("xsel", vec!["--clipboard", "--input"]),
        ],
    };

    let mut last = ClipboardError::Unsupported("text/html");
    for (program, args) in candidates {
        match pipe_to(program, &args, content) {
            Ok(()) => return Ok(()),
            Err(e) => {
                debug!("{program} unavailable: {e}");
                last = e;
            }
        }
    }
    Err(last)
}

fn pipe_to(program: &'static str, args: &[&str], content: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ClipboardError::Spawn { program, source })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(content.as_bytes())
            .map_err(|source| ClipboardError::Spawn { program, source })?;
    }

    let status = child
        .wait()
        .map_err(|source| ClipboardError::Spawn { program, source })?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::Exit(program))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::layout::select;
    use crate::render::{render_pages, RenderOptions};
    use crate::style::resolve;
    use std::sync::Mutex;

    /// Records writes; optionally refuses HTML.
    #[derive(Default)]
    struct RecordingSink {
        refuse_html: bool,
        refuse_all: bool,
        writes: Mutex<Vec<(Representation, String)>>,
    }

    impl ClipboardSink for RecordingSink {
        fn write(&self, representation: Representation, content: &str) -> Result<(), ClipboardError> {
            if self.refuse_all || (self.refuse_html && representation == Representation::Html) {
                return Err(ClipboardError::Unsupported("stub"));
            }
            self.writes
                .lock()
                .unwrap()
                .push((representation, content.to_string()));
            Ok(())
        }
    }

    fn pages() -> Vec<Page> {
        let doc = Document::default();
        render_pages(
            &doc,
            &resolve(&doc.style),
            select(&doc.style.layout),
            RenderOptions::default(),
        )
    }

    #[test]
    fn test_rich_copy_preferred() {
        let sink = RecordingSink::default();
        assert_eq!(copy_pages(&pages(), &sink).unwrap(), Representation::Html);
        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].1.starts_with("<div class=\"resume-page\""));
    }

    #[test]
    fn test_falls_back_to_text_when_rich_copy_fails() {
        let sink = RecordingSink {
            refuse_html: true,
            ..RecordingSink::default()
        };
        assert_eq!(copy_pages(&pages(), &sink).unwrap(), Representation::Text);
        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes[0].0, Representation::Text);
        assert!(writes[0].1.contains("Alex Morgan"));
        assert!(!writes[0].1.contains('<'));
    }

    #[test]
    fn test_reports_error_when_both_fail() {
        let sink = RecordingSink {
            refuse_all: true,
            ..RecordingSink::default()
        };
        assert!(copy_pages(&pages(), &sink).is_err());
    }

    #[test]
    fn test_empty_page_list_is_rejected() {
        let sink = RecordingSink::default();
        assert!(matches!(copy_pages(&[], &sink), Err(ClipboardError::Empty)));
    }
}
