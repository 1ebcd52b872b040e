//! # Console Collaborators
//!
//! Terminal stand-ins for the UI: navigation targets and notifications are
//! written as lines (`NAVIGATE <path>`, `NOTIFY <message>`) so that scripts
//! can act on them.

use std::cell::RefCell;
use std::io::Write;

use formgate_state::{Navigator, NotificationSink};

/// Writes routed actions to an output stream.
#[derive(Debug)]
pub struct Console<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> Console<W> {
    /// Write to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    /// Write one line. Write errors are logged, not propagated: the
    /// collaborators are fire-and-forget.
    pub fn line(&self, text: &str) {
        if let Err(e) = writeln!(self.out.borrow_mut(), "{text}") {
            tracing::warn!(error = %e, "cannot write to console");
        }
    }

    /// Recover the output stream.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Navigator for &Console<W> {
    fn navigate(&self, path: &str) {
        self.line(&format!("NAVIGATE {path}"));
    }
}

impl<W: Write> NotificationSink for &Console<W> {
    fn notify(&self, message: &str) {
        self.line(&format!("NOTIFY {message}"));
    }
}
