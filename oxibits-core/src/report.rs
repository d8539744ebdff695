//! Process-wide reporting hook for bitstream syntax errors.
//!
//! The engine itself never raises syntax errors; they come from the layer
//! above it, typically a generated parser that finds a malformed field.
//! [`syntax_error`] routes such complaints through an overridable handler so
//! hosts can log, collect, or recover instead of dying. With no handler
//! installed the default aborts the current operation by panicking.
//!
//! # Example
//!
//! ```
//! use oxibits_core::report;
//!
//! report::install_syntax_handler(|msg| eprintln!("parse error: {msg}"));
//! report::syntax_error("marker expected");
//! report::reset_syntax_handler();
//! ```

use std::sync::RwLock;

type Handler = Box<dyn Fn(&str) + Send + Sync>;

static HANDLER: RwLock<Option<Handler>> = RwLock::new(None);

/// Install a process-wide handler for syntax errors.
///
/// Replaces any previously installed handler. The handler may return, in
/// which case the reporting caller continues.
pub fn install_syntax_handler(handler: impl Fn(&str) + Send + Sync + 'static) {
    if let Ok(mut slot) = HANDLER.write() {
        *slot = Some(Box::new(handler));
    }
}

/// Remove the installed handler, restoring the fatal default.
pub fn reset_syntax_handler() {
    if let Ok(mut slot) = HANDLER.write() {
        *slot = None;
    }
}

/// Report a bitstream syntax error.
///
/// Invokes the installed handler, or panics with the message if none is
/// installed (or the handler slot is poisoned).
///
/// # Panics
///
/// Panics when no handler is installed; this is the fatal default.
pub fn syntax_error(message: &str) {
    if let Ok(slot) = HANDLER.read() {
        if let Some(handler) = slot.as_ref() {
            handler(message);
            return;
        }
    }
    panic!("bitstream syntax error: {message}");
}
