//! Chat message rendering. Read-only over scorer output.

pub mod message;

pub use message::{render_signal_message, truncate_chars, MAX_MESSAGE_CHARS};
