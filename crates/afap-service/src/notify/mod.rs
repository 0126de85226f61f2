//! Notifier implementations.

pub mod email;
pub mod recording;

pub use email::EmailNotifier;
pub use recording::{RecordingNotifier, SentMessage};
