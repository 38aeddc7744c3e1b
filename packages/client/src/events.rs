//! Chat events and the listener traits that handle them.
//!
//! Every event kind has its own listener trait. The event loop in
//! [`crate::runner`] dispatches events one at a time, so a listener never
//! runs concurrently with another.

use crate::error::ClientError;

/// Event delivered to the chat client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// The connection has been established
    Open,
    /// The form was submitted with the given field value
    Submit(String),
    /// The connection delivered a text message
    Message(String),
}

/// Form submission event.
///
/// Submitting a form has a default action; a listener that handles the
/// submission itself calls [`SubmitEvent::prevent_default`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the default action of the submission
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Listener for connection establishment
pub trait OpenListener {
    fn on_open(&mut self);
}

/// Listener for form submissions
pub trait SubmitListener {
    fn on_submit(&mut self, event: &mut SubmitEvent) -> Result<(), ClientError>;
}

/// Listener for inbound messages
pub trait MessageListener {
    fn on_message(&mut self, text: &str);
}
