//! View collaborators of the chat client.
//!
//! The client never builds its own input field or message container; it is
//! handed implementations of these traits. The terminal front end lives in
//! [`crate::ui`], the in-memory versions here back tests and embedding.

/// Input field holding the text to submit.
pub trait TextField {
    /// Current value of the field
    fn value(&self) -> String;

    /// Replace the value of the field
    fn set_value(&mut self, value: String);

    /// Empty the field
    fn clear(&mut self);
}

/// Container that received messages are appended to.
pub trait MessageBoard {
    /// Append one node whose visible text is `text`.
    fn append(&mut self, text: &str);
}

/// In-memory text field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryField {
    value: String,
}

impl MemoryField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl TextField for MemoryField {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
    }

    fn clear(&mut self) {
        self.value.clear();
    }
}

/// In-memory message container keeping every appended node in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBoard {
    nodes: Vec<String>,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every node, oldest first
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Text of the most recently appended node
    pub fn last(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }
}

impl MessageBoard for MemoryBoard {
    fn append(&mut self, text: &str) {
        self.nodes.push(text.to_string());
    }
}
