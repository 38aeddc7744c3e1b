//! The chat client: one connection, one input field, one message board.

use crate::{
    connection::Connection,
    error::ClientError,
    events::{ChatEvent, MessageListener, OpenListener, SubmitEvent, SubmitListener},
    view::{MessageBoard, TextField},
};

/// Chat client owning its connection and view collaborators.
///
/// The connection is created once at startup and only reachable through the
/// client.
pub struct ChatClient<C, F, B> {
    connection: C,
    field: F,
    board: B,
}

impl<C, F, B> ChatClient<C, F, B>
where
    C: Connection,
    F: TextField,
    B: MessageBoard,
{
    pub fn new(connection: C, field: F, board: B) -> Self {
        Self {
            connection,
            field,
            board,
        }
    }

    /// Route an event to the listener for its kind.
    ///
    /// A `Submit` event first places its value into the field, as if typed,
    /// and then submits the form.
    pub fn dispatch(&mut self, event: ChatEvent) -> Result<(), ClientError> {
        match event {
            ChatEvent::Open => self.on_open(),
            ChatEvent::Submit(value) => {
                self.field.set_value(value);
                let mut submit = SubmitEvent::new();
                self.on_submit(&mut submit)?;
            }
            ChatEvent::Message(text) => self.on_message(&text),
        }

        Ok(())
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    /// Give up the client, returning the connection for shutdown
    pub fn into_connection(self) -> C {
        self.connection
    }
}

impl<C, F, B> OpenListener for ChatClient<C, F, B> {
    fn on_open(&mut self) {
        tracing::info!("WebSocket connect!");
    }
}

impl<C, F, B> SubmitListener for ChatClient<C, F, B>
where
    C: Connection,
    F: TextField,
{
    fn on_submit(&mut self, event: &mut SubmitEvent) -> Result<(), ClientError> {
        event.prevent_default();

        // Sent as is: empty and whitespace-only values included
        let text = self.field.value();
        self.connection.send(&text)?;
        self.field.clear();

        Ok(())
    }
}

impl<C, F, B> MessageListener for ChatClient<C, F, B>
where
    B: MessageBoard,
{
    fn on_message(&mut self, text: &str) {
        tracing::info!("{}", text);
        self.board.append(text);
    }
}
