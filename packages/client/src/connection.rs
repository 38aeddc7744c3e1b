//! WebSocket connection to the relay endpoint.
//!
//! The connection is split in two halves when it is established:
//!
//! - outbound: text handed to [`Connection::send`] is queued on an unbounded
//!   channel and written as one text frame each by a writer task
//! - inbound: an [`InboundStream`] yielding the text of every text frame the
//!   relay delivers, in transport order
//!
//! Closing the connection with [`WebSocketConnection::close`] drains the queue
//! before the close frame goes out, so nothing submitted before shutdown is lost.

use std::pin::Pin;

use futures_util::{SinkExt, Stream, StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::error::ClientError;

/// Sender half of the outbound text queue
pub type OutboundChannel = mpsc::UnboundedSender<String>;

/// Text messages received from the relay
pub type InboundStream = Pin<Box<dyn Stream<Item = Result<String, ClientError>> + Send>>;

/// Outbound side of a chat connection.
#[cfg_attr(test, mockall::automock)]
pub trait Connection {
    /// Transmit `text` verbatim as one message.
    fn send(&self, text: &str) -> Result<(), ClientError>;
}

impl Connection for OutboundChannel {
    fn send(&self, text: &str) -> Result<(), ClientError> {
        mpsc::UnboundedSender::send(self, text.to_string())
            .map_err(|e| ClientError::SendFailed(e.to_string()))
    }
}

/// Live WebSocket connection owned by one client session.
pub struct WebSocketConnection {
    outbound: OutboundChannel,
    writer: JoinHandle<()>,
}

impl WebSocketConnection {
    /// Connect to `url` and start the writer task.
    ///
    /// # Returns
    ///
    /// The outbound connection and the stream of inbound text messages.
    pub async fn connect(url: &str) -> Result<(Self, InboundStream), ClientError> {
        let (ws_stream, _response) = connect_async(url)
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let (mut write, read) = ws_stream.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<String>();

        let writer = tokio::spawn(async move {
            while let Some(text) = outbound_rx.recv().await {
                if let Err(e) = write.send(Message::Text(text.into())).await {
                    tracing::warn!("Failed to send message: {}", e);
                    return;
                }
            }

            // Queue closed: every pending frame has been written
            if let Err(e) = write.close().await {
                tracing::debug!("Failed to close WebSocket: {}", e);
            }
        });

        let inbound: InboundStream =
            Box::pin(read.filter_map(|frame| async move { text_from_frame(frame) }));

        Ok((Self { outbound, writer }, inbound))
    }

    /// Flush queued messages, send a close frame and wait for the writer to finish.
    pub async fn close(self) {
        let Self { outbound, writer } = self;
        drop(outbound);

        if let Err(e) = writer.await {
            tracing::warn!("WebSocket writer task failed: {}", e);
        }
    }
}

impl Connection for WebSocketConnection {
    fn send(&self, text: &str) -> Result<(), ClientError> {
        Connection::send(&self.outbound, text)
    }
}

/// Map one WebSocket frame to an inbound chat item.
///
/// Returns `None` for frames that carry no chat text.
pub(crate) fn text_from_frame(
    frame: Result<Message, tungstenite::Error>,
) -> Option<Result<String, ClientError>> {
    match frame {
        Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
        Ok(Message::Binary(data)) => {
            tracing::warn!("Skipping {} bytes of binary data", data.len());
            None
        }
        Ok(Message::Close(_)) => {
            tracing::debug!("Close frame received");
            None
        }
        Ok(_) => None,
        Err(e) => Some(Err(ClientError::Connection(e.to_string()))),
    }
}
