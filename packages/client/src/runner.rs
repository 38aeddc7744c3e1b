//! Client execution: connect once, then run the event loop until either side ends.

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;

use crate::{
    client::ChatClient,
    config::ClientConfig,
    connection::{Connection, WebSocketConnection},
    error::ClientError,
    events::ChatEvent,
    ui::{LineField, TerminalBoard, spawn_prompt},
    view::{MessageBoard, TextField},
};

/// Run the terminal chat client.
///
/// Connects to `config.url` without retrying, then reads submissions from a
/// readline prompt and prints inbound messages until the relay closes the
/// connection or input ends. Everything submitted is flushed to the relay
/// before returning.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    tracing::info!("Connecting to {}", config.url);
    let (connection, inbound) = WebSocketConnection::connect(&config.url).await?;

    println!("\nType messages and press Enter to send. Press Ctrl+C to exit.\n");

    let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();
    let _readline_handle = spawn_prompt(config.prompt.clone(), line_tx);

    let mut client = ChatClient::new(
        connection,
        LineField::default(),
        TerminalBoard::stdout(config.prompt),
    );

    let result = run_session(&mut client, inbound, line_rx).await;

    client.into_connection().close().await;
    tracing::info!("Client session ended");

    result
}

/// Event loop of one session.
///
/// Dispatches `Open` once, then one event at a time from either source:
/// each item of `inbound` as `Message`, each line from `submissions` as
/// `Submit`. Returns `Ok(())` when either source ends and the first error
/// otherwise.
pub async fn run_session<C, F, B, S>(
    client: &mut ChatClient<C, F, B>,
    mut inbound: S,
    mut submissions: mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError>
where
    C: Connection,
    F: TextField,
    B: MessageBoard,
    S: Stream<Item = Result<String, ClientError>> + Unpin,
{
    client.dispatch(ChatEvent::Open)?;

    loop {
        let event = tokio::select! {
            message = inbound.next() => match message {
                Some(Ok(text)) => ChatEvent::Message(text),
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(e);
                }
                None => {
                    tracing::info!("Server closed the connection");
                    return Ok(());
                }
            },
            line = submissions.recv() => match line {
                Some(line) => ChatEvent::Submit(line),
                None => {
                    tracing::info!("Input closed");
                    return Ok(());
                }
            },
        };

        client.dispatch(event)?;
    }
}
