//! Integration tests against an in-process WebSocket relay.
//!
//! The relay accepts a single connection, reports every text frame it
//! receives, and pushes whatever the test hands it. Dropping its outgoing
//! sender makes it close the connection with a proper closing handshake.

use std::process::Stdio;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::{io::AsyncWriteExt, net::TcpListener, process::Command, sync::mpsc, time::timeout};
use tokio_tungstenite::{accept_async, tungstenite::protocol::Message};

use tegami_client::{
    ChatClient, ClientError, WebSocketConnection, run_session,
    view::{MemoryBoard, MemoryField, TextField},
};

const WAIT: Duration = Duration::from_secs(10);

/// Helper struct owning the relay side of one test
struct TestRelay {
    url: String,
    received: mpsc::UnboundedReceiver<String>,
    outgoing: Option<mpsc::UnboundedSender<String>>,
}

impl TestRelay {
    /// Start a relay on an ephemeral port
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());

        let (received_tx, received) = mpsc::unbounded_channel::<String>();
        let (outgoing, mut outgoing_rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let ws_stream = accept_async(stream).await.unwrap();
            let (mut write, mut read) = ws_stream.split();

            loop {
                tokio::select! {
                    frame = read.next() => match frame {
                        Some(Ok(Message::Text(text))) => {
                            let _ = received_tx.send(text.as_str().to_owned());
                        }
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return,
                        Some(Ok(_)) => {}
                    },
                    text = outgoing_rx.recv() => match text {
                        Some(text) => {
                            write.send(Message::Text(text.into())).await.unwrap();
                        }
                        None => break,
                    },
                }
            }

            // Close from the relay side and wait for the client's reply
            let _ = write.close().await;
            while let Some(Ok(frame)) = read.next().await {
                if let Message::Text(text) = frame {
                    let _ = received_tx.send(text.as_str().to_owned());
                }
            }
        });

        TestRelay {
            url,
            received,
            outgoing: Some(outgoing),
        }
    }

    /// Push a text message to the connected client
    fn push(&self, text: &str) {
        if let Some(outgoing) = &self.outgoing {
            outgoing.send(text.to_string()).unwrap();
        }
    }

    /// Close the connection from the relay side
    fn close(&mut self) {
        self.outgoing.take();
    }

    /// Wait for the next text frame sent by the client
    async fn next_received(&mut self) -> Option<String> {
        timeout(WAIT, self.received.recv()).await.ok().flatten()
    }
}

#[tokio::test]
async fn test_submitted_text_reaches_relay() {
    // テスト項目: フォーム送信したテキストがリレーにそのまま届き、フィールドが空になる
    // given (前提条件):
    let mut relay = TestRelay::start().await;
    let (connection, inbound) = WebSocketConnection::connect(&relay.url).await.unwrap();
    let mut client = ChatClient::new(connection, MemoryField::default(), MemoryBoard::new());
    let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();

    // when (操作):
    line_tx.send("hello".to_string()).unwrap();
    drop(line_tx);
    let result = run_session(&mut client, inbound, line_rx).await;
    let field_value = client.field().value();
    client.into_connection().close().await;

    // then (期待する結果):
    assert!(result.is_ok());
    assert_eq!(field_value, "");
    assert_eq!(relay.next_received().await.as_deref(), Some("hello"));
}

#[tokio::test]
async fn test_empty_submission_is_sent() {
    // テスト項目: 空文字列の送信も 1 件のメッセージとしてリレーに届く
    // given (前提条件):
    let mut relay = TestRelay::start().await;
    let (connection, inbound) = WebSocketConnection::connect(&relay.url).await.unwrap();
    let mut client = ChatClient::new(connection, MemoryField::default(), MemoryBoard::new());
    let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();

    // when (操作):
    line_tx.send(String::new()).unwrap();
    line_tx.send("after".to_string()).unwrap();
    drop(line_tx);
    run_session(&mut client, inbound, line_rx).await.unwrap();
    client.into_connection().close().await;

    // then (期待する結果):
    assert_eq!(relay.next_received().await.as_deref(), Some(""));
    assert_eq!(relay.next_received().await.as_deref(), Some("after"));
}

#[tokio::test]
async fn test_relay_messages_are_rendered_in_order() {
    // テスト項目: リレーからのメッセージが到着順に描画され、切断で正常終了する
    // given (前提条件):
    let mut relay = TestRelay::start().await;
    let (connection, inbound) = WebSocketConnection::connect(&relay.url).await.unwrap();
    let mut client = ChatClient::new(connection, MemoryField::default(), MemoryBoard::new());
    let (_line_tx, line_rx) = mpsc::unbounded_channel::<String>();

    // when (操作):
    relay.push("a");
    relay.push("b");
    relay.push("hi there");
    relay.close();
    let result = timeout(WAIT, run_session(&mut client, inbound, line_rx))
        .await
        .expect("session did not end after the relay closed");

    // then (期待する結果):
    assert!(result.is_ok());
    assert_eq!(client.board().nodes(), ["a", "b", "hi there"]);
    assert_eq!(client.board().last(), Some("hi there"));
}

#[tokio::test]
async fn test_connect_without_relay_fails() {
    // テスト項目: リレーが存在しない場合、再試行せずに ConnectionError になる
    // given (前提条件):
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    drop(listener);

    // when (操作):
    let result = WebSocketConnection::connect(&url).await;

    // then (期待する結果):
    assert!(matches!(result, Err(ClientError::Connection(_))));
}

#[tokio::test]
async fn test_binary_forwards_stdin_line_to_relay() {
    // テスト項目: クライアントのバイナリが標準入力の行をリレーに送信し、入力終了で正常終了する
    // given (前提条件):
    let mut relay = TestRelay::start().await;
    let mut process = Command::new(env!("CARGO_BIN_EXE_tegami-client"))
        .args(["--url", &relay.url])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to start client");

    // when (操作):
    let mut stdin = process.stdin.take().unwrap();
    stdin.write_all(b"hello\n").await.unwrap();
    stdin.flush().await.unwrap();
    drop(stdin);

    // then (期待する結果):
    assert_eq!(relay.next_received().await.as_deref(), Some("hello"));
    let status = timeout(WAIT, process.wait())
        .await
        .expect("client did not exit after stdin closed")
        .unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn test_binary_exits_with_error_when_relay_is_missing() {
    // テスト項目: 接続先がない場合、バイナリは再接続せずにエラー終了する
    // given (前提条件):
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    drop(listener);

    // when (操作):
    let status = timeout(
        WAIT,
        Command::new(env!("CARGO_BIN_EXE_tegami-client"))
            .args(["--url", &url])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status(),
    )
    .await
    .expect("client did not exit")
    .unwrap();

    // then (期待する結果):
    assert_eq!(status.code(), Some(1));
}

#[tokio::test]
async fn test_binary_rejects_non_websocket_url() {
    // テスト項目: WebSocket 以外の URL を指定するとバイナリは終了コード 2 で終了する
    // given (前提条件):
    let url = "http://localhost:8080";

    // when (操作):
    let status = Command::new(env!("CARGO_BIN_EXE_tegami-client"))
        .args(["--url", url])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(status.code(), Some(2));
}
