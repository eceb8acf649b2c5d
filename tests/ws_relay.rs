use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::{timeout, Duration};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use smartassist_backend::state::AppState;
use smartassist_backend::websocket::handler::websocket_handler;

type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Bind the WebSocket endpoint on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    let state = Arc::new(AppState::new());
    let app = Router::new()
        .route("/ws/:client_id", get(websocket_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("ws://{}", addr)
}

async fn connect(base: &str, client_id: &str) -> WsClient {
    let (ws, _) = connect_async(format!("{}/ws/{}", base, client_id))
        .await
        .expect("WebSocket connect");
    ws
}

async fn recv_text(ws: &mut WsClient) -> String {
    let msg = timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("timed out waiting for a relayed message")
        .expect("stream ended")
        .expect("transport error");
    msg.into_text().expect("text frame").as_str().to_string()
}

async fn assert_silent(ws: &mut WsClient) {
    assert!(
        timeout(Duration::from_millis(300), ws.next()).await.is_err(),
        "expected no delivery"
    );
}

#[tokio::test]
async fn updates_relay_between_session_members_only() {
    let base = spawn_server().await;
    let mut a = connect(&base, "client-a").await;
    let mut b = connect(&base, "client-b").await;

    // A's first update joins A to D1. B is not a member and receives nothing.
    a.send(Message::Text(
        r#"{"type":"document_update","document_id":"D1","payload":"x"}"#.into(),
    ))
    .await
    .unwrap();
    assert_silent(&mut b).await;

    // B's update joins B and is relayed, verbatim, to A.
    let from_b = r#"{"type":"document_update","document_id":"D1","payload":"y"}"#;
    b.send(Message::Text(from_b.into())).await.unwrap();
    assert_eq!(recv_text(&mut a).await, from_b);

    // Both are members now; A's next update reaches B unmodified.
    let from_a = r#"{"type":"document_update","document_id":"D1","payload":"z"}"#;
    a.send(Message::Text(from_a.into())).await.unwrap();
    assert_eq!(recv_text(&mut b).await, from_a);
}

#[tokio::test]
async fn unrecognized_message_types_are_discarded_silently() {
    let base = spawn_server().await;
    let mut a = connect(&base, "client-a").await;
    let mut b = connect(&base, "client-b").await;

    // Join both clients to the same session.
    a.send(Message::Text(
        r#"{"type":"document_update","document_id":"D2","payload":"1"}"#.into(),
    ))
    .await
    .unwrap();
    b.send(Message::Text(
        r#"{"type":"document_update","document_id":"D2","payload":"2"}"#.into(),
    ))
    .await
    .unwrap();
    assert!(recv_text(&mut a).await.contains("\"2\""));

    // A ping-like message is not relayed and gets no acknowledgment.
    a.send(Message::Text(
        r#"{"type":"ping","document_id":"D2"}"#.into(),
    ))
    .await
    .unwrap();
    assert_silent(&mut b).await;
    assert_silent(&mut a).await;

    // The connection is still healthy afterwards.
    let follow_up = r#"{"type":"document_update","document_id":"D2","payload":"3"}"#;
    a.send(Message::Text(follow_up.into())).await.unwrap();
    assert_eq!(recv_text(&mut b).await, follow_up);
}

#[tokio::test]
async fn disconnect_removes_the_client_from_its_sessions() {
    let base = spawn_server().await;
    let mut a = connect(&base, "client-a").await;
    let mut b = connect(&base, "client-b").await;

    a.send(Message::Text(
        r#"{"type":"document_update","document_id":"D3","payload":"1"}"#.into(),
    ))
    .await
    .unwrap();
    b.send(Message::Text(
        r#"{"type":"document_update","document_id":"D3","payload":"2"}"#.into(),
    ))
    .await
    .unwrap();
    assert!(recv_text(&mut a).await.contains("\"2\""));

    // B goes away; give the server a moment to run its cleanup.
    b.close(None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    // A's update is not an error even though B is gone, and a later joiner
    // still gets relayed messages.
    a.send(Message::Text(
        r#"{"type":"document_update","document_id":"D3","payload":"3"}"#.into(),
    ))
    .await
    .unwrap();

    let mut c = connect(&base, "client-c").await;
    c.send(Message::Text(
        r#"{"type":"document_update","document_id":"D3","payload":"4"}"#.into(),
    ))
    .await
    .unwrap();
    assert!(recv_text(&mut a).await.contains("\"4\""));

    let from_a = r#"{"type":"document_update","document_id":"D3","payload":"5"}"#;
    a.send(Message::Text(from_a.into())).await.unwrap();
    assert_eq!(recv_text(&mut c).await, from_a);
}
