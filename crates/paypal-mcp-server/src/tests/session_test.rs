//! End-to-end tests: a full framed session over an in-memory pipe.

use crate::catalog;
use crate::config::parse_tools;
use crate::mcp::{encode_frame, FrameDecoder, Message, Registry, Transport};
use crate::server::PayPalMcpServer;
use paypal_api::PayPalClient;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::time::timeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_server(api_url: &str, tools: &str) -> PayPalMcpServer {
    let client = PayPalClient::with_client(reqwest::Client::new(), api_url, "test-token");
    let registry = Registry::build(catalog::capabilities(), &parse_tools(tools).unwrap())
        .expect("registry build");
    PayPalMcpServer::with_parts(client, registry)
}

/// Spawns the server over one end of an in-memory pipe and hands back the
/// peer end.
fn connect(server: PayPalMcpServer) -> (DuplexStream, tokio::task::JoinHandle<()>) {
    let (peer, ours) = tokio::io::duplex(8192);
    let (reader, writer) = tokio::io::split(ours);
    let transport = Transport::new(reader, writer);
    let handle = tokio::spawn(async move {
        server.serve(transport).await.expect("serve failed");
    });
    (peer, handle)
}

async fn write_message(peer: &mut DuplexStream, value: &Value) {
    let body = serde_json::to_vec(value).unwrap();
    peer.write_all(&encode_frame(&body)).await.unwrap();
}

async fn read_message(peer: &mut DuplexStream) -> Message {
    let mut decoder = FrameDecoder::new();
    let mut buf = vec![0u8; 4096];
    loop {
        if let Some(body) = decoder.next_frame() {
            return serde_json::from_slice(&body).unwrap();
        }
        let n = timeout(Duration::from_secs(2), peer.read(&mut buf))
            .await
            .expect("timed out waiting for frame")
            .unwrap();
        assert!(n > 0, "peer closed before a frame arrived");
        decoder.extend(&buf[..n]);
    }
}

#[tokio::test]
async fn ping_round_trip_over_the_wire() {
    let server = test_server("http://127.0.0.1:1", "invoices.get,orders.capture");
    let (mut peer, handle) = connect(server);

    write_message(&mut peer, &json!({"id": "p1", "type": "ping"})).await;
    let reply = read_message(&mut peer).await;

    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value["id"], "p1");
    assert_eq!(value["status"], "success");
    assert_eq!(
        value["result"]["capabilities"],
        json!(["capture_order", "get_invoice"])
    );

    drop(peer);
    timeout(Duration::from_secs(2), handle)
        .await
        .expect("server did not shut down")
        .unwrap();
}

#[tokio::test]
async fn request_round_trip_hits_the_api() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/invoicing/invoices/INV2-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "INV2-123"})))
        .mount(&mock)
        .await;

    let server = test_server(&mock.uri(), "all");
    let (mut peer, _handle) = connect(server);

    write_message(
        &mut peer,
        &json!({
            "id": 1,
            "type": "request",
            "method": "get_invoice",
            "params": {"invoice_id": "INV2-123"}
        }),
    )
    .await;

    let reply = read_message(&mut peer).await;
    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["status"], "success");
    assert_eq!(value["result"]["content"][0]["type"], "text");
}

#[tokio::test]
async fn inflight_request_is_answered_after_input_eof() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/invoicing/invoices/INV2-SLOW"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "INV2-SLOW"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock)
        .await;

    // Separate input and output pipes, so closing the input leaves the
    // output readable.
    let server = test_server(&mock.uri(), "all");
    let (mut peer_in, input) = tokio::io::duplex(4096);
    let (output, mut peer_out) = tokio::io::duplex(4096);
    let (reader, _input_writer) = tokio::io::split(input);
    let (_output_reader, writer) = tokio::io::split(output);
    let transport = Transport::new(reader, writer);
    let handle = tokio::spawn(async move {
        server.serve(transport).await.expect("serve failed");
    });

    write_message(
        &mut peer_in,
        &json!({
            "id": 7,
            "type": "request",
            "method": "get_invoice",
            "params": {"invoice_id": "INV2-SLOW"}
        }),
    )
    .await;
    drop(peer_in);

    // The handler is still running when the input ends; its response must
    // still reach the output stream.
    let reply = read_message(&mut peer_out).await;
    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["status"], "success");

    timeout(Duration::from_secs(2), handle)
        .await
        .expect("server did not shut down")
        .unwrap();
}

#[tokio::test]
async fn requests_split_across_chunks_still_answered() {
    let server = test_server("http://127.0.0.1:1", "all");
    let (mut peer, _handle) = connect(server);

    let body = serde_json::to_vec(&json!({"id": 2, "type": "ping"})).unwrap();
    let frame = encode_frame(&body);
    for chunk in frame.chunks(3) {
        peer.write_all(chunk).await.unwrap();
        peer.flush().await.unwrap();
    }

    let reply = read_message(&mut peer).await;
    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value["id"], 2);
    assert_eq!(value["status"], "success");
}
