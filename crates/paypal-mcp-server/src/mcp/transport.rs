use crate::mcp::framing::{encode_frame, FrameDecoder};
use crate::mcp::types::Message;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{watch, Mutex as AsyncMutex};
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("transport has not been started")]
    NotStarted,

    #[error("transport is closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode outgoing message: {0}")]
    Encode(#[source] serde_json::Error),

    /// A well-framed body was not valid JSON. Reported via the error
    /// callback; the session continues.
    #[error("failed to decode message body: {0}")]
    Decode(#[source] serde_json::Error),
}

type MessageCallback = Arc<dyn Fn(Message) + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(TransportError) + Send + Sync>;
type CloseCallback = Arc<dyn Fn() + Send + Sync>;

/// A framed message transport over any duplex byte stream.
///
/// Production use wraps stdio; tests wrap in-memory pipes. A dedicated reader
/// task is the sole producer of message callbacks. `start` and `close` are
/// idempotent, the close callback fires exactly once, and concurrent `send`
/// calls are serialized so frames are never interleaved.
///
/// End of input stops the reader but does not close the transport: the write
/// path stays usable until an explicit `close`, so responses to frames that
/// arrived before EOF can still go out.
pub struct Transport<R, W> {
    inner: Arc<Inner<R, W>>,
}

impl<R, W> Clone for Transport<R, W> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<R, W> {
    reader: Mutex<Option<R>>,
    writer: AsyncMutex<W>,
    started: Mutex<bool>,
    closed_tx: watch::Sender<bool>,
    closed_rx: watch::Receiver<bool>,
    input_done_tx: watch::Sender<bool>,
    input_done_rx: watch::Receiver<bool>,
    on_message: Mutex<Option<MessageCallback>>,
    on_error: Mutex<Option<ErrorCallback>>,
    on_close: Mutex<Option<CloseCallback>>,
}

impl Transport<tokio::io::Stdin, tokio::io::Stdout> {
    /// The production transport: framed messages over stdin/stdout. Logging
    /// must go to stderr, stdout carries frames.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> Transport<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(reader: R, writer: W) -> Self {
        let (closed_tx, closed_rx) = watch::channel(false);
        let (input_done_tx, input_done_rx) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                reader: Mutex::new(Some(reader)),
                writer: AsyncMutex::new(writer),
                started: Mutex::new(false),
                closed_tx,
                closed_rx,
                input_done_tx,
                input_done_rx,
                on_message: Mutex::new(None),
                on_error: Mutex::new(None),
                on_close: Mutex::new(None),
            }),
        }
    }

    pub fn on_message(&self, callback: impl Fn(Message) + Send + Sync + 'static) {
        *self.inner.on_message.lock() = Some(Arc::new(callback));
    }

    pub fn on_error(&self, callback: impl Fn(TransportError) + Send + Sync + 'static) {
        *self.inner.on_error.lock() = Some(Arc::new(callback));
    }

    pub fn on_close(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self.inner.on_close.lock() = Some(Arc::new(callback));
    }

    /// Spawns the reader task. A second call while running is a no-op;
    /// starting a transport that has already closed is an error.
    pub fn start(&self) -> Result<(), TransportError> {
        {
            let mut started = self.inner.started.lock();
            if *started {
                return Ok(());
            }
            if *self.inner.closed_rx.borrow() {
                return Err(TransportError::Closed);
            }
            *started = true;
        }

        let reader = self
            .inner
            .reader
            .lock()
            .take()
            .ok_or(TransportError::NotStarted)?;
        let inner = self.inner.clone();
        tokio::spawn(async move {
            read_loop(inner, reader).await;
        });
        Ok(())
    }

    /// Frames and writes a message. Fails when the transport has not been
    /// started or has already closed.
    pub async fn send(&self, message: &Message) -> Result<(), TransportError> {
        if *self.inner.closed_rx.borrow() {
            return Err(TransportError::Closed);
        }
        if !*self.inner.started.lock() {
            return Err(TransportError::NotStarted);
        }

        let body = serde_json::to_vec(message).map_err(TransportError::Encode)?;
        let frame = encode_frame(&body);

        let mut writer = self.inner.writer.lock().await;
        writer.write_all(&frame).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Marks the session closed and releases the reader task. Idempotent.
    pub fn close(&self) {
        self.inner.do_close();
    }

    pub fn is_closed(&self) -> bool {
        *self.inner.closed_rx.borrow()
    }

    /// Suspends the caller until the transport has closed. Safe to call
    /// before or after `start`.
    pub async fn wait_until_closed(&self) {
        let mut rx = self.inner.closed_rx.clone();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                break;
            }
        }
    }

    /// Suspends the caller until no further messages will be produced,
    /// because the input stream ended or the transport was closed. The
    /// write path is still open at that point unless `close` was called.
    pub async fn wait_until_input_done(&self) {
        let mut rx = self.inner.input_done_rx.clone();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                break;
            }
        }
    }
}

impl<R, W> Inner<R, W> {
    fn do_close(&self) {
        let was_closed = self.closed_tx.send_replace(true);
        if was_closed {
            return;
        }
        // Closing also ends intake, whether or not a reader ever ran.
        self.input_done_tx.send_replace(true);
        debug!("transport closed");
        let callback = self.on_close.lock().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    fn finish_input(&self) {
        self.input_done_tx.send_replace(true);
    }

    fn report_error(&self, err: TransportError) {
        let callback = self.on_error.lock().clone();
        match callback {
            Some(callback) => callback(err),
            None => error!(error = %err, "transport error"),
        }
    }
}

async fn read_loop<R, W>(inner: Arc<Inner<R, W>>, mut reader: R)
where
    R: AsyncRead + Unpin,
{
    let mut decoder = FrameDecoder::new();
    let mut chunk = vec![0u8; 8192];
    let mut closed_rx = inner.closed_rx.clone();

    loop {
        tokio::select! {
            _ = closed_rx.changed() => break,
            read = reader.read(&mut chunk) => match read {
                Ok(0) => {
                    debug!("input stream reached EOF");
                    break;
                }
                Ok(n) => {
                    decoder.extend(&chunk[..n]);
                    while let Some(body) = decoder.next_frame() {
                        match serde_json::from_slice::<Message>(&body) {
                            Ok(message) => {
                                let callback = inner.on_message.lock().clone();
                                if let Some(callback) = callback {
                                    callback(message);
                                }
                            }
                            // One corrupt body must not end the session.
                            Err(e) => inner.report_error(TransportError::Decode(e)),
                        }
                    }
                }
                Err(e) => {
                    inner.report_error(TransportError::Io(e));
                    break;
                }
            },
        }
    }

    inner.finish_input();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::types::Payload;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::io::{DuplexStream, ReadHalf, WriteHalf};
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    type TestTransport = Transport<ReadHalf<DuplexStream>, WriteHalf<DuplexStream>>;

    fn pair() -> (TestTransport, DuplexStream) {
        let (client, server) = tokio::io::duplex(4096);
        let (reader, writer) = tokio::io::split(server);
        (Transport::new(reader, writer), client)
    }

    fn ping_frame(id: u64) -> Vec<u8> {
        let body = serde_json::to_vec(&json!({"id": id, "type": "ping"})).unwrap();
        encode_frame(&body)
    }

    #[tokio::test]
    async fn send_before_start_fails() {
        let (transport, _client) = pair();
        let msg = Message {
            id: json!(1),
            payload: Payload::Ping,
        };
        assert!(matches!(
            transport.send(&msg).await,
            Err(TransportError::NotStarted)
        ));
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let (transport, _client) = pair();
        transport.start().unwrap();
        transport.start().unwrap();
        transport.close();
    }

    #[tokio::test]
    async fn delivers_incoming_messages() {
        let (transport, mut client) = pair();
        let (tx, mut rx) = mpsc::unbounded_channel();
        transport.on_message(move |msg| {
            let _ = tx.send(msg);
        });
        transport.start().unwrap();

        client.write_all(&ping_frame(1)).await.unwrap();
        client.write_all(&ping_frame(2)).await.unwrap();

        let first = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        let second = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        assert_eq!(first.unwrap().id, json!(1));
        assert_eq!(second.unwrap().id, json!(2));
    }

    #[tokio::test]
    async fn corrupt_body_reports_error_and_session_continues() {
        let (transport, mut client) = pair();
        let errors = Arc::new(AtomicUsize::new(0));
        let errors_cb = errors.clone();
        transport.on_error(move |_| {
            errors_cb.fetch_add(1, Ordering::SeqCst);
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        transport.on_message(move |msg| {
            let _ = tx.send(msg);
        });
        transport.start().unwrap();

        client
            .write_all(&encode_frame(b"{not json at all"))
            .await
            .unwrap();
        client.write_all(&ping_frame(7)).await.unwrap();

        let msg = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(msg.id, json!(7));
        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert!(!transport.is_closed());
    }

    #[tokio::test]
    async fn eof_ends_intake_and_close_fires_once() {
        let (transport, client) = pair();
        let closes = Arc::new(AtomicUsize::new(0));
        let closes_cb = closes.clone();
        transport.on_close(move || {
            closes_cb.fetch_add(1, Ordering::SeqCst);
        });
        transport.start().unwrap();

        drop(client);
        timeout(Duration::from_secs(1), transport.wait_until_input_done())
            .await
            .unwrap();

        // EOF alone does not close; only an explicit close does, once.
        assert!(!transport.is_closed());
        transport.close();
        transport.close();
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        timeout(Duration::from_secs(1), transport.wait_until_closed())
            .await
            .unwrap();

        let msg = Message {
            id: json!(1),
            payload: Payload::Ping,
        };
        assert!(matches!(
            transport.send(&msg).await,
            Err(TransportError::Closed)
        ));
    }

    #[tokio::test]
    async fn write_path_survives_input_eof() {
        let (mut peer_in, input) = tokio::io::duplex(1024);
        let (output, mut peer_out) = tokio::io::duplex(1024);
        let (reader, _input_writer) = tokio::io::split(input);
        let (_output_reader, writer) = tokio::io::split(output);
        let transport = Transport::new(reader, writer);
        transport.start().unwrap();

        peer_in.shutdown().await.unwrap();
        drop(peer_in);
        timeout(Duration::from_secs(1), transport.wait_until_input_done())
            .await
            .unwrap();

        let msg = Message {
            id: json!("after-eof"),
            payload: Payload::Ping,
        };
        transport.send(&msg).await.unwrap();

        let mut buf = vec![0u8; 1024];
        let n = peer_out.read(&mut buf).await.unwrap();
        let mut decoder = FrameDecoder::new();
        decoder.extend(&buf[..n]);
        let body = decoder.next_frame().unwrap();
        let decoded: Message = serde_json::from_slice(&body).unwrap();
        assert_eq!(decoded, msg);
    }

    #[tokio::test]
    async fn wait_until_closed_before_start() {
        let (transport, _client) = pair();
        let waiter = transport.clone();
        let handle = tokio::spawn(async move { waiter.wait_until_closed().await });

        transport.start().unwrap();
        transport.close();
        timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn start_after_close_fails() {
        let (transport, _client) = pair();
        transport.close();
        assert!(matches!(transport.start(), Err(TransportError::Closed)));
    }

    #[tokio::test]
    async fn send_writes_a_well_formed_frame() {
        let (transport, mut client) = pair();
        transport.start().unwrap();

        let msg = Message {
            id: json!("out-1"),
            payload: Payload::Ping,
        };
        transport.send(&msg).await.unwrap();

        let mut buf = vec![0u8; 1024];
        let n = client.read(&mut buf).await.unwrap();
        let mut decoder = FrameDecoder::new();
        decoder.extend(&buf[..n]);
        let body = decoder.next_frame().unwrap();
        let decoded: Message = serde_json::from_slice(&body).unwrap();
        assert_eq!(decoded, msg);
    }
}
