//! One outbound TCP connection with a background reader.
//!
//! The session owns the write side of the stream; the reader task owns the
//! read side and prints every chunk it receives. Read and write operate on
//! independent directions of the stream, so no lock is shared between them.
//! The only coordination is a oneshot close signal that lets `close` unblock
//! a reader stuck in `read`.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{ConnectionError, ReadError, WriteError};

/// Upper bound on a single read.
pub const RECV_BUFSIZE: usize = 8 * 1024;

/// Byte pattern that tells the reader task to stop.
pub const SENTINEL: &[u8] = b"1111";

pub struct Session {
    peer: String,
    read_half: Option<OwnedReadHalf>,
    write_half: Option<OwnedWriteHalf>,
    close_tx: Option<oneshot::Sender<()>>,
    reader: Option<JoinHandle<Result<(), ReadError>>>,
}

impl Session {
    /// Opens a TCP connection to `host:port`. No explicit timeout; the call
    /// blocks on the platform's default connect timeout.
    pub async fn connect(host: &str, port: u16) -> Result<Self, ConnectionError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| ConnectionError {
                host: host.to_owned(),
                port,
                source,
            })?;
        let peer = format!("{host}:{port}");
        debug!(%peer, "connected");
        let (read_half, write_half) = stream.into_split();
        Ok(Session {
            peer,
            read_half: Some(read_half),
            write_half: Some(write_half),
            close_tx: None,
            reader: None,
        })
    }

    /// Spawns the reader task. At most one reader runs per session; calls
    /// after the first do nothing.
    pub fn spawn_reader(&mut self) {
        let Some(read_half) = self.read_half.take() else {
            return;
        };
        let (close_tx, close_rx) = oneshot::channel();
        self.close_tx = Some(close_tx);
        self.reader = Some(tokio::spawn(read_loop(read_half, close_rx)));
    }

    /// Writes `payload` in full. Fails if the session was already closed or
    /// the peer reset the connection; nothing is retried.
    pub async fn send(&mut self, payload: &[u8]) -> Result<(), WriteError> {
        let write_half = self.write_half.as_mut().ok_or(WriteError::Closed)?;
        write_half.write_all(payload).await?;
        debug!(peer = %self.peer, len = payload.len(), "sent");
        Ok(())
    }

    /// Closes the connection. The first call shuts the stream down and
    /// signals the reader so a concurrently blocked read returns; calls
    /// after the first do nothing.
    pub async fn close(&mut self) {
        let Some(mut write_half) = self.write_half.take() else {
            return;
        };
        if let Err(error) = write_half.shutdown().await {
            debug!(peer = %self.peer, %error, "shutdown on close");
        }
        if let Some(close_tx) = self.close_tx.take() {
            let _ = close_tx.send(());
        }
        debug!(peer = %self.peer, "closed");
    }

    /// Waits for the reader task to terminate. Returns immediately if no
    /// reader was started.
    pub async fn join(&mut self) -> Result<(), ReadError> {
        match self.reader.take() {
            Some(reader) => reader.await?,
            None => Ok(()),
        }
    }
}

async fn read_loop(
    mut read_half: OwnedReadHalf,
    mut close_rx: oneshot::Receiver<()>,
) -> Result<(), ReadError> {
    let mut buf = [0u8; RECV_BUFSIZE];
    loop {
        let n = tokio::select! {
            res = read_half.read(&mut buf) => res?,
            _ = &mut close_rx => {
                debug!("reader stopping: closed locally");
                return Ok(());
            }
        };
        if n == 0 {
            debug!("reader stopping: peer closed");
            return Ok(());
        }
        println!("Received: {:?}", &buf[..n]);
        if contains_sentinel(&buf[..n]) {
            debug!("reader stopping: sentinel seen");
            return Ok(());
        }
    }
}

/// Whether `chunk` contains the sentinel as a substring. Chunks are scanned
/// individually; a sentinel split across two reads is not detected.
fn contains_sentinel(chunk: &[u8]) -> bool {
    chunk.windows(SENTINEL.len()).any(|window| window == SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::contains_sentinel;

    #[test]
    fn sentinel_matches_anywhere_in_a_chunk() {
        assert!(contains_sentinel(b"1111"));
        assert!(contains_sentinel(b"x1111"));
        assert!(contains_sentinel(b"fkfkf1111$dfk"));
        assert!(contains_sentinel(b"11111"));
    }

    #[test]
    fn short_or_partial_chunks_do_not_match() {
        assert!(!contains_sentinel(b""));
        assert!(!contains_sentinel(b"11"));
        assert!(!contains_sentinel(b"111"));
        assert!(!contains_sentinel(b"11x11"));
    }
}
