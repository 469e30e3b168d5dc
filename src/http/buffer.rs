use bytes::{Bytes, BytesMut};

/// Default initial capacity of a connection's receive buffer.
const INITIAL_CAPACITY: usize = 4096;

/// Append-only byte store for one connection.
///
/// The buffer knows nothing about HTTP. The framer looks at the buffered
/// bytes through [`RecvBuffer::peek`] and removes whole messages from the
/// front with [`RecvBuffer::consume_prefix`].
#[derive(Debug)]
pub struct RecvBuffer {
    buf: BytesMut,
}

impl RecvBuffer {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Appends a chunk received from the peer.
    pub fn append(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Everything buffered so far.
    pub fn peek(&self) -> &[u8] {
        &self.buf
    }

    /// Removes the first `n` bytes and hands them back without copying.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the number of buffered bytes.
    pub fn consume_prefix(&mut self, n: usize) -> Bytes {
        self.buf.split_to(n).freeze()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for RecvBuffer {
    fn default() -> Self {
        Self::new()
    }
}
