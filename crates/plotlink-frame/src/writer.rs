use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::{debug, trace};

use crate::block::BlockType;
use crate::codec::{encode_packet, FrameConfig, Packet};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 512;

/// Writes complete packets to any `Write` stream.
pub struct PacketWriter<T> {
    inner: T,
    buf: BytesMut,
    ends: Vec<usize>,
    config: FrameConfig,
}

impl<T: Write> PacketWriter<T> {
    /// Create a new packet writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new packet writer with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            ends: Vec::with_capacity(BlockType::ALL.len()),
            config,
        }
    }

    /// Write a complete packet (blocking).
    pub fn write_packet(&mut self, packet: &Packet) -> Result<()> {
        self.emit(packet.block, packet.payload.as_ref())
    }

    /// Encode and send one block as a packet.
    pub fn emit(&mut self, block: BlockType, payload: &[u8]) -> Result<()> {
        self.emit_frame([(block, payload)]).map(|_| ())
    }

    /// Encode and send a sequence of blocks, all or nothing.
    ///
    /// Every block is encoded before the first byte is written, so an
    /// encoding error leaves the stream untouched. Returns the number of
    /// bytes written.
    pub fn emit_frame<'a, I>(&mut self, blocks: I) -> Result<usize>
    where
        I: IntoIterator<Item = (BlockType, &'a [u8])>,
    {
        self.buf.clear();
        self.ends.clear();
        for (block, payload) in blocks {
            encode_packet(block, payload, &self.config, &mut self.buf)?;
            self.ends.push(self.buf.len());
            trace!(%block, len = payload.len(), "encoded packet");
        }

        let mut start = 0usize;
        for i in 0..self.ends.len() {
            let end = self.ends[i];
            self.write_range(start, end)?;
            start = end;
            if self.config.yield_after_packet {
                std::thread::yield_now();
            }
        }

        self.flush()?;
        debug!(packets = self.ends.len(), bytes = start, "frame written");
        Ok(start)
    }

    fn write_range(&mut self, start: usize, end: usize) -> Result<()> {
        let mut offset = start;
        while offset < end {
            match self.inner.write(&self.buf[offset..end]) {
                Ok(0) => {
                    return Err(FrameError::ChannelUnavailable(std::io::Error::from(
                        ErrorKind::WriteZero,
                    )))
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(channel_error(err)),
            }
        }
        Ok(())
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(channel_error(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current packet writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

fn channel_error(err: std::io::Error) -> FrameError {
    match err.kind() {
        ErrorKind::BrokenPipe
        | ErrorKind::NotConnected
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::WriteZero
        | ErrorKind::TimedOut => FrameError::ChannelUnavailable(err),
        _ => FrameError::Io(err),
    }
}
