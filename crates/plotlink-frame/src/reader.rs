use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::codec::{decode_packet, FrameConfig, Packet};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 512;
const READ_CHUNK_SIZE: usize = 256;

/// Reads complete packets from any `Read` stream.
///
/// This is the receiver side of the link. Partial reads and resynchronization
/// after line noise are handled internally.
pub struct PacketReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> PacketReader<T> {
    /// Create a new packet reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new packet reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete packet (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    /// Packet level errors leave the reader positioned at the next packet.
    pub fn read_packet(&mut self) -> Result<Packet> {
        loop {
            if let Some(packet) = decode_packet(&mut self.buf, &self.config)? {
                return Ok(packet);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current packet reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::BytesMut;

    use super::*;
    use crate::block::BlockType;
    use crate::codec::encode_packet;
    use crate::contract::LengthContract;

    fn wire(packets: &[(BlockType, &[u8])]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        for (block, payload) in packets {
            encode_packet(*block, payload, &FrameConfig::default(), &mut buf).unwrap();
        }
        buf.to_vec()
    }

    #[test]
    fn read_single_packet() {
        let bytes = wire(&[(BlockType::AInstructions, &[1, 1, 7][..])]);
        let mut reader = PacketReader::new(Cursor::new(bytes));

        let packet = reader.read_packet().unwrap();
        assert_eq!(packet.block, BlockType::AInstructions);
        assert_eq!(packet.payload.as_ref(), &[1, 1, 7]);
    }

    #[test]
    fn read_multiple_packets() {
        let bytes = wire(&[
            (BlockType::AParamA, &[1][..]),
            (BlockType::AParamB, &[2, 2][..]),
            (BlockType::AParamC, &[3, 3, 3][..]),
        ]);
        let mut reader = PacketReader::new(Cursor::new(bytes));

        let p1 = reader.read_packet().unwrap();
        let p2 = reader.read_packet().unwrap();
        let p3 = reader.read_packet().unwrap();

        assert_eq!((p1.block, p1.payload.as_ref()), (BlockType::AParamA, &[1u8][..]));
        assert_eq!((p2.block, p2.payload.as_ref()), (BlockType::AParamB, &[2u8, 2][..]));
        assert_eq!(
            (p3.block, p3.payload.as_ref()),
            (BlockType::AParamC, &[3u8, 3, 3][..])
        );
    }

    #[test]
    fn partial_read_handling() {
        let bytes = wire(&[(BlockType::BParamA, &[0x55, 0xAA, 9][..])]);
        let byte_reader = ByteByByteReader { bytes, pos: 0 };
        let mut reader = PacketReader::new(byte_reader);

        let packet = reader.read_packet().unwrap();
        assert_eq!(packet.block, BlockType::BParamA);
        assert_eq!(packet.payload.as_ref(), &[0x55, 0xAA, 9]);
    }

    #[test]
    fn connection_closed_cleanly() {
        let mut reader = PacketReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn connection_closed_mid_packet() {
        let mut reader = PacketReader::new(Cursor::new(vec![0xAA, 0x02, 1, 2]));
        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn recovers_after_line_noise() {
        let mut bytes = vec![0x13, 0x37, 0xAA, 0x00, 0x01];
        bytes.extend(wire(&[(BlockType::AParamA, &[42][..])]));
        let mut reader = PacketReader::new(Cursor::new(bytes));

        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, FrameError::UnterminatedPacket));

        let packet = reader.read_packet().unwrap();
        assert_eq!(packet.block, BlockType::AParamA);
        assert_eq!(packet.payload.as_ref(), &[42]);
    }

    #[test]
    fn contract_violations_surface() {
        let cfg = FrameConfig {
            contract: Some(LengthContract::PRIMARY),
            ..FrameConfig::default()
        };
        let bytes = wire(&[(BlockType::AInstructions, &[1, 1][..])]);
        let mut reader = PacketReader::with_config(Cursor::new(bytes), cfg);

        let err = reader.read_packet().unwrap_err();
        assert!(matches!(
            err,
            FrameError::LengthMismatch {
                expected: 16,
                actual: 2,
                ..
            }
        ));
        assert!(reader.config().contract.is_some());
    }

    #[test]
    fn handles_interrupted_read() {
        let bytes = wire(&[(BlockType::BParamC, &[1][..])]);
        let mut reader = PacketReader::new(InterruptedOnce {
            inner: Cursor::new(bytes),
            interrupted: false,
        });

        let packet = reader.read_packet().unwrap();
        assert_eq!(packet.block, BlockType::BParamC);
        assert!(reader.get_ref().interrupted);
    }

    #[test]
    fn io_error_is_propagated() {
        let mut reader = PacketReader::new(FailingReader);
        let err = reader.read_packet().unwrap_err();
        assert!(matches!(err, FrameError::Io(_)));
        let _ = reader.into_inner();
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedOnce {
        inner: Cursor<Vec<u8>>,
        interrupted: bool,
    }

    impl Read for InterruptedOnce {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device gone"))
        }
    }
}
