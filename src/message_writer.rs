//! Outbound transport seam shared with real-device acquisition.
//!
//! When sweeps come from a physical digitizer instead of the virtual engine,
//! both paths hand the same fixed-length byte record to a writer over an
//! arbitrary byte stream. The wire layout is pluggable through
//! [`MessageSerializer`].

use crate::scope_model::SampleBuffer;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum MessageWriterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("payload of {len} bytes exceeds the {max}-byte frame limit")]
    PayloadTooLarge { len: usize, max: usize },
}

/// One outbound message: a channel tag and its raw sweep bytes.
#[derive(Debug, Clone, Copy)]
pub struct Message<'a> {
    pub channel: u8,
    pub payload: &'a [u8],
}

impl<'a> Message<'a> {
    /// Frame a channel's completed sweep.
    pub fn sweep(channel: u8, samples: &'a SampleBuffer) -> Self {
        Self {
            channel,
            payload: samples.as_slice(),
        }
    }
}

/// Wire layout for outbound messages.
pub trait MessageSerializer {
    fn serialize(
        &self,
        stream: &mut dyn Write,
        message: &Message<'_>,
    ) -> Result<(), MessageWriterError>;
}

/// Minimal binary framing: channel byte, little-endian `u16` payload length,
/// payload bytes.
#[derive(Debug, Default)]
pub struct RawFrameSerializer;

impl MessageSerializer for RawFrameSerializer {
    fn serialize(
        &self,
        stream: &mut dyn Write,
        message: &Message<'_>,
    ) -> Result<(), MessageWriterError> {
        let len = message.payload.len();
        if len > usize::from(u16::MAX) {
            return Err(MessageWriterError::PayloadTooLarge {
                len,
                max: usize::from(u16::MAX),
            });
        }

        stream.write_all(&[message.channel])?;
        stream.write_all(&(len as u16).to_le_bytes())?;
        stream.write_all(message.payload)?;
        Ok(())
    }
}

/// Writes messages to a byte stream through a serializer.
pub struct MessageWriter<W: Write, S: MessageSerializer> {
    stream: W,
    serializer: S,
}

impl<W: Write, S: MessageSerializer> MessageWriter<W, S> {
    pub fn new(stream: W, serializer: S) -> Self {
        Self { stream, serializer }
    }

    pub fn write(&mut self, message: &Message<'_>) -> Result<(), MessageWriterError> {
        self.serializer.serialize(&mut self.stream, message)
    }

    /// Consume the writer and hand back the underlying stream.
    pub fn into_inner(self) -> W {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_frame_layout() {
        let mut samples = SampleBuffer::new(3);
        samples[0] = 10;
        samples[1] = 128;
        samples[2] = 255;

        let mut writer = MessageWriter::new(Vec::new(), RawFrameSerializer);
        writer.write(&Message::sweep(1, &samples)).unwrap();

        let bytes = writer.into_inner();
        assert_eq!(bytes, vec![1, 3, 0, 10, 128, 255]);
    }

    #[test]
    fn test_consecutive_frames_append() {
        let samples = SampleBuffer::new(2);

        let mut writer = MessageWriter::new(Vec::new(), RawFrameSerializer);
        writer.write(&Message::sweep(0, &samples)).unwrap();
        writer.write(&Message::sweep(1, &samples)).unwrap();

        assert_eq!(writer.into_inner().len(), 2 * (1 + 2 + 2));
    }

    #[test]
    fn test_oversized_payload_is_rejected() {
        let payload = vec![0u8; usize::from(u16::MAX) + 1];
        let message = Message {
            channel: 0,
            payload: &payload,
        };

        let mut writer = MessageWriter::new(Vec::new(), RawFrameSerializer);
        match writer.write(&message) {
            Err(MessageWriterError::PayloadTooLarge { len, .. }) => {
                assert_eq!(len, usize::from(u16::MAX) + 1);
            }
            other => panic!("expected PayloadTooLarge, got {:?}", other),
        }
    }
}
