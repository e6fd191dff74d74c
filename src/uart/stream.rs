//! Accumulates raw serial bytes across poll cycles and cuts them into frames.
//!
//! Frames are cut at fixed 13-byte boundaries counted from the first byte
//! ever appended (or from the last [`FrameAccumulator::reset`]). There is no
//! search for a frame start: a single inserted or lost byte shifts every
//! later boundary, and all following frames fail their checksum until the
//! buffer is reset.

use super::protocol::FRAME_SIZE;

pub struct FrameAccumulator{
    buffer: Vec<u8>,
}

impl FrameAccumulator{
    pub fn new() -> Self{
        FrameAccumulator{
            buffer: Vec::with_capacity(FRAME_SIZE * 16),
        }
    }

    pub fn append(&mut self, data: &[u8]){
        self.buffer.extend_from_slice(data);
    }

    /// Remove every complete frame from the front, oldest first.
    /// A trailing partial frame stays buffered for the next call.
    pub fn extract_frames(&mut self) -> Vec<[u8; FRAME_SIZE]>{
        let complete = self.buffer.len() / FRAME_SIZE;
        if complete == 0{
            return Vec::new();
        }

        let mut frames = Vec::with_capacity(complete);
        for chunk in self.buffer.chunks_exact(FRAME_SIZE){
            let mut frame = [0u8; FRAME_SIZE];
            frame.copy_from_slice(chunk);
            frames.push(frame);
        }
        self.buffer.drain(..complete * FRAME_SIZE);

        frames
    }

    /// Bytes waiting for the rest of their frame.
    pub fn pending(&self) -> usize{
        self.buffer.len()
    }

    pub fn reset(&mut self){
        self.buffer.clear();
    }
}

impl Default for FrameAccumulator{
    fn default() -> Self{
        Self::new()
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use crate::uart::protocol::{decode, encode};

    fn stream_of(count: usize) -> Vec<u8>{
        let mut bytes = Vec::new();
        for i in 0..count{
            bytes.extend_from_slice(&encode(i as f32 * 0.1, i as f32, -(i as f32)));
        }
        bytes
    }

    #[test]
    fn test_partial_frame_stays_buffered(){
        let mut acc = FrameAccumulator::new();
        let frame = encode(1.0, 2.0, 3.0);

        acc.append(&frame[..5]);
        assert!(acc.extract_frames().is_empty());
        assert_eq!(acc.pending(), 5);

        acc.append(&frame[5..]);
        let frames = acc.extract_frames();
        assert_eq!(frames, vec![frame]);
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_backlog_extracted_in_order(){
        let mut acc = FrameAccumulator::new();
        let bytes = stream_of(4);
        acc.append(&bytes);
        acc.append(&[0xAA, 0xBB]);

        let frames = acc.extract_frames();
        assert_eq!(frames.len(), 4);
        for (i, frame) in frames.iter().enumerate(){
            assert_eq!(decode(frame).unwrap().speed, i as f32);
        }
        assert_eq!(acc.pending(), 2);
    }

    #[test]
    fn test_chunking_does_not_change_result(){
        let bytes = stream_of(6);

        let mut whole = FrameAccumulator::new();
        whole.append(&bytes);
        let expected = whole.extract_frames();

        for chunk_size in [1usize, 2, 5, 12, 13, 14, 40]{
            let mut acc = FrameAccumulator::new();
            let mut got = Vec::new();
            for chunk in bytes.chunks(chunk_size){
                acc.append(chunk);
                got.extend(acc.extract_frames());
            }
            assert_eq!(got, expected, "chunk size {}", chunk_size);
            assert_eq!(acc.pending(), 0);
        }
    }

    #[test]
    fn test_dropped_byte_breaks_every_later_frame(){
        let mut bytes = stream_of(8);
        bytes.remove(13 * 2 + 4); //lose one byte inside the third frame

        let mut acc = FrameAccumulator::new();
        acc.append(&bytes);
        let frames = acc.extract_frames();

        assert_eq!(frames.len(), 7);
        assert!(decode(&frames[0]).is_ok());
        assert!(decode(&frames[1]).is_ok());
        //every boundary after the loss is shifted by one byte
        for frame in &frames[2..]{
            assert!(decode(frame).is_err());
        }
        assert_eq!(acc.pending(), 12);
    }

    #[test]
    fn test_reset_restores_alignment(){
        let mut acc = FrameAccumulator::new();
        acc.append(&[0x01]); //stray byte
        acc.append(&stream_of(2));
        assert!(acc.extract_frames().iter().all(|f| decode(f).is_err()));

        acc.reset();
        assert_eq!(acc.pending(), 0);
        acc.append(&stream_of(2));
        assert!(acc.extract_frames().iter().all(|f| decode(f).is_ok()));
    }
}
