use crate::error::FrameError;

//frame layout: [f32 LE steering][f32 LE speed][f32 LE accel][u8 checksum]
pub const PAYLOAD_SIZE: usize = 12;       //3 * f32
pub const FRAME_SIZE: usize = PAYLOAD_SIZE + 1;

/// Outbound drive command, consumed as soon as it is encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CommandFrame{
    pub steering_angle: f32,  //rad
    pub speed: f32,           //m/s
    pub acceleration: f32,    //m/s²
}

/// Drive state reported by the microcontroller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatusFrame{
    pub steering_angle: f32,
    pub speed: f32,
    pub acceleration: f32,
    pub checksum: u8,
}

/// 8-bit truncated sum. Catches any single-bit error, nothing more;
/// this is not an integrity guarantee against deliberate tampering.
pub fn checksum(payload: &[u8]) -> u8{
    payload.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

impl CommandFrame{
    pub fn new(steering_angle: f32, speed: f32, acceleration: f32) -> Self{
        CommandFrame{ steering_angle, speed, acceleration }
    }

    pub fn encode(&self) -> [u8; FRAME_SIZE]{
        encode(self.steering_angle, self.speed, self.acceleration)
    }
}

pub fn encode(steering_angle: f32, speed: f32, acceleration: f32) -> [u8; FRAME_SIZE]{
    let mut frame = [0u8; FRAME_SIZE];
    frame[0..4].copy_from_slice(&steering_angle.to_le_bytes());
    frame[4..8].copy_from_slice(&speed.to_le_bytes());
    frame[8..12].copy_from_slice(&acceleration.to_le_bytes());
    frame[PAYLOAD_SIZE] = checksum(&frame[..PAYLOAD_SIZE]);
    frame
}

/// Values are passed through unranged; only the checksum is validated.
pub fn decode(frame: &[u8; FRAME_SIZE]) -> Result<StatusFrame, FrameError>{
    let expected = checksum(&frame[..PAYLOAD_SIZE]);
    let found = frame[PAYLOAD_SIZE];
    if expected != found{
        return Err(FrameError::ChecksumMismatch{ expected, found });
    }

    Ok(StatusFrame{
        steering_angle: read_f32(frame, 0),
        speed: read_f32(frame, 4),
        acceleration: read_f32(frame, 8),
        checksum: found,
    })
}

pub fn decode_slice(data: &[u8]) -> Result<StatusFrame, FrameError>{
    let frame: &[u8; FRAME_SIZE] = data.try_into().map_err(|_| FrameError::Length{
        expected: FRAME_SIZE,
        actual: data.len(),
    })?;
    decode(frame)
}

fn read_f32(frame: &[u8; FRAME_SIZE], offset: usize) -> f32{
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&frame[offset..offset + 4]);
    f32::from_le_bytes(raw)
}
