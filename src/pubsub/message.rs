use crate::uart::{CommandFrame, StatusFrame};

pub trait Message: Clone + Default + Send + 'static{}

//blanket impl for all types that meet constraints
impl<T: Clone + Default + Send + 'static> Message for T{}

/// Drive message exchanged on the command and status topics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveMsg{
    pub steering_angle: f32,
    pub speed: f32,
    pub acceleration: f32,
}

impl DriveMsg{
    pub fn new(steering_angle: f32, speed: f32, acceleration: f32) -> Self{
        DriveMsg{ steering_angle, speed, acceleration }
    }
}

impl From<StatusFrame> for DriveMsg{
    fn from(status: StatusFrame) -> Self{
        DriveMsg{
            steering_angle: status.steering_angle,
            speed: status.speed,
            acceleration: status.acceleration,
        }
    }
}

impl From<DriveMsg> for CommandFrame{
    fn from(msg: DriveMsg) -> Self{
        CommandFrame::new(msg.steering_angle, msg.speed, msg.acceleration)
    }
}
