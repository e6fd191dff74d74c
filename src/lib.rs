pub mod config;
pub mod error;
pub mod ring_buffer;
pub mod pubsub;
pub mod uart;
pub mod bridge;
pub mod firmware;

pub use ring_buffer::RingBuffer;
pub use error::{BridgeError, DeployError, FrameError, OtaError};
pub use config::{BridgeConfig, FirmwareJob};

pub use uart::{
    CommandFrame, StatusFrame, FrameAccumulator, SerialIo,
    encode, decode, checksum, FRAME_SIZE, PAYLOAD_SIZE,
};

pub use bridge::{
    Bridge, BridgeContext, BridgeEvent, BridgeHandle, BridgeStats,
    CommandSender, CommandSink, StatusPublisher,
};

pub use pubsub::{
    Message, DriveMsg, Topic,
    Publisher, Subscriber, TopicRegistry,
};

pub use firmware::{Deployer, DeployStage, FirmwareUploader, HttpUploader, ProcessRunner, ToolRunner};
