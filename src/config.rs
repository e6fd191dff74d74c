//! Runtime settings for the serial bridge and the firmware deployer.
//!
//! Values here are the defaults; the binaries override them from the command line.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyAMA0";
pub const DEFAULT_BAUD: u32 = 115_200;
pub const POLL_INTERVAL: Duration = Duration::from_millis(20);
pub const READ_TIMEOUT: Duration = Duration::from_millis(10);
pub const QUEUE_DEPTH: usize = 10;
pub const COMMAND_TOPIC: &str = "/driveData";
pub const STATUS_TOPIC: &str = "/driveStatus";

pub const DEFAULT_DEVICE_ADDRESS: &str = "10.0.0.232";
pub const DEFAULT_FLASH_PORT: &str = "/dev/ttyUSB0";

#[derive(Debug, Clone)]
pub struct BridgeConfig{
    pub port_name: String,
    pub baud_rate: u32,
    pub poll_interval: Duration,
    pub read_timeout: Duration,
    /// Depth of the command topics and of the bridge event queue.
    pub queue_depth: usize,
    pub command_topic: String,
    pub status_topic: String,
}

impl Default for BridgeConfig{
    fn default() -> Self{
        BridgeConfig{
            port_name: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_BAUD,
            poll_interval: POLL_INTERVAL,
            read_timeout: READ_TIMEOUT,
            queue_depth: QUEUE_DEPTH,
            command_topic: COMMAND_TOPIC.to_string(),
            status_topic: STATUS_TOPIC.to_string(),
        }
    }
}

impl BridgeConfig{
    pub fn new(port_name: &str) -> Self{
        BridgeConfig{
            port_name: port_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_baud(mut self, baud: u32) -> Self{
        self.baud_rate = baud;
        self
    }
}

/// One firmware delivery. Nothing persists between invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareJob{
    pub binary_path: PathBuf,
    pub device_address: String,
    pub serial_port: String,
}

impl FirmwareJob{
    pub fn new(binary_path: impl Into<PathBuf>) -> Self{
        FirmwareJob{
            binary_path: binary_path.into(),
            device_address: DEFAULT_DEVICE_ADDRESS.to_string(),
            serial_port: DEFAULT_FLASH_PORT.to_string(),
        }
    }
}
