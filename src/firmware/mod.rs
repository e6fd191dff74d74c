//! Firmware delivery: network upload first, serial flash as the one fallback.
//!
//! Stage order is fixed and each stage runs at most once per deployment.

pub mod deploy;
pub mod flasher;
pub mod ota;

pub use deploy::{DeployStage, Deployer, SETTLE_DELAY};
pub use flasher::{flash_args, ProcessRunner, ToolRunner};
pub use ota::{FirmwareUploader, HttpUploader, OTA_TIMEOUT};
pub use crate::config::FirmwareJob;
