//! Error types shared across the serial link and the firmware tooling.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn 13 raw bytes into a status sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError{
    /// Trailing byte disagrees with the sum of the payload.
    #[error("checksum mismatch: computed {expected:#04x}, frame carries {found:#04x}")]
    ChecksumMismatch{ expected: u8, found: u8 },

    /// Slice handed to the decoder is not exactly one frame long.
    #[error("frame must be {expected} bytes, got {actual}")]
    Length{ expected: usize, actual: usize },
}

/// Errors surfaced by the bridge controller. None of them stop the bridge.
#[derive(Debug, Error)]
pub enum BridgeError{
    #[error("serial write failed: {0}")]
    SerialWrite(#[source] std::io::Error),

    #[error("serial read failed: {0}")]
    SerialRead(#[source] std::io::Error),

    /// The consumer loop has already exited.
    #[error("bridge is not running")]
    Closed,
}

/// Stage 1 (network) failure. Every variant sends the deployment to stage 2.
#[derive(Debug, Error)]
pub enum OtaError{
    #[error("device did not answer within the upload timeout")]
    Timeout,

    #[error("could not connect to device: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("device answered HTTP {code}")]
    Status{ code: u16, body: String },

    #[error("upload request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("could not read firmware image: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for OtaError{
    fn from(err: reqwest::Error) -> Self{
        if err.is_timeout(){
            OtaError::Timeout
        }else if err.is_connect(){
            OtaError::Connect(err)
        }else{
            OtaError::Request(err)
        }
    }
}

/// Terminal failure of one firmware deployment.
#[derive(Debug, Error)]
pub enum DeployError{
    #[error("firmware image not found: {}", .0.display())]
    MissingImage(PathBuf),

    #[error("could not launch flashing tool: {0}")]
    ToolLaunch(#[source] std::io::Error),

    #[error("serial flash failed (tool exit {code})")]
    FlashFailed{ code: i32 },
}

impl DeployError{
    /// Process exit status for the `fw-deploy` command.
    ///
    /// A missing image always maps to 1. Tool exit codes are passed through
    /// when they cannot be confused with success or a missing image.
    pub fn exit_code(&self) -> u8{
        match self{
            DeployError::MissingImage(_) => 1,
            DeployError::ToolLaunch(_) => 2,
            DeployError::FlashFailed{ code } => match u8::try_from(*code){
                Ok(c) if c >= 2 => c,
                _ => 2,
            },
        }
    }
}
