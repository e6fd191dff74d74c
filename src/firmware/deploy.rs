use std::thread;
use std::time::Duration;

use crate::config::FirmwareJob;
use crate::error::DeployError;
use super::flasher::{flash_args, ToolRunner};
use super::ota::FirmwareUploader;

/// Pause between a failed network upload and the serial flash.
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Stage that delivered the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStage{
    Network,
    Serial,
}

pub struct Deployer<U: FirmwareUploader, R: ToolRunner>{
    uploader: U,
    runner: R,
    settle_delay: Duration,
}

impl<U: FirmwareUploader, R: ToolRunner> Deployer<U, R>{
    pub fn new(uploader: U, runner: R) -> Self{
        Deployer{
            uploader,
            runner,
            settle_delay: SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self{
        self.settle_delay = delay;
        self
    }

    pub fn uploader(&self) -> &U{
        &self.uploader
    }

    pub fn runner(&self) -> &R{
        &self.runner
    }

    /// Network upload, then at most one serial flash. No retries.
    pub fn deploy(&mut self, job: &FirmwareJob) -> Result<DeployStage, DeployError>{
        let image = &job.binary_path;
        let size = match std::fs::metadata(image){
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Err(DeployError::MissingImage(image.clone())),
        };
        log::info!(
            "firmware {} ({:.1} KB), target {}",
            image.display(), size as f64 / 1024.0, job.device_address
        );

        match self.uploader.upload(&job.device_address, image){
            Ok(()) => return Ok(DeployStage::Network),
            Err(e) => log::warn!("OTA failed: {}", e),
        }

        log::warn!("switching to serial flash on {}", job.serial_port);
        thread::sleep(self.settle_delay);

        let code = self.runner
            .run(&flash_args(job))
            .map_err(DeployError::ToolLaunch)?;
        if code == 0{
            log::info!("serial flash succeeded");
            Ok(DeployStage::Serial)
        }else{
            Err(DeployError::FlashFailed{ code })
        }
    }
}
