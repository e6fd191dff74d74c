use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::OtaError;

pub const OTA_TIMEOUT: Duration = Duration::from_secs(60);
pub const UPDATE_FIELD: &str = "update";
pub const UPLOAD_FILE_NAME: &str = "firmware.bin";
pub const UPLOAD_MIME: &str = "application/octet-stream";

/// Stage 1 transport.
pub trait FirmwareUploader{
    fn upload(&self, device_address: &str, image: &Path) -> Result<(), OtaError>;
}

pub fn update_url(device_address: &str) -> String{
    format!("http://{}/update", device_address)
}

/// Multipart POST to the device's `/update` endpoint.
pub struct HttpUploader{
    client: Client,
}

impl HttpUploader{
    pub fn new() -> Result<Self, OtaError>{
        Self::with_timeout(OTA_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, OtaError>{
        //device sits on the local network, never behind a proxy
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;
        Ok(HttpUploader{ client })
    }
}

impl FirmwareUploader for HttpUploader{
    fn upload(&self, device_address: &str, image: &Path) -> Result<(), OtaError>{
        let url = update_url(device_address);
        log::info!("OTA -> {}", url);

        let part = Part::file(image)?
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME)?;
        let form = Form::new().part(UPDATE_FIELD, part);

        let response = self.client.post(&url).multipart(form).send()?;
        let status = response.status();
        if status == StatusCode::OK{
            log::info!("OTA accepted, device rebooting");
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        Err(OtaError::Status{ code: status.as_u16(), body })
    }
}
