/**
 * Firmware deploy
 *
 * Usage: fw-deploy <BINARY> [--address IP] [--port DEV]
 *
 * Tries an OTA upload to the device first. If that fails, waits for the
 * device to settle and flashes it over USB UART with the flashing tool.
 * Exit status: 0 on success, 1 if the image is missing, otherwise the
 * flashing tool's failure code.
 */

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use drive_bridge::config::{FirmwareJob, DEFAULT_DEVICE_ADDRESS, DEFAULT_FLASH_PORT};
use drive_bridge::firmware::flasher::FLASH_TOOL;
use drive_bridge::firmware::{Deployer, DeployStage, HttpUploader, ProcessRunner};

/// Deliver a firmware image over the network, falling back to serial.
#[derive(Parser, Debug)]
#[command(name = "fw-deploy", version)]
struct Cli{
    /// Firmware image to deliver.
    binary: PathBuf,
    /// Network address of the device.
    #[arg(long, default_value = DEFAULT_DEVICE_ADDRESS)]
    address: String,
    /// USB UART used for the serial fallback.
    #[arg(long, default_value = DEFAULT_FLASH_PORT)]
    port: String,
    /// Flashing tool executable.
    #[arg(long, default_value = FLASH_TOOL)]
    tool: String,
}

fn main() -> ExitCode{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let job = FirmwareJob{
        binary_path: cli.binary,
        device_address: cli.address,
        serial_port: cli.port,
    };

    let uploader = match HttpUploader::new(){
        Ok(uploader) => uploader,
        Err(e) =>{
            log::error!("cannot build HTTP client: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut deployer = Deployer::new(uploader, ProcessRunner::new(&cli.tool));
    match deployer.deploy(&job){
        Ok(DeployStage::Network) =>{
            log::info!("deployed over the network");
            ExitCode::SUCCESS
        }
        Ok(DeployStage::Serial) =>{
            log::info!("deployed over serial");
            ExitCode::SUCCESS
        }
        Err(e) =>{
            log::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
