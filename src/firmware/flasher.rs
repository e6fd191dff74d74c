use std::io;
use std::process::Command;

use crate::config::FirmwareJob;

pub const FLASH_TOOL: &str = "esptool.py";
pub const CHIP: &str = "esp32";
pub const FLASH_BAUD: u32 = 921_600;
pub const RESET_BEFORE: &str = "default_reset";
pub const RESET_AFTER: &str = "hard_reset";
pub const APP_OFFSET: &str = "0x1000";

/// Runs the external flashing tool and reports its exit code.
pub trait ToolRunner{
    fn run(&mut self, args: &[String]) -> io::Result<i32>;
}

/// Argument list handed to the flashing tool. Fixed apart from port and image.
pub fn flash_args(job: &FirmwareJob) -> Vec<String>{
    vec![
        "--chip".to_string(), CHIP.to_string(),
        "--port".to_string(), job.serial_port.clone(),
        "--baud".to_string(), FLASH_BAUD.to_string(),
        "--before".to_string(), RESET_BEFORE.to_string(),
        "--after".to_string(), RESET_AFTER.to_string(),
        "write_flash".to_string(), "-z".to_string(), "--verbose".to_string(),
        APP_OFFSET.to_string(), job.binary_path.display().to_string(),
    ]
}

/// Spawns the tool as a child process with inherited stdio and waits for it.
pub struct ProcessRunner{
    program: String,
}

impl ProcessRunner{
    pub fn new(program: &str) -> Self{
        ProcessRunner{ program: program.to_string() }
    }
}

impl Default for ProcessRunner{
    fn default() -> Self{
        Self::new(FLASH_TOOL)
    }
}

impl ToolRunner for ProcessRunner{
    fn run(&mut self, args: &[String]) -> io::Result<i32>{
        log::info!("{} {}", self.program, args.join(" "));
        let status = Command::new(&self.program).args(args).status()?;
        match status.code(){
            Some(code) => Ok(code),
            None =>{
                log::warn!("{} terminated by signal", self.program);
                Ok(-1)
            }
        }
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn test_flash_args_contract(){
        let mut job = FirmwareJob::new("out/fw.bin");
        job.serial_port = "/dev/ttyUSB3".to_string();

        let args = flash_args(&job);
        assert_eq!(args, vec![
            "--chip", "esp32",
            "--port", "/dev/ttyUSB3",
            "--baud", "921600",
            "--before", "default_reset",
            "--after", "hard_reset",
            "write_flash", "-z", "--verbose",
            "0x1000", "out/fw.bin",
        ]);
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_exit_codes(){
        let mut ok = ProcessRunner::new("true");
        assert_eq!(ok.run(&[]).unwrap(), 0);

        let mut sh = ProcessRunner::new("sh");
        let code = sh.run(&["-c".to_string(), "exit 3".to_string()]).unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    fn test_missing_tool_is_launch_error(){
        let mut runner = ProcessRunner::new("no-such-flasher-binary-xyz");
        let err = runner.run(&[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
