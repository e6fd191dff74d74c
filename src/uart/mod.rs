pub mod protocol;
pub mod stream;

pub use protocol::*;
pub use stream::FrameAccumulator;

use std::io::{self, Read, Write};
use serialport::SerialPort;
use crate::config::BridgeConfig;

/// The three serial operations the bridge needs.
pub trait SerialIo: Send{
    /// Bytes received and not yet read.
    fn bytes_available(&mut self) -> io::Result<usize>;

    /// Read whatever is available into `buf`, bounded by the port's read timeout.
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Blocking write of a whole frame, flushed before returning.
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;
}

impl SerialIo for Box<dyn SerialPort>{
    fn bytes_available(&mut self) -> io::Result<usize>{
        let n = self.bytes_to_read()?;
        Ok(n as usize)
    }

    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize>{
        match self.read(buf){
            Ok(n) => Ok(n),
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>{
        self.write_all(frame)?;
        self.flush()
    }
}

pub fn open_port(config: &BridgeConfig) -> Result<Box<dyn SerialPort>, serialport::Error>{
    let port = serialport::new(&config.port_name, config.baud_rate)
        .timeout(config.read_timeout)
        .open()?;
    log::info!("opened {} at {} baud", config.port_name, config.baud_rate);
    Ok(port)
}
