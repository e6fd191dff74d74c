use std::sync::mpsc::Receiver;

use crate::error::BridgeError;
use crate::uart::{decode, CommandFrame, FrameAccumulator, SerialIo};
use super::event::BridgeEvent;
use super::StatusPublisher;

/// Link counters, returned when the bridge stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats{
    pub frames_published: u64,
    pub checksum_failures: u64,
    pub commands_sent: u64,
    pub write_failures: u64,
    pub read_errors: u64,
}

/// Exclusive owner of the serial link. Dropping it closes the port.
pub struct BridgeContext<S: SerialIo, P: StatusPublisher>{
    port: S,
    publisher: P,
    rx: FrameAccumulator,
    read_buf: Vec<u8>,
    stats: BridgeStats,
}

impl<S: SerialIo, P: StatusPublisher> BridgeContext<S, P>{
    pub fn new(port: S, publisher: P) -> Self{
        BridgeContext{
            port,
            publisher,
            rx: FrameAccumulator::new(),
            read_buf: Vec::with_capacity(256),
            stats: BridgeStats::default(),
        }
    }

    pub fn stats(&self) -> BridgeStats{
        self.stats
    }

    /// Bytes buffered towards the next frame.
    pub fn pending_bytes(&self) -> usize{
        self.rx.pending()
    }

    /// Drop buffered bytes so the next byte read starts a frame.
    pub fn resync(&mut self){
        self.rx.reset();
    }

    /// One poll tick: read what is available, publish every valid frame.
    /// Frames with a bad checksum are dropped without retry.
    pub fn poll_once(&mut self) -> Result<usize, BridgeError>{
        let available = self.port.bytes_available().map_err(BridgeError::SerialRead)?;
        if available > 0{
            self.read_buf.resize(available, 0);
            let n = self.port
                .read_available(&mut self.read_buf)
                .map_err(BridgeError::SerialRead)?;
            self.rx.append(&self.read_buf[..n]);
        }

        let mut published = 0;
        for frame in self.rx.extract_frames(){
            match decode(&frame){
                Ok(status) =>{
                    log::debug!(
                        "<- s={:.2} v={:.2} a={:.2}",
                        status.steering_angle, status.speed, status.acceleration
                    );
                    self.publisher.publish(status);
                    self.stats.frames_published += 1;
                    published += 1;
                }
                Err(e) =>{
                    self.stats.checksum_failures += 1;
                    log::trace!("dropped frame: {}", e);
                }
            }
        }
        Ok(published)
    }

    /// Encode and write one command. Blocks until the write returns.
    pub fn handle_command(&mut self, command: CommandFrame) -> Result<(), BridgeError>{
        let frame = command.encode();
        match self.port.write_frame(&frame){
            Ok(()) =>{
                self.stats.commands_sent += 1;
                log::debug!(
                    "-> s={:.2} v={:.2} a={:.2}",
                    command.steering_angle, command.speed, command.acceleration
                );
                Ok(())
            }
            Err(e) =>{
                self.stats.write_failures += 1;
                Err(BridgeError::SerialWrite(e))
            }
        }
    }

    /// Consume events until `Shutdown` or until every producer is gone.
    pub fn run(mut self, events: Receiver<BridgeEvent>) -> BridgeStats{
        log::info!("bridge loop started");

        for event in events.iter(){
            match event{
                BridgeEvent::Tick =>{
                    if let Err(e) = self.poll_once(){
                        self.stats.read_errors += 1;
                        log::warn!("{}", e);
                    }
                }
                BridgeEvent::Command(command) =>{
                    if let Err(e) = self.handle_command(command){
                        log::warn!("command dropped: {}", e);
                    }
                }
                BridgeEvent::Shutdown => break,
            }
        }

        let stats = self.stats;
        log::info!(
            "bridge loop stopped: {} published, {} bad checksum, {} sent, {} write failures",
            stats.frames_published, stats.checksum_failures, stats.commands_sent, stats.write_failures
        );
        stats
    }
}
