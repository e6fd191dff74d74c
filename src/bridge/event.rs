use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::uart::{CommandFrame, SerialIo};
use super::controller::{BridgeContext, BridgeStats};
use super::{CommandSink, StatusPublisher};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BridgeEvent{
    /// Run one read/decode/publish cycle.
    Tick,
    /// Encode and write one drive command.
    Command(CommandFrame),
    Shutdown,
}

/// Cloneable handle for pushing commands into the bridge loop.
#[derive(Clone)]
pub struct CommandSender{
    tx: SyncSender<BridgeEvent>,
}

impl CommandSender{
    /// Blocks while the event queue is full; commands are never dropped here.
    pub fn send(&self, command: CommandFrame) -> Result<(), BridgeError>{
        self.tx
            .send(BridgeEvent::Command(command))
            .map_err(|_| BridgeError::Closed)
    }
}

impl CommandSink for CommandSender{
    fn on_command(&self, command: CommandFrame){
        if self.send(command).is_err(){
            log::warn!("command arrived after bridge shutdown, dropped");
        }
    }
}

pub struct BridgeHandle{
    tx: SyncSender<BridgeEvent>,
    running: Arc<AtomicBool>,
    ticker: Option<JoinHandle<()>>,
}

impl BridgeHandle{
    pub fn command_sender(&self) -> CommandSender{
        CommandSender{ tx: self.tx.clone() }
    }

    pub fn is_running(&self) -> bool{
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the ticker and ask the loop to exit after the events already queued.
    pub fn shutdown(&mut self){
        self.running.store(false, Ordering::SeqCst);
        if let Some(ticker) = self.ticker.take(){
            let _ = ticker.join();
        }
        let _ = self.tx.send(BridgeEvent::Shutdown);
    }
}

impl Drop for BridgeHandle{
    fn drop(&mut self){
        if self.ticker.is_some(){
            self.shutdown();
        }
    }
}

pub struct Bridge;

impl Bridge{
    /// Spawn the consumer loop and its ticker. The loop thread returns the
    /// final counters; the port is released when it exits.
    pub fn start<S, P>(context: BridgeContext<S, P>, config: &BridgeConfig) -> (JoinHandle<BridgeStats>, BridgeHandle)
    where
        S: SerialIo + 'static,
        P: StatusPublisher + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(config.queue_depth.max(1));
        let running = Arc::new(AtomicBool::new(true));

        let worker = thread::spawn(move ||{
            context.run(rx)
        });

        let ticker = spawn_ticker(tx.clone(), Arc::clone(&running), config.poll_interval);

        let handle = BridgeHandle{
            tx,
            running,
            ticker: Some(ticker),
        };
        (worker, handle)
    }
}

fn spawn_ticker(tx: SyncSender<BridgeEvent>, running: Arc<AtomicBool>, interval: Duration) -> JoinHandle<()>{
    thread::spawn(move ||{
        while running.load(Ordering::SeqCst){
            thread::sleep(interval);
            match tx.try_send(BridgeEvent::Tick){
                Ok(()) => {}
                //loop is busy; the next tick reads everything anyway
                Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests{
    use super::*;
    use std::io;
    use std::sync::Mutex;
    use crate::uart::{encode, StatusFrame};

    //port shared with the test so writes can be inspected while the loop runs
    #[derive(Clone, Default)]
    struct SharedPort{
        incoming: Arc<Mutex<Vec<u8>>>,
        written: Arc<Mutex<Vec<u8>>>,
    }

    impl SerialIo for SharedPort{
        fn bytes_available(&mut self) -> io::Result<usize>{
            Ok(self.incoming.lock().unwrap().len())
        }

        fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize>{
            let mut incoming = self.incoming.lock().unwrap();
            let n = buf.len().min(incoming.len());
            buf[..n].copy_from_slice(&incoming[..n]);
            incoming.drain(..n);
            Ok(n)
        }

        fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>{
            self.written.lock().unwrap().extend_from_slice(frame);
            Ok(())
        }
    }

    #[test]
    fn test_start_poll_and_shutdown(){
        let port = SharedPort::default();
        port.incoming.lock().unwrap().extend_from_slice(&encode(0.1, 4.0, 0.0));

        let (status_tx, status_rx) = mpsc::channel();
        let publisher = move |status: StatusFrame|{
            let _ = status_tx.send(status);
        };

        let config = BridgeConfig::default();
        let (worker, mut handle) = Bridge::start(BridgeContext::new(port.clone(), publisher), &config);

        let status = status_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(status.speed, 4.0);

        let sender = handle.command_sender();
        sender.on_command(CommandFrame::new(0.2, 1.0, 0.0));
        sender.on_command(CommandFrame::new(0.3, 2.0, 0.0));

        handle.shutdown();
        assert!(!handle.is_running());
        let stats = worker.join().unwrap();

        assert_eq!(stats.frames_published, 1);
        assert_eq!(stats.commands_sent, 2);
        let mut expected = encode(0.2, 1.0, 0.0).to_vec();
        expected.extend_from_slice(&encode(0.3, 2.0, 0.0));
        assert_eq!(*port.written.lock().unwrap(), expected);

        //loop gone: further commands are refused
        assert!(matches!(sender.send(CommandFrame::default()), Err(BridgeError::Closed)));
    }
}
