/**
 * Serial bridge
 *
 * One consumer thread owns the serial link. Two producers feed it:
 * - a ticker that asks for a read/decode/publish cycle every poll interval
 * - any number of command senders, one frame written per command
 *
 * Reads and writes never overlap because only the consumer touches the port.
 */

pub mod controller;
pub mod event;

pub use controller::{BridgeContext, BridgeStats};
pub use event::{Bridge, BridgeEvent, BridgeHandle, CommandSender};

use crate::uart::{CommandFrame, StatusFrame};

/// Where decoded status frames go.
pub trait StatusPublisher: Send{
    fn publish(&mut self, status: StatusFrame);
}

impl<F: FnMut(StatusFrame) + Send> StatusPublisher for F{
    fn publish(&mut self, status: StatusFrame){
        self(status)
    }
}

/// Registration point for inbound drive commands.
pub trait CommandSink{
    fn on_command(&self, command: CommandFrame);
}
