//! Hosted-processor slot with replace-then-retire hot-swap.
//!
//! The control thread queues install/clear commands through a lock-free
//! queue; the audio thread applies them at callback boundaries, so the
//! instance in use is fixed for the duration of one callback. Replaced
//! instances travel back on a retire queue and are dropped by the control
//! thread, never on the audio thread.

use crate::{Error, Result};
use crossbeam::queue::ArrayQueue;
use std::sync::Arc;
use tracing::debug;

const COMMAND_QUEUE_SIZE: usize = 8;
const RETIRE_QUEUE_SIZE: usize = 8;

/// A secondary audio processor routed into the probe chain.
///
/// Implementations may carry internal state (filters, envelopes); the
/// chain never assumes statelessness. Processing mutates the block in
/// place and is infallible from the chain's point of view — a processor
/// that cannot act must leave the block unchanged.
pub trait ChainProcessor: Send {
    /// Human-readable processor name.
    fn name(&self) -> &str;

    /// Process one block of planar channel data in place.
    fn process(&mut self, channels: &mut [&mut [f32]]);

    /// Reset any internal state. Default: no-op.
    fn reset(&mut self) {}
}

enum SlotCommand {
    Install(Box<dyn ChainProcessor>),
    Clear,
}

/// Audio-thread side of the hosted-processor slot.
pub struct ProcessorSlot {
    active: Option<Box<dyn ChainProcessor>>,
    commands: Arc<ArrayQueue<SlotCommand>>,
    retired: Arc<ArrayQueue<Box<dyn ChainProcessor>>>,
}

/// Control-thread side of the hosted-processor slot.
///
/// Cloning is cheap - shared state is behind Arcs.
#[derive(Clone)]
pub struct SlotHandle {
    commands: Arc<ArrayQueue<SlotCommand>>,
    retired: Arc<ArrayQueue<Box<dyn ChainProcessor>>>,
}

impl ProcessorSlot {
    /// Create an empty slot and its control handle.
    pub fn new() -> (Self, SlotHandle) {
        let commands = Arc::new(ArrayQueue::new(COMMAND_QUEUE_SIZE));
        let retired = Arc::new(ArrayQueue::new(RETIRE_QUEUE_SIZE));

        let slot = Self {
            active: None,
            commands: Arc::clone(&commands),
            retired: Arc::clone(&retired),
        };
        let handle = SlotHandle { commands, retired };
        (slot, handle)
    }

    /// Apply pending install/clear commands. Call once per callback,
    /// before processing. Wait-free.
    pub fn apply_pending(&mut self) {
        loop {
            // Every swap may need a retire slot. When the queue is full the
            // control thread has stopped draining; commands stay queued
            // until it catches up, so no instance ever drops here.
            if self.retired.is_full() {
                return;
            }
            let Some(command) = self.commands.pop() else {
                return;
            };
            let replaced = match command {
                SlotCommand::Install(processor) => self.active.replace(processor),
                SlotCommand::Clear => self.active.take(),
            };
            if let Some(old) = replaced {
                let _ = self.retired.push(old);
            }
        }
    }

    /// Whether a processor is currently installed.
    pub fn is_loaded(&self) -> bool {
        self.active.is_some()
    }

    /// The installed processor, if any.
    #[inline]
    pub fn active_mut(&mut self) -> Option<&mut (dyn ChainProcessor + 'static)> {
        self.active.as_deref_mut()
    }
}

impl SlotHandle {
    /// Queue a processor install; it takes effect on the next callback.
    pub fn install(&self, processor: Box<dyn ChainProcessor>) -> Result<()> {
        debug!(name = processor.name(), "queueing hosted processor install");
        self.commands
            .push(SlotCommand::Install(processor))
            .map_err(|_| Error::SlotBusy)
    }

    /// Queue removal of the installed processor.
    pub fn clear(&self) -> Result<()> {
        self.commands
            .push(SlotCommand::Clear)
            .map_err(|_| Error::SlotBusy)
    }

    /// Drop processors the audio thread has retired. Returns the number
    /// released. Call periodically from the control thread.
    pub fn drain_retired(&self) -> usize {
        let mut released = 0;
        while let Some(old) = self.retired.pop() {
            debug!(name = old.name(), "releasing retired hosted processor");
            drop(old);
            released += 1;
        }
        released
    }
}
