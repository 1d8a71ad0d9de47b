//! Control-side handle for the probe engine.

use crate::chain::InputMode;
use crate::host::{ChainProcessor, SlotHandle};
use crate::lockfree::AtomicFlag;
use crate::snapshot::{MetricsPublisher, MetricsSnapshot};
use crate::Result;
use std::sync::Arc;

/// Handle held by the UI/network side of the probe.
///
/// Safe to call from any non-real-time thread at any rate; every method is
/// lock-free with respect to the audio thread.
#[derive(Clone)]
pub struct ProbeHandle {
    test_signal: Arc<AtomicFlag>,
    slot: SlotHandle,
    publisher: Arc<MetricsPublisher>,
    sample_rate: f64,
}

impl ProbeHandle {
    pub(crate) fn new(
        test_signal: Arc<AtomicFlag>,
        slot: SlotHandle,
        publisher: Arc<MetricsPublisher>,
        sample_rate: f64,
    ) -> Self {
        Self {
            test_signal,
            slot,
            publisher,
            sample_rate,
        }
    }

    /// Current input mode.
    pub fn mode(&self) -> InputMode {
        if self.test_signal.get() {
            InputMode::TestSignal
        } else {
            InputMode::Live
        }
    }

    /// Switch input mode; takes effect on the next audio callback.
    pub fn set_mode(&self, mode: InputMode) {
        self.test_signal.set(mode == InputMode::TestSignal);
    }

    /// Install a hosted processor into the chain.
    pub fn install_processor(&self, processor: Box<dyn ChainProcessor>) -> Result<()> {
        self.slot.install(processor)
    }

    /// Remove the hosted processor from the chain.
    pub fn clear_processor(&self) -> Result<()> {
        self.slot.clear()
    }

    /// Release processors the audio thread has swapped out. Returns the
    /// number dropped.
    pub fn drain_retired(&self) -> usize {
        self.slot.drain_retired()
    }

    /// The most recently published metric snapshot.
    ///
    /// Never blocks the audio thread; may be stale, never torn.
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.publisher.snapshot()
    }

    /// Sample rate the engine was built for.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}
