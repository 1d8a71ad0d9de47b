//! Wait-free metric snapshot publishing.
//!
//! A single-writer seqlock: the audio thread stores all metric fields
//! between an odd/even pair of sequence updates; readers retry when the
//! sequence changes under them. No lock, no allocation, no priority
//! inversion on the producer side.

use crate::lockfree::AtomicFloat;
use chainprobe_analysis::{MetricSet, METRIC_COUNT};
use core::sync::atomic::{fence, AtomicU64, Ordering};

/// An atomically consistent copy of the current metric values.
///
/// `sequence` counts publishes and increases monotonically; two snapshots
/// with the same sequence carry identical values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsSnapshot {
    pub metrics: MetricSet,
    pub sequence: u64,
}

/// Publishes metric sets from the audio thread to any number of readers.
///
/// Exactly one producer may call [`publish`](Self::publish); readers call
/// [`snapshot`](Self::snapshot) from any thread at any rate. A reader may
/// observe a stale snapshot between publishes but never a torn one.
pub struct MetricsPublisher {
    seq: AtomicU64,
    fields: [AtomicFloat; METRIC_COUNT],
}

impl Default for MetricsPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsPublisher {
    /// Create a publisher holding all-zero values at sequence 0.
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
            fields: core::array::from_fn(|_| AtomicFloat::new(0.0)),
        }
    }

    /// Publish a full metric set.
    ///
    /// Wait-free, allocation-free; called once per completed analysis pass
    /// by the single producer.
    pub fn publish(&self, metrics: &MetricSet) {
        let seq = self.seq.load(Ordering::Relaxed);

        // Odd sequence marks the write window; the fence keeps it visible
        // before any field store.
        self.seq.store(seq.wrapping_add(1), Ordering::Relaxed);
        fence(Ordering::Release);

        for (field, value) in self.fields.iter().zip(metrics.to_array()) {
            field.set(value);
        }

        self.seq.store(seq.wrapping_add(2), Ordering::Release);
    }

    /// Read the most recently published snapshot.
    ///
    /// Always returns a valid value; before the first publish this is the
    /// all-zero set at sequence 0. Retries while a publish is in flight.
    pub fn snapshot(&self) -> MetricsSnapshot {
        loop {
            let seq = self.seq.load(Ordering::Acquire);
            if seq & 1 == 1 {
                core::hint::spin_loop();
                continue;
            }

            let mut values = [0.0f32; METRIC_COUNT];
            for (value, field) in values.iter_mut().zip(&self.fields) {
                *value = field.get_relaxed();
            }

            fence(Ordering::Acquire);
            if self.seq.load(Ordering::Relaxed) == seq {
                return MetricsSnapshot {
                    metrics: MetricSet::from_array(values),
                    sequence: seq >> 1,
                };
            }
        }
    }
}
