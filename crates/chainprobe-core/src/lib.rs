//! Real-time probe engine: frame accumulation, chain control, and
//! lock-free metric publishing.
//!
//! # Primary API
//!
//! - [`ChainController`] / [`ProbeHandle`]: audio-thread and control-thread
//!   halves of the engine, created as a pair from a [`ProbeConfig`]
//! - [`ChainProcessor`]: trait for the hosted secondary processor
//! - [`MetricsPublisher`] / [`MetricsSnapshot`]: wait-free snapshot handoff
//! - [`FrameAccumulator`]: callback-block to analysis-frame FIFO
//!
//! # Example
//!
//! ```rust
//! use chainprobe_core::{ChainController, ProbeConfig};
//!
//! let (mut controller, handle) = ChainController::new(&ProbeConfig::default())?;
//!
//! // Audio thread: per-callback processing.
//! let mut left = vec![0.0f32; 4096];
//! let mut right = vec![0.0f32; 4096];
//! let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
//! controller.process_block(&mut channels);
//!
//! // UI thread: pull the latest metrics.
//! let snapshot = handle.snapshot();
//! assert_eq!(snapshot.sequence, 1);
//! # Ok::<(), chainprobe_core::Error>(())
//! ```

pub mod error;
pub use error::{Error, Result};

mod config;
pub use config::{ProbeConfig, DEFAULT_FRAME_SIZE, DEFAULT_ROLLOFF_PERCENT};

pub(crate) mod lockfree;
pub use lockfree::{AtomicFlag, AtomicFloat};

mod fifo;
pub use fifo::FrameAccumulator;

mod snapshot;
pub use snapshot::{MetricsPublisher, MetricsSnapshot};

mod host;
pub use host::{ChainProcessor, ProcessorSlot, SlotHandle};

mod chain;
pub use chain::{ChainController, InputMode};

mod handle;
pub use handle::ProbeHandle;

/// Re-export of the analysis crate for direct access.
pub use chainprobe_analysis as analysis;
pub use chainprobe_analysis::{FrameAnalyzer, MetricSet, METRIC_COUNT};
