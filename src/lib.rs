//! # Chainprobe
//!
//! An audio probe engine that hosts a secondary processor in its signal
//! chain, drives it with a white-noise test signal (or analyzes live
//! input), and extracts a continuously-updated set of spectral and
//! temporal metrics under hard real-time constraints.
//!
//! ## Architecture
//!
//! Chainprobe is an umbrella crate that coordinates:
//! - **chainprobe-core** - Frame accumulation, chain control, hosted
//!   processor hot-swap, wait-free snapshot publishing
//! - **chainprobe-analysis** - Windowed real FFT and the spectral/temporal
//!   metric functions
//! - **chainprobe-net** - Prompt-generation payload and reply parsing
//!   (feature `net`)
//!
//! ## Quick Start
//!
//! ```rust
//! use chainprobe::{ChainController, InputMode, ProbeConfig};
//!
//! let (mut controller, handle) = ChainController::new(&ProbeConfig::default())?;
//!
//! // The controller moves into the audio callback; each invocation hands
//! // it the current block.
//! let mut left = vec![0.0f32; 4096];
//! let mut right = vec![0.0f32; 4096];
//! let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
//! controller.process_block(&mut channels);
//!
//! // Any other thread pulls the latest metrics.
//! let snapshot = handle.snapshot();
//! assert!(snapshot.metrics.rms > 0.0);
//! # Ok::<(), chainprobe::Error>(())
//! ```

/// Re-export of chainprobe-core for direct access.
pub use chainprobe_core as core;

pub use chainprobe_core::{
    AtomicFlag, AtomicFloat, ChainController, ChainProcessor, Error, FrameAccumulator,
    InputMode, MetricsPublisher, MetricsSnapshot, ProbeConfig, ProbeHandle, ProcessorSlot,
    Result, SlotHandle, DEFAULT_FRAME_SIZE, DEFAULT_ROLLOFF_PERCENT,
};

/// Re-export of chainprobe-analysis for direct access.
pub use chainprobe_analysis as analysis;

pub use chainprobe_analysis::{FrameAnalyzer, MetricSet, SpectrumAnalyzer, METRIC_COUNT};

/// Prompt-generation boundary.
#[cfg(feature = "net")]
pub use chainprobe_net as net;

#[cfg(feature = "net")]
pub use chainprobe_net::{ParamTarget, ProbeRequest, PromptResponse};
