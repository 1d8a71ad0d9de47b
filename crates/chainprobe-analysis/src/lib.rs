//! # Chainprobe Analysis
//!
//! Audio metric extraction for the chainprobe engine.
//!
//! This crate provides the analysis half of the probe pipeline:
//! - **Windowed transform**: Hann-windowed real-input FFT over fixed-size frames
//! - **Spectral metrics**: centroid, rolloff, flatness, resonance, harmonic-to-noise
//! - **Temporal metrics**: RMS, peak, crest factor, transient sharpness, decay
//!   time, stereo correlation, modulation depth
//! - **Frame engine**: one call that turns a completed frame plus the raw
//!   multi-channel block into a full [`MetricSet`]
//!
//! All functions operate on raw `&[f32]` sample or magnitude buffers - no
//! framework dependencies. Every metric tolerates degenerate input (silence,
//! zero spectrum) and returns a defined default instead of NaN or infinity.
//!
//! ## Example
//!
//! ```rust
//! use chainprobe_analysis::FrameAnalyzer;
//!
//! let sample_rate = 44100.0;
//! let mut analyzer = FrameAnalyzer::new(sample_rate, 4096, 0.95);
//!
//! let frame = vec![0.0f32; 4096];
//! let block = vec![0.0f32; 512];
//! let channels: [&[f32]; 2] = [&block, &block];
//!
//! let metrics = analyzer.analyze(&frame, &channels);
//! assert_eq!(metrics.rms, 0.0);
//! ```

pub mod cross;
pub mod spectral;
pub mod spectrum;
pub mod temporal;

mod engine;

pub use engine::{FrameAnalyzer, MetricSet, METRIC_COUNT};
pub use spectrum::SpectrumAnalyzer;
pub use temporal::{gain_to_db, MINUS_INFINITY_DB};
