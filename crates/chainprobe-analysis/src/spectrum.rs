//! Windowed spectral transform over fixed-size frames.
//!
//! Applies a Hann window and a real-input forward FFT, producing N/2
//! magnitude bins. Everything is pre-allocated at construction so
//! [`SpectrumAnalyzer::analyze`] is safe to call from the audio thread.

use realfft::{num_complex::Complex32, RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Hann-windowed real FFT of a fixed frame size.
///
/// The frame size must be a power of two (radix-2 transform). Magnitude
/// output covers bins `[0, N/2)`; phase is discarded.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn RealToComplex<f32>>,
    window: Vec<f32>,
    input: Vec<f32>,
    scratch: Vec<Complex32>,
    output: Vec<Complex32>,
    magnitudes: Vec<f32>,
}

impl SpectrumAnalyzer {
    /// Create an analyzer for frames of `frame_size` samples.
    ///
    /// `frame_size` must be at least 2; the window formula divides by
    /// `frame_size - 1`.
    pub fn new(frame_size: usize) -> Self {
        let fft = RealFftPlanner::<f32>::new().plan_fft_forward(frame_size);
        let scratch = fft.make_scratch_vec();
        let output = fft.make_output_vec();

        Self {
            fft,
            window: hann_window(frame_size),
            input: vec![0.0; frame_size],
            scratch,
            output,
            magnitudes: vec![0.0; frame_size / 2],
        }
    }

    /// Frame size in samples.
    pub fn frame_size(&self) -> usize {
        self.window.len()
    }

    /// Number of magnitude bins produced per frame (N/2).
    pub fn num_bins(&self) -> usize {
        self.magnitudes.len()
    }

    /// Window and transform one completed frame, returning the magnitude bins.
    ///
    /// The returned slice is valid until the next call. No allocation.
    pub fn analyze(&mut self, frame: &[f32]) -> &[f32] {
        debug_assert_eq!(frame.len(), self.window.len());

        for ((dst, &s), &w) in self.input.iter_mut().zip(frame).zip(&self.window) {
            *dst = s * w;
        }

        // Lengths are fixed at construction, so the transform cannot fail.
        let _ = self
            .fft
            .process_with_scratch(&mut self.input, &mut self.output, &mut self.scratch);

        for (m, c) in self.magnitudes.iter_mut().zip(&self.output) {
            *m = c.norm();
        }

        &self.magnitudes
    }
}

/// Create a Hann window of the given size (at least 2 points).
fn hann_window(size: usize) -> Vec<f32> {
    debug_assert!(size > 1, "Hann window needs at least two points");
    (0..size)
        .map(|i| {
            let angle = 2.0 * core::f32::consts::PI * i as f32 / (size - 1) as f32;
            0.5 * (1.0 - angle.cos())
        })
        .collect()
}
