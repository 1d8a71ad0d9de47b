//! Per-frame metric extraction engine.

use crate::spectral;
use crate::spectrum::SpectrumAnalyzer;
use crate::temporal;

/// Number of scalar metrics in a [`MetricSet`].
pub const METRIC_COUNT: usize = 13;

/// One full set of scalar audio descriptors.
///
/// Produced once per completed analysis frame. Plain `Copy` data so it can
/// be handed across threads by value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricSet {
    pub spectral_centroid: f32,
    pub spectral_rolloff: f32,
    pub spectral_flatness: f32,
    pub resonance_score: f32,
    pub harmonic_to_noise: f32,
    pub rms: f32,
    pub lufs: f32,
    pub peak: f32,
    pub crest_factor: f32,
    pub transient_sharpness: f32,
    pub decay_time: f32,
    pub stereo_correlation: f32,
    pub modulation_depth: f32,
}

impl MetricSet {
    /// Flatten into a fixed array, in declaration order.
    pub fn to_array(&self) -> [f32; METRIC_COUNT] {
        [
            self.spectral_centroid,
            self.spectral_rolloff,
            self.spectral_flatness,
            self.resonance_score,
            self.harmonic_to_noise,
            self.rms,
            self.lufs,
            self.peak,
            self.crest_factor,
            self.transient_sharpness,
            self.decay_time,
            self.stereo_correlation,
            self.modulation_depth,
        ]
    }

    /// Rebuild from the array layout produced by [`MetricSet::to_array`].
    pub fn from_array(values: [f32; METRIC_COUNT]) -> Self {
        Self {
            spectral_centroid: values[0],
            spectral_rolloff: values[1],
            spectral_flatness: values[2],
            resonance_score: values[3],
            harmonic_to_noise: values[4],
            rms: values[5],
            lufs: values[6],
            peak: values[7],
            crest_factor: values[8],
            transient_sharpness: values[9],
            decay_time: values[10],
            stereo_correlation: values[11],
            modulation_depth: values[12],
        }
    }
}

/// Runs the complete metric pass for one completed frame.
///
/// Owns the windowed transform so repeated calls never allocate. The
/// time-domain metrics read the raw multi-channel callback block; the
/// spectral metrics read the windowed transform of the accumulated
/// single-channel frame.
pub struct FrameAnalyzer {
    spectrum: SpectrumAnalyzer,
    sample_rate: f64,
    rolloff_percent: f32,
}

impl FrameAnalyzer {
    /// Create an analyzer for `frame_size`-sample frames.
    ///
    /// `rolloff_percent` is the cumulative-energy fraction used for the
    /// spectral rolloff (0.95 in the reference chain).
    pub fn new(sample_rate: f64, frame_size: usize, rolloff_percent: f32) -> Self {
        Self {
            spectrum: SpectrumAnalyzer::new(frame_size),
            sample_rate,
            rolloff_percent,
        }
    }

    /// Frame size in samples.
    pub fn frame_size(&self) -> usize {
        self.spectrum.frame_size()
    }

    /// Sample rate the analyzer was built for.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Run every metric over one completed frame and its source block.
    ///
    /// `frame` is the accumulated reference-channel window; `channels` is
    /// the multi-channel block that was live when the frame completed.
    /// Real-time safe: no allocation, bounded work.
    pub fn analyze(&mut self, frame: &[f32], channels: &[&[f32]]) -> MetricSet {
        let rms = temporal::rms(channels);
        let lufs = temporal::gain_to_db(rms);
        let peak = temporal::peak_level(channels);
        let crest_factor = if rms > 0.0 { peak / rms } else { 0.0 };
        let transient_sharpness = temporal::transient_sharpness(channels);
        let decay_time = temporal::decay_time(channels, self.sample_rate);
        let stereo_correlation = temporal::stereo_correlation(channels);
        let modulation_depth = temporal::modulation_depth(channels, self.sample_rate);

        let magnitudes = self.spectrum.analyze(frame);

        MetricSet {
            spectral_centroid: spectral::spectral_centroid(magnitudes, self.sample_rate),
            spectral_rolloff: spectral::spectral_rolloff(
                magnitudes,
                self.sample_rate,
                self.rolloff_percent,
            ),
            spectral_flatness: spectral::spectral_flatness(magnitudes),
            resonance_score: spectral::resonance_score(magnitudes),
            harmonic_to_noise: spectral::harmonic_to_noise(magnitudes),
            rms,
            lufs,
            peak,
            crest_factor,
            transient_sharpness,
            decay_time,
            stereo_correlation,
            modulation_depth,
        }
    }
}
