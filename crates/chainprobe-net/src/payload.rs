//! Outbound request payload for the prompt-generation service.

use crate::Result;
use chainprobe_analysis::MetricSet;
use serde::Serialize;

/// Request body for the `generate_probe` endpoint.
///
/// The service expects every metric as a stringified float keyed by its
/// name, alongside the hosted-plugin descriptor and the user's free-text
/// prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeRequest {
    pub plugin_name: String,
    pub plugin_type: String,
    pub available_parameters: String,

    pub spectral_centroid: String,
    pub spectral_rolloff: String,
    pub spectral_flatness: String,
    pub resonance_score: String,
    pub harmonic_to_noise: String,

    pub rms: String,
    pub lufs: String,
    pub peak: String,
    pub crest_factor: String,
    pub transient_sharpness: String,
    pub decay_time: String,

    pub stereo_correlation: String,
    pub modulation_depth: String,

    pub prompt: String,
}

impl ProbeRequest {
    /// Build a request from the current metric snapshot.
    pub fn new(
        plugin_name: impl Into<String>,
        plugin_type: impl Into<String>,
        available_parameters: impl Into<String>,
        metrics: &MetricSet,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            plugin_type: plugin_type.into(),
            available_parameters: available_parameters.into(),

            spectral_centroid: stringify(metrics.spectral_centroid),
            spectral_rolloff: stringify(metrics.spectral_rolloff),
            spectral_flatness: stringify(metrics.spectral_flatness),
            resonance_score: stringify(metrics.resonance_score),
            harmonic_to_noise: stringify(metrics.harmonic_to_noise),

            rms: stringify(metrics.rms),
            lufs: stringify(metrics.lufs),
            peak: stringify(metrics.peak),
            crest_factor: stringify(metrics.crest_factor),
            transient_sharpness: stringify(metrics.transient_sharpness),
            decay_time: stringify(metrics.decay_time),

            stereo_correlation: stringify(metrics.stereo_correlation),
            modulation_depth: stringify(metrics.modulation_depth),

            prompt: prompt.into(),
        }
    }

    /// Serialize to the JSON body sent over the wire.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Fixed six-decimal float formatting, matching the service's expectation.
fn stringify(value: f32) -> String {
    format!("{value:.6}")
}
