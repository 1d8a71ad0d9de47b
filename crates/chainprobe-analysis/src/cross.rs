//! Cross-domain metrics.
//!
//! These are declared placeholders in the reference analysis chain and are
//! kept as stubs here: they return zero or empty results rather than
//! pretending to measure anything. Completing them (fundamental tracking
//! for THD, envelope FFT for modulation rate) is a separately scoped
//! extension.

/// Total harmonic distortion. Placeholder: always 0.
///
/// A real measurement needs fundamental detection plus a harmonic energy
/// sum.
pub fn thd(_channels: &[&[f32]], _sample_rate: f64) -> f32 {
    0.0
}

/// Intermodulation distortion. Placeholder: always 0.
pub fn intermodulation_distortion(_channels: &[&[f32]], _sample_rate: f64) -> f32 {
    0.0
}

/// Per-band spectral dynamics over time. Placeholder: always empty.
pub fn spectral_dynamics(_channels: &[&[f32]], _sample_rate: f64) -> Vec<f32> {
    Vec::new()
}

/// Modulation rate in Hz. Placeholder: always 0.
///
/// Would require an FFT of the amplitude envelope.
pub fn modulation_rate(_channels: &[&[f32]], _sample_rate: f64) -> f32 {
    0.0
}
