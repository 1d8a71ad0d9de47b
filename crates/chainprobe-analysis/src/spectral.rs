//! Frequency-domain metrics over a magnitude spectrum.
//!
//! All functions take the N/2 magnitude bins produced by
//! [`crate::SpectrumAnalyzer`] and treat the implied FFT size as twice the
//! bin count. Degenerate spectra (all-zero) return 0 rather than NaN.

/// Guard against log-of-zero in flatness computation.
const FLATNESS_EPSILON: f32 = 1e-12;

/// Spectral centroid in Hz.
///
/// Magnitude-weighted mean bin index, scaled to Hz. Returns 0 for an
/// all-zero spectrum.
pub fn spectral_centroid(magnitudes: &[f32], sample_rate: f64) -> f32 {
    let mut numerator = 0.0f32;
    let mut denominator = 0.0f32;
    for (k, &mag) in magnitudes.iter().enumerate() {
        numerator += k as f32 * mag;
        denominator += mag;
    }

    if denominator == 0.0 {
        return 0.0;
    }
    let fft_size = (magnitudes.len() * 2) as f32;
    (numerator / denominator) * (sample_rate as f32 / fft_size)
}

/// Spectral rolloff frequency in Hz.
///
/// The frequency of the first bin at which the cumulative magnitude sum
/// reaches `rolloff_percent` of the total. Returns 0 if the threshold is
/// never reached (zero-energy spectrum).
pub fn spectral_rolloff(magnitudes: &[f32], sample_rate: f64, rolloff_percent: f32) -> f32 {
    let total: f32 = magnitudes.iter().sum();
    let threshold = total * rolloff_percent;
    let fft_size = (magnitudes.len() * 2) as f32;

    let mut cumulative = 0.0f32;
    for (k, &mag) in magnitudes.iter().enumerate() {
        cumulative += mag;
        if cumulative >= threshold && total > 0.0 {
            return k as f32 * (sample_rate as f32 / fft_size);
        }
    }
    0.0
}

/// Spectral flatness (geometric mean over arithmetic mean).
///
/// 1.0 for a perfectly flat spectrum, approaching 0 for a single peak.
/// A small epsilon keeps the geometric mean defined for zero bins.
pub fn spectral_flatness(magnitudes: &[f32]) -> f32 {
    if magnitudes.is_empty() {
        return 0.0;
    }

    // Geometric mean via log-domain sum to avoid underflow over N/2 bins.
    let mut log_sum = 0.0f32;
    let mut arith_mean = 0.0f32;
    for &mag in magnitudes {
        let m = mag + FLATNESS_EPSILON;
        log_sum += m.ln();
        arith_mean += m;
    }
    let n = magnitudes.len() as f32;
    let geo_mean = (log_sum / n).exp();
    arith_mean /= n;

    if arith_mean > 0.0 {
        geo_mean / arith_mean
    } else {
        0.0
    }
}

/// Resonance score: peak bin magnitude over mean bin magnitude.
///
/// High values indicate a strongly resonant (peaky) spectrum. Returns 0
/// for an all-zero spectrum.
pub fn resonance_score(magnitudes: &[f32]) -> f32 {
    if magnitudes.is_empty() {
        return 0.0;
    }

    let mut max_peak = 0.0f32;
    let mut avg = 0.0f32;
    for &mag in magnitudes {
        max_peak = max_peak.max(mag);
        avg += mag;
    }
    avg /= magnitudes.len() as f32;

    if avg > 0.0 {
        max_peak / avg
    } else {
        0.0
    }
}

/// Simplified harmonic-to-noise ratio.
///
/// Compares the strongest peak in bins `[1, N/2)` against the average of
/// the remaining bins with the peak excluded. Returns 0 when the noise
/// average is not positive.
pub fn harmonic_to_noise(magnitudes: &[f32]) -> f32 {
    if magnitudes.len() < 3 {
        return 0.0;
    }

    let mut max_peak = 0.0f32;
    let mut noise_sum = 0.0f32;
    for &mag in &magnitudes[1..] {
        max_peak = max_peak.max(mag);
        noise_sum += mag;
    }
    let noise_avg = (noise_sum - max_peak) / (magnitudes.len() - 1) as f32;

    if noise_avg > 0.0 {
        max_peak / noise_avg
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE_RATE: f64 = 44100.0;

    #[test]
    fn test_zero_spectrum_defaults() {
        let mags = vec![0.0f32; 2048];
        assert_eq!(spectral_centroid(&mags, SAMPLE_RATE), 0.0);
        assert_eq!(spectral_rolloff(&mags, SAMPLE_RATE, 0.95), 0.0);
        assert_eq!(resonance_score(&mags), 0.0);
        assert_eq!(harmonic_to_noise(&mags), 0.0);

        let flatness = spectral_flatness(&mags);
        assert!(flatness.is_finite());
    }

    #[test]
    fn test_centroid_of_single_bin() {
        let mut mags = vec![0.0f32; 2048];
        mags[100] = 1.0;

        let bin_width = SAMPLE_RATE as f32 / 4096.0;
        assert_relative_eq!(
            spectral_centroid(&mags, SAMPLE_RATE),
            100.0 * bin_width,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_rolloff_of_flat_spectrum() {
        let mags = vec![1.0f32; 2048];
        let rolloff = spectral_rolloff(&mags, SAMPLE_RATE, 0.95);

        // 95% of a flat spectrum sits below ~95% of Nyquist.
        let nyquist = SAMPLE_RATE as f32 / 2.0;
        assert!(rolloff > 0.90 * nyquist && rolloff < nyquist);
    }

    #[test]
    fn test_flatness_extremes() {
        let flat = vec![1.0f32; 2048];
        assert_relative_eq!(spectral_flatness(&flat), 1.0, epsilon = 1e-4);

        let mut peaky = vec![0.0f32; 2048];
        peaky[10] = 1.0;
        assert!(spectral_flatness(&peaky) < 0.01);
    }

    #[test]
    fn test_resonance_of_flat_vs_peaky() {
        let flat = vec![1.0f32; 2048];
        assert_relative_eq!(resonance_score(&flat), 1.0, epsilon = 1e-6);

        let mut peaky = vec![0.1f32; 2048];
        peaky[5] = 10.0;
        assert!(resonance_score(&peaky) > 50.0);
    }

    #[test]
    fn test_harmonic_to_noise_strong_peak() {
        let mut mags = vec![0.01f32; 2048];
        mags[40] = 1.0;

        let hnr = harmonic_to_noise(&mags);
        assert!(hnr > 50.0, "expected strong HNR, got {hnr}");
    }
}
