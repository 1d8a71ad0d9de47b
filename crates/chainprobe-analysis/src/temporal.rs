//! Time-domain metrics over a multi-channel sample block.
//!
//! Channels are planar slices. Block-wide metrics (RMS, peak) pool every
//! channel into one running sum; per-channel metrics (transient sharpness,
//! decay, envelope) read channel 0 only, matching the reference analysis
//! chain. All metrics return a defined default on silence.

/// Floor used by [`gain_to_db`] for non-positive gain.
pub const MINUS_INFINITY_DB: f32 = -100.0;

/// Denominator guard for the stereo correlation.
const CORRELATION_EPSILON: f64 = 1e-12;

/// Envelope hop length for modulation analysis, in seconds (10 ms).
const ENVELOPE_HOP_SECONDS: f64 = 0.01;

/// Convert a linear gain to decibels, clamped at [`MINUS_INFINITY_DB`].
pub fn gain_to_db(gain: f32) -> f32 {
    if gain > 0.0 {
        (20.0 * gain.log10()).max(MINUS_INFINITY_DB)
    } else {
        MINUS_INFINITY_DB
    }
}

/// Block RMS with all channels pooled into a single sum of squares.
pub fn rms(channels: &[&[f32]]) -> f32 {
    let mut sum_squares = 0.0f64;
    let mut total_samples = 0usize;
    for channel in channels {
        for &s in *channel {
            sum_squares += (s as f64) * (s as f64);
            total_samples += 1;
        }
    }

    if total_samples > 0 {
        (sum_squares / total_samples as f64).sqrt() as f32
    } else {
        0.0
    }
}

/// Approximate loudness: pooled RMS expressed in dB.
///
/// This is deliberately not a gated, K-weighted LUFS measurement; it
/// mirrors the reference plugin's placeholder.
pub fn lufs_approx(channels: &[&[f32]]) -> f32 {
    gain_to_db(rms(channels))
}

/// Maximum absolute sample value across all channels.
pub fn peak_level(channels: &[&[f32]]) -> f32 {
    let mut peak = 0.0f32;
    for channel in channels {
        for &s in *channel {
            peak = peak.max(s.abs());
        }
    }
    peak
}

/// Crest factor: peak over RMS, 0 on silence.
pub fn crest_factor(channels: &[&[f32]]) -> f32 {
    let r = rms(channels);
    if r > 0.0 {
        peak_level(channels) / r
    } else {
        0.0
    }
}

/// Approximate transient sharpness: maximum sample-to-sample delta on
/// channel 0.
pub fn transient_sharpness(channels: &[&[f32]]) -> f32 {
    let Some(ch0) = channels.first() else {
        return 0.0;
    };

    let mut max_delta = 0.0f32;
    for pair in ch0.windows(2) {
        max_delta = max_delta.max((pair[1] - pair[0]).abs());
    }
    max_delta
}

/// Rough decay estimate: seconds until channel 0 drops 60 dB below the
/// block RMS, measured from the start of the block.
///
/// Returns the full block duration if the drop never happens and 0 if the
/// block is silent.
pub fn decay_time(channels: &[&[f32]], sample_rate: f64) -> f32 {
    let rms_start = rms(channels);
    if rms_start <= 0.0 {
        return 0.0;
    }
    let Some(ch0) = channels.first() else {
        return 0.0;
    };

    for (n, &s) in ch0.iter().enumerate() {
        if gain_to_db(s.abs() / rms_start) <= -60.0 {
            return n as f32 / sample_rate as f32;
        }
    }
    ch0.len() as f32 / sample_rate as f32
}

/// Normalized cross-correlation between channels 0 and 1.
///
/// +1 for identical channels, -1 for polarity-inverted ones. Returns 1.0
/// when fewer than two channels exist.
pub fn stereo_correlation(channels: &[&[f32]]) -> f32 {
    if channels.len() < 2 {
        return 1.0;
    }
    let left = channels[0];
    let right = channels[1];
    let n = left.len().min(right.len());

    let mut sum_lr = 0.0f64;
    let mut sum_l2 = 0.0f64;
    let mut sum_r2 = 0.0f64;
    for i in 0..n {
        let l = left[i] as f64;
        let r = right[i] as f64;
        sum_lr += l * r;
        sum_l2 += l * l;
        sum_r2 += r * r;
    }

    (sum_lr / (sum_l2.sqrt() * sum_r2.sqrt() + CORRELATION_EPSILON)) as f32
}

/// Coarse amplitude envelope of channel 0: RMS over 10 ms hops.
///
/// Allocates; intended for offline use. The real-time path uses
/// [`modulation_depth`], which walks the same hops without collecting them.
pub fn envelope(ch0: &[f32], sample_rate: f64) -> Vec<f32> {
    let hop = (sample_rate * ENVELOPE_HOP_SECONDS) as usize;
    if hop == 0 {
        return Vec::new();
    }

    ch0.chunks(hop)
        .map(|chunk| {
            let sum_sq: f32 = chunk.iter().map(|s| s * s).sum();
            (sum_sq / chunk.len() as f32).sqrt()
        })
        .collect()
}

/// Approximate modulation depth: max minus min of the coarse envelope.
///
/// Streaming counterpart of [`envelope`]; no allocation.
pub fn modulation_depth(channels: &[&[f32]], sample_rate: f64) -> f32 {
    let Some(ch0) = channels.first() else {
        return 0.0;
    };
    let hop = (sample_rate * ENVELOPE_HOP_SECONDS) as usize;
    if hop == 0 || ch0.is_empty() {
        return 0.0;
    }

    let mut max_env = f32::MIN;
    let mut min_env = f32::MAX;
    for chunk in ch0.chunks(hop) {
        let sum_sq: f32 = chunk.iter().map(|s| s * s).sum();
        let rms = (sum_sq / chunk.len() as f32).sqrt();
        max_env = max_env.max(rms);
        min_env = min_env.min(rms);
    }
    max_env - min_env
}
