//! End-to-end probe flow: noise chain, hosted processor, snapshot readers,
//! and the outbound payload.

use approx::assert_relative_eq;
use chainprobe::{ChainController, ChainProcessor, InputMode, ProbeConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const FRAME: usize = 4096;

/// Simple stateful processor: one-pole lowpass per channel.
struct Lowpass {
    coeff: f32,
    state: [f32; 2],
}

impl Lowpass {
    fn new(coeff: f32) -> Self {
        Self {
            coeff,
            state: [0.0; 2],
        }
    }
}

impl ChainProcessor for Lowpass {
    fn name(&self) -> &str {
        "one-pole lowpass"
    }

    fn process(&mut self, channels: &mut [&mut [f32]]) {
        for (ch, channel) in channels.iter_mut().enumerate().take(2) {
            let mut z = self.state[ch];
            for sample in channel.iter_mut() {
                z += self.coeff * (*sample - z);
                *sample = z;
            }
            self.state[ch] = z;
        }
    }

    fn reset(&mut self) {
        self.state = [0.0; 2];
    }
}

fn run_blocks(controller: &mut ChainController, block_len: usize, blocks: usize) {
    for _ in 0..blocks {
        let mut left = vec![0.0f32; block_len];
        let mut right = vec![0.0f32; block_len];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        controller.process_block(&mut channels);
    }
}

#[test]
fn test_noise_probe_publishes_plausible_metrics() {
    let (mut controller, handle) =
        ChainController::new(&ProbeConfig::default()).expect("default config is valid");

    // 8 callbacks of 512 samples complete exactly one 4096-sample frame.
    run_blocks(&mut controller, 512, 8);

    let snap = handle.snapshot();
    assert_eq!(snap.sequence, 1);

    let m = snap.metrics;
    assert!(m.rms > 0.1 && m.rms < 1.0);
    assert!(m.peak <= 1.0);
    assert!(m.crest_factor >= 1.0, "peak can never sit below RMS");
    assert!(m.spectral_centroid > 0.0);
    assert!(m.spectral_rolloff > m.spectral_centroid);
    assert!(m.spectral_flatness > 0.25, "white noise is broadband");
    assert!(m.stereo_correlation.abs() < 0.2);
    assert!(m.decay_time >= 0.0);
    for v in m.to_array() {
        assert!(v.is_finite());
    }
}

#[test]
fn test_lowpassed_noise_darkens_the_spectrum() {
    let config = ProbeConfig::default();

    let (mut open, open_handle) = ChainController::new(&config).unwrap();
    run_blocks(&mut open, FRAME, 4);

    let (mut dark, dark_handle) = ChainController::new(&config).unwrap();
    dark_handle
        .install_processor(Box::new(Lowpass::new(0.01)))
        .unwrap();
    run_blocks(&mut dark, FRAME, 4);

    let open_centroid = open_handle.snapshot().metrics.spectral_centroid;
    let dark_centroid = dark_handle.snapshot().metrics.spectral_centroid;

    assert!(
        dark_centroid < open_centroid * 0.7,
        "lowpass should pull the centroid down ({dark_centroid} vs {open_centroid})"
    );
}

#[test]
fn test_live_sine_analysis() {
    let config = ProbeConfig::default();
    let (mut controller, handle) = ChainController::new(&config).unwrap();
    handle.set_mode(InputMode::Live);

    let bin = 200usize;
    let freq = bin as f64 * config.sample_rate / FRAME as f64;

    let mut left: Vec<f32> = (0..FRAME)
        .map(|i| (2.0 * std::f32::consts::PI * bin as f32 * i as f32 / FRAME as f32).sin())
        .collect();
    let mut right = left.clone();
    let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
    controller.process_block(&mut channels);

    let m = handle.snapshot().metrics;
    let bin_width = config.sample_rate / FRAME as f64;

    assert!((m.spectral_centroid as f64 - freq).abs() < bin_width);
    assert_relative_eq!(m.rms, std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-3);
    assert_relative_eq!(m.stereo_correlation, 1.0, epsilon = 1e-6);
    assert!(m.resonance_score > 10.0);
}

#[test]
fn test_reader_thread_sees_monotonic_untorn_snapshots() {
    let (mut controller, handle) = ChainController::new(&ProbeConfig::default()).unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let reader = {
        let handle = handle.clone();
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            let mut last_seq = 0u64;
            while !stop.load(Ordering::Acquire) {
                let snap = handle.snapshot();
                assert!(snap.sequence >= last_seq, "sequence must be monotonic");
                last_seq = snap.sequence;
                for v in snap.metrics.to_array() {
                    assert!(v.is_finite());
                }
            }
            last_seq
        })
    };

    // 64 frames' worth of audio while the reader polls.
    run_blocks(&mut controller, FRAME, 64);

    stop.store(true, Ordering::Release);
    let last_seen = reader.join().unwrap();
    assert!(last_seen <= 64);
    assert_eq!(handle.snapshot().sequence, 64);
}

#[cfg(feature = "net")]
#[test]
fn test_snapshot_feeds_the_prompt_payload() {
    use chainprobe::ProbeRequest;

    let (mut controller, handle) = ChainController::new(&ProbeConfig::default()).unwrap();
    run_blocks(&mut controller, FRAME, 1);

    let snap = handle.snapshot();
    let request = ProbeRequest::new(
        "AI EQ",
        "Equalizer",
        "Low Gain, Mid Gain, High Gain",
        &snap.metrics,
        "brighten the top end",
    );
    let json = request.to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let rms: f32 = value["rms"].as_str().unwrap().parse().unwrap();
    assert_relative_eq!(rms, snap.metrics.rms, epsilon = 1e-5);
}
