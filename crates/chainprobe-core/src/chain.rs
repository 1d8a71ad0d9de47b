//! Per-callback chain orchestration.
//!
//! Selects the probe input (test noise or live audio), routes it through
//! the hosted processor, and feeds the reference channel into the frame
//! accumulator. Completed frames run the analysis pass and publish a
//! snapshot, all in-line on the audio thread.

use crate::config::ProbeConfig;
use crate::fifo::FrameAccumulator;
use crate::handle::ProbeHandle;
use crate::host::ProcessorSlot;
use crate::lockfree::AtomicFlag;
use crate::snapshot::MetricsPublisher;
use crate::Result;
use chainprobe_analysis::FrameAnalyzer;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use smallvec::SmallVec;
use std::sync::Arc;

/// Channel layouts up to this width analyze without heap allocation.
const INLINE_CHANNELS: usize = 8;

/// What the probe analyzes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Generate white noise over the input and route it through the hosted
    /// processor before analysis.
    #[default]
    TestSignal,
    /// Analyze the live input as-is; the hosted processor is bypassed.
    Live,
}

/// Audio-thread owner of the probe pipeline.
///
/// Created together with a [`ProbeHandle`]; the controller moves to the
/// audio callback, the handle stays with the control/UI side.
pub struct ChainController {
    test_signal: Arc<AtomicFlag>,
    slot: ProcessorSlot,
    noise: SmallRng,
    fifo: FrameAccumulator,
    analyzer: FrameAnalyzer,
    publisher: Arc<MetricsPublisher>,
}

impl ChainController {
    /// Build a controller/handle pair from a validated configuration.
    pub fn new(config: &ProbeConfig) -> Result<(Self, ProbeHandle)> {
        config.validate()?;

        let test_signal = Arc::new(AtomicFlag::new(true));
        let publisher = Arc::new(MetricsPublisher::new());
        let (slot, slot_handle) = ProcessorSlot::new();

        let controller = Self {
            test_signal: Arc::clone(&test_signal),
            slot,
            noise: SmallRng::from_entropy(),
            fifo: FrameAccumulator::new(config.frame_size),
            analyzer: FrameAnalyzer::new(
                config.sample_rate,
                config.frame_size,
                config.rolloff_percent,
            ),
            publisher: Arc::clone(&publisher),
        };
        let handle = ProbeHandle::new(test_signal, slot_handle, publisher, config.sample_rate);
        Ok((controller, handle))
    }

    /// Process one callback block of planar channel data.
    ///
    /// Real-time safe for layouts up to [`INLINE_CHANNELS`] channels: no
    /// locks, no heap allocation, bounded work. The hosted-processor
    /// reference and input mode are fixed for the whole call.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]]) {
        // Swap commands drain every callback so an install completes even
        // while the probe idles in live mode.
        self.slot.apply_pending();

        if channels.is_empty() || channels[0].is_empty() {
            return;
        }

        if self.test_signal.get() {
            for channel in channels.iter_mut() {
                for sample in channel.iter_mut() {
                    *sample = self.noise.gen::<f32>() * 2.0 - 1.0;
                }
            }
            if let Some(processor) = self.slot.active_mut() {
                processor.process(channels);
            }
        }

        let views: SmallVec<[&[f32]; INLINE_CHANNELS]> =
            channels.iter().map(|channel| &**channel).collect();
        let block_len = views[0].len();

        let Self {
            fifo,
            analyzer,
            publisher,
            ..
        } = self;

        // Channel 0 is the reference channel for spectral analysis; the
        // time-domain metrics see the full block when a frame completes.
        for i in 0..block_len {
            if let Some(frame) = fifo.push(views[0][i]) {
                let metrics = analyzer.analyze(frame, &views);
                publisher.publish(&metrics);
            }
        }
    }

    /// Samples buffered toward the next analysis frame.
    pub fn buffered(&self) -> usize {
        self.fifo.buffered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ChainProcessor;
    use approx::assert_relative_eq;

    const FRAME: usize = 4096;

    struct Gain(f32);

    impl ChainProcessor for Gain {
        fn name(&self) -> &str {
            "gain"
        }

        fn process(&mut self, channels: &mut [&mut [f32]]) {
            for channel in channels.iter_mut() {
                for sample in channel.iter_mut() {
                    *sample *= self.0;
                }
            }
        }
    }

    fn controller() -> (ChainController, ProbeHandle) {
        ChainController::new(&ProbeConfig::default()).unwrap()
    }

    fn process_stereo(controller: &mut ChainController, len: usize) -> (Vec<f32>, Vec<f32>) {
        let mut left = vec![0.0f32; len];
        let mut right = vec![0.0f32; len];
        {
            let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
            controller.process_block(&mut channels);
        }
        (left, right)
    }

    #[test]
    fn test_one_frame_publishes_one_snapshot() {
        let (mut controller, handle) = controller();
        process_stereo(&mut controller, FRAME);

        let snap = handle.snapshot();
        assert_eq!(snap.sequence, 1);
        assert!(snap.metrics.rms > 0.1, "noise block should carry energy");
        assert!(snap.metrics.peak <= 1.0);
        assert!(snap.metrics.spectral_flatness > 0.25, "noise is broadband");
        assert!(
            snap.metrics.stereo_correlation.abs() < 0.2,
            "independent noise channels decorrelate"
        );
    }

    #[test]
    fn test_partial_blocks_accumulate_across_callbacks() {
        let (mut controller, handle) = controller();

        // 3 + 4091 samples: no frame yet.
        process_stereo(&mut controller, 3);
        process_stereo(&mut controller, 4091);
        assert_eq!(handle.snapshot().sequence, 0);
        assert_eq!(controller.buffered(), 4094);

        // 10 more crosses the boundary once, 8 left over.
        process_stereo(&mut controller, 10);
        assert_eq!(handle.snapshot().sequence, 1);
        assert_eq!(controller.buffered(), 8);
    }

    #[test]
    fn test_hosted_processor_shapes_the_test_signal() {
        let (mut controller, handle) = controller();
        handle.install_processor(Box::new(Gain(0.25))).unwrap();

        let (left, _) = process_stereo(&mut controller, FRAME);
        assert!(left.iter().all(|&s| s.abs() <= 0.25));

        let snap = handle.snapshot();
        assert!(snap.metrics.peak <= 0.25 + 1e-6);
        assert!(snap.metrics.rms < 0.25);
    }

    #[test]
    fn test_live_mode_leaves_input_untouched_and_bypasses_processor() {
        let (mut controller, handle) = controller();
        handle.set_mode(InputMode::Live);
        handle.install_processor(Box::new(Gain(0.0))).unwrap();

        let mut left: Vec<f32> = (0..FRAME)
            .map(|i| (2.0 * std::f32::consts::PI * 64.0 * i as f32 / FRAME as f32).sin())
            .collect();
        let original = left.clone();
        let mut right = left.clone();
        {
            let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
            controller.process_block(&mut channels);
        }

        assert_eq!(left, original, "live input must pass through unchanged");

        let snap = handle.snapshot();
        assert_eq!(snap.sequence, 1);
        assert_relative_eq!(
            snap.metrics.rms,
            std::f32::consts::FRAC_1_SQRT_2,
            epsilon = 1e-3
        );
        assert_relative_eq!(snap.metrics.stereo_correlation, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_hot_swap_retires_previous_instance() {
        let (mut controller, handle) = controller();

        handle.install_processor(Box::new(Gain(0.5))).unwrap();
        process_stereo(&mut controller, 64);

        handle.install_processor(Box::new(Gain(0.1))).unwrap();
        process_stereo(&mut controller, 64);

        assert_eq!(handle.drain_retired(), 1);
    }

    #[test]
    fn test_empty_block_is_a_no_op() {
        let (mut controller, handle) = controller();
        let mut channels: [&mut [f32]; 0] = [];
        controller.process_block(&mut channels);
        assert_eq!(handle.snapshot().sequence, 0);
        assert_eq!(controller.buffered(), 0);
    }

    #[test]
    fn test_mono_block_reports_unity_correlation() {
        let (mut controller, handle) = controller();
        let mut mono = vec![0.0f32; FRAME];
        {
            let mut channels: [&mut [f32]; 1] = [&mut mono];
            controller.process_block(&mut channels);
        }
        assert_eq!(handle.snapshot().metrics.stereo_correlation, 1.0);
    }
}
