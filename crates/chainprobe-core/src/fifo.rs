//! Sample FIFO that turns variable-size callback blocks into fixed frames.

/// Accumulates single-channel samples into fixed-size analysis frames.
///
/// Pushed samples land at the current write index; when the index reaches
/// the frame size, the full window is copied into a pre-allocated working
/// buffer, the index resets to zero, and the completed frame is handed
/// back so the caller can run the analysis pass in-line before the next
/// push. No allocation after construction, no sample loss, no reordering.
pub struct FrameAccumulator {
    buffer: Vec<f32>,
    working: Vec<f32>,
    index: usize,
}

impl FrameAccumulator {
    /// Create an accumulator producing `frame_size`-sample frames.
    pub fn new(frame_size: usize) -> Self {
        Self {
            buffer: vec![0.0; frame_size],
            working: vec![0.0; frame_size],
            index: 0,
        }
    }

    /// Frame size in samples.
    pub fn frame_size(&self) -> usize {
        self.buffer.len()
    }

    /// Number of samples buffered toward the next frame.
    pub fn buffered(&self) -> usize {
        self.index
    }

    /// Append one sample, returning the completed frame when it fills.
    ///
    /// Must be called exactly once per input sample, in arrival order.
    /// The returned slice is valid until the next push.
    #[inline]
    pub fn push(&mut self, sample: f32) -> Option<&[f32]> {
        debug_assert!(
            self.index < self.buffer.len(),
            "frame write index out of bounds"
        );

        self.buffer[self.index] = sample;
        self.index += 1;

        if self.index == self.buffer.len() {
            self.working.copy_from_slice(&self.buffer);
            self.index = 0;
            Some(&self.working)
        } else {
            None
        }
    }

    /// Discard any partially accumulated frame.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
