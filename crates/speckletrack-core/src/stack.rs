use ndarray::Array2;

use crate::error::{Result, SpeckleError};

/// An ordered sequence of equal-shaped intensity images, one per exposure.
///
/// Two stacks enter a matching run: one recorded with the sample in the
/// beam, one without. Pixel values are f64; the stack is immutable once
/// constructed.
#[derive(Clone, Debug)]
pub struct ImageStack {
    frames: Vec<Array2<f64>>,
}

impl ImageStack {
    /// Build a stack, checking that it is nonempty and that every frame has
    /// the same shape.
    pub fn new(frames: Vec<Array2<f64>>) -> Result<Self> {
        let first = frames.first().ok_or(SpeckleError::EmptyStack)?;
        let (h, w) = first.dim();
        for (index, frame) in frames.iter().enumerate() {
            let (fh, fw) = frame.dim();
            if (fh, fw) != (h, w) {
                return Err(SpeckleError::FrameShapeMismatch {
                    index,
                    expected_h: h,
                    expected_w: w,
                    actual_h: fh,
                    actual_w: fw,
                });
            }
        }
        Ok(Self { frames })
    }

    /// Number of exposures.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// (height, width) shared by every frame.
    pub fn frame_shape(&self) -> (usize, usize) {
        self.frames[0].dim()
    }

    pub fn frames(&self) -> &[Array2<f64>] {
        &self.frames
    }
}

/// Check that two stacks agree in exposure count and pixel shape.
pub fn validate_pair(sample: &ImageStack, reference: &ImageStack) -> Result<()> {
    let (sh, sw) = sample.frame_shape();
    let (rh, rw) = reference.frame_shape();
    if sample.len() != reference.len() || (sh, sw) != (rh, rw) {
        return Err(SpeckleError::StackMismatch {
            sample_frames: sample.len(),
            sample_h: sh,
            sample_w: sw,
            reference_frames: reference.len(),
            reference_h: rh,
            reference_w: rw,
        });
    }
    Ok(())
}
