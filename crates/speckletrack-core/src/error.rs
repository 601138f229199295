use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeckleError {
    #[error("Empty image stack")]
    EmptyStack,

    #[error("Frame {index} has shape {actual_h}x{actual_w}, expected {expected_h}x{expected_w}")]
    FrameShapeMismatch {
        index: usize,
        expected_h: usize,
        expected_w: usize,
        actual_h: usize,
        actual_w: usize,
    },

    #[error(
        "Sample/reference mismatch: {sample_frames} frames of {sample_h}x{sample_w} vs \
         {reference_frames} frames of {reference_h}x{reference_w}"
    )]
    StackMismatch {
        sample_frames: usize,
        sample_h: usize,
        sample_w: usize,
        reference_frames: usize,
        reference_h: usize,
        reference_w: usize,
    },

    #[error("Search margins leave no output grid: image {height}x{width}, margin {margin} pixels per side")]
    DegenerateGrid {
        height: usize,
        width: usize,
        margin: usize,
    },
}

pub type Result<T> = std::result::Result<T, SpeckleError>;
