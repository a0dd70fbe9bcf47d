use thiserror::Error;

/// Precondition violations raised by the color math.
///
/// These are caller errors: the computation is deterministic, so retrying
/// with the same input fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("{what} {value} is out of bounds! Expected range: [{min}, {max}]")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("palette must contain at least {required} colors, got {actual}")]
    PaletteTooSmall { required: usize, actual: usize },

    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    #[error("luminance search increment must be in (0, 1], got {0}")]
    InvalidIncrement(f64),
}
