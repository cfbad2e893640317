//! Output dimensions for a batch.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rejected size input. Raised before any file is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeError {
    /// Custom width/height text was not a positive integer.
    #[error("Invalid size input: {0}")]
    InvalidSizeInput(String),
}

/// Exact pixel size every output image of a batch will have.
///
/// Both dimensions are non-zero; the only ways to build one are the checked
/// constructors and the presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSize {
    width: u32,
    height: u32,
}

impl TargetSize {
    /// Create a target size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, SizeError> {
        if width == 0 || height == 0 {
            return Err(SizeError::InvalidSizeInput(format!(
                "{width}x{height}: width and height must be positive"
            )));
        }
        Ok(Self { width, height })
    }

    /// Parse separate width and height fields as typed by a user.
    ///
    /// Surrounding whitespace and a leading `+` are accepted; anything that is
    /// not a positive integer is `InvalidSizeInput`.
    pub fn parse(width: &str, height: &str) -> Result<Self, SizeError> {
        Self::new(parse_dimension(width)?, parse_dimension(height)?)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width divided by height.
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Preset::LinkPreview.size()
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WxH` (an `X` or `×` separator is accepted too).
impl FromStr for TargetSize {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X', '×'])
            .ok_or_else(|| SizeError::InvalidSizeInput(format!("{s:?}: expected WIDTHxHEIGHT")))?;
        Self::parse(width, height)
    }
}

fn parse_dimension(text: &str) -> Result<u32, SizeError> {
    let trimmed = text.trim();
    match trimmed.parse::<u32>() {
        Ok(0) => Err(SizeError::InvalidSizeInput(format!(
            "{trimmed:?}: must be greater than zero"
        ))),
        Ok(value) => Ok(value),
        Err(_) => Err(SizeError::InvalidSizeInput(format!(
            "{trimmed:?}: not a whole number"
        ))),
    }
}

/// Built-in target sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 1200 x 628, the usual link-preview card.
    LinkPreview,
    /// 640 x 420.
    Small,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::LinkPreview, Preset::Small];

    pub fn size(self) -> TargetSize {
        match self {
            Preset::LinkPreview => TargetSize {
                width: 1200,
                height: 628,
            },
            Preset::Small => TargetSize {
                width: 640,
                height: 420,
            },
        }
    }

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::LinkPreview => "link-preview",
            Preset::Small => "small",
        }
    }
}

impl FromStr for Preset {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SizeError::InvalidSizeInput(format!("unknown preset {s:?}")))
    }
}
