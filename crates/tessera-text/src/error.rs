use std::path::PathBuf;

/// Errors that can occur while building or using bitmap fonts.
#[derive(Debug, Clone)]
pub enum TextError {
    /// The shared font library could not be initialized.
    LibraryInit(String),

    /// Font file not found.
    FontFileNotFound(PathBuf),

    /// No font in the library database matches the family name.
    FontFamilyNotFound(String),

    /// Font loading failed.
    FontLoad(String),

    /// Invalid font data.
    InvalidFontData(String),

    /// Pixel size must be finite and positive.
    InvalidPixelSize(f32),

    /// The packed atlas exceeds the device texture limit.
    AtlasTooLarge { width: u32, height: u32, max: u32 },

    /// Lock was poisoned (RwLock/Mutex).
    LockPoisoned(String),

    /// Generic IO error.
    Io(String),
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::LibraryInit(msg) => write!(f, "Failed to initialize font library: {}", msg),
            TextError::FontFileNotFound(path) => {
                write!(f, "Font file not found: {}", path.display())
            }
            TextError::FontFamilyNotFound(family) => {
                write!(f, "No font found for family: {}", family)
            }
            TextError::FontLoad(msg) => write!(f, "Failed to load font: {}", msg),
            TextError::InvalidFontData(msg) => write!(f, "Invalid font data: {}", msg),
            TextError::InvalidPixelSize(size) => write!(f, "Invalid pixel size: {}", size),
            TextError::AtlasTooLarge { width, height, max } => write!(
                f,
                "Font atlas of {}x{} exceeds the maximum texture dimension {}",
                width, height, max
            ),
            TextError::LockPoisoned(msg) => {
                write!(
                    f,
                    "Lock was poisoned (likely due to panic in another thread): {}",
                    msg
                )
            }
            TextError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for TextError {}

impl From<std::io::Error> for TextError {
    fn from(err: std::io::Error) -> Self {
        TextError::Io(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for TextError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        TextError::LockPoisoned(err.to_string())
    }
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
