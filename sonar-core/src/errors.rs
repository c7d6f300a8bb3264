//! Error types shared by the sonar reader, writer and conversion crates.
use std::array::TryFromSliceError;

/// Basic error types for reading, writing and converting sonar logs.
#[derive(Debug)]
pub enum SonarError {
    /// IoError from the std library.
    StdIoError(std::io::Error),
    /// TryFromSliceError from the std library.
    TryFromSlice(TryFromSliceError),
    /// A read would have gone past the end of the mapped file or buffer.
    UnexpectedEnd { wanted: usize, have: usize },
    /// The magic number at the expected offset did not match.
    BadMagic { offset: usize, found: u32 },
    /// A tag byte was encountered that is not present in the schema registry.
    UnknownTag { offset: usize, tag: u8 },
    /// A frame declared a sample or field count that ran past the end of the file.
    TruncatedFrame { offset: usize },
    /// No candidate Vendor-H frame header length could be validated for a beam.
    HeaderNotDetermined,
    /// The file belongs to a recognised-but-unsupported vendor variant.
    UnsupportedVariant { msg: String },
    /// The given path does not exist or cannot be opened as an input file.
    MissingInput { msg: String },
    /// An error constructing or validating a [`crate::settings::ConversionSettings`].
    SettingsError { msg: String },
    /// Error writing CSV rows.
    Csv(String),
}

impl From<TryFromSliceError> for SonarError {
    fn from(e: TryFromSliceError) -> Self {
        Self::TryFromSlice(e)
    }
}

impl From<std::io::Error> for SonarError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError(e)
    }
}

impl std::fmt::Display for SonarError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use self::SonarError::*;
        match self {
            StdIoError(x) => write!(fmt, "{}", x),
            TryFromSlice(x) => write!(fmt, "{}", x),
            UnexpectedEnd { wanted, have } => write!(
                fmt,
                "Tried to read {} bytes but only {} remained",
                wanted, have
            ),
            BadMagic { offset, found } => write!(
                fmt,
                "Bad magic number at offset {}: found 0x{:X}",
                offset, found
            ),
            UnknownTag { offset, tag } => write!(
                fmt,
                "Unknown tag byte 0x{:02X} at offset {}",
                tag, offset
            ),
            TruncatedFrame { offset } => {
                write!(fmt, "Frame starting at offset {} is truncated", offset)
            }
            HeaderNotDetermined => write!(
                fmt,
                "No candidate frame header length could be validated for this beam"
            ),
            UnsupportedVariant { msg } => write!(fmt, "Unsupported vendor variant: {}", msg),
            MissingInput { msg } => write!(fmt, "Missing or unreadable input: {}", msg),
            SettingsError { msg } => write!(fmt, "Error in conversion settings: {}", msg),
            Csv(msg) => write!(fmt, "CSV error: {}", msg),
        }
    }
}

impl From<SonarError> for String {
    fn from(e: SonarError) -> String {
        e.to_string()
    }
}

impl std::error::Error for SonarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use self::SonarError::*;
        match self {
            StdIoError(x) => x.source(),
            TryFromSlice(x) => x.source(),
            _ => None,
        }
    }
}
