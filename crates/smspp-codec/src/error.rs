//! Codec error types.

use smspp_model::ModelError;

/// Errors raised while encoding or decoding a container file.
#[derive(Debug)]
pub enum CodecError {
    /// Underlying I/O failure.
    Io(std::io::Error),
    /// The file does not start with the container magic.
    InvalidMagic { found: [u8; 4] },
    /// The container version is newer than this reader understands.
    UnsupportedVersion { found: u32 },
    /// Structurally invalid payload.
    InvalidData { reason: String },
    /// The decoded or to-be-encoded tree violates a model invariant.
    Model(ModelError),
}

impl CodecError {
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::Io(_) => "CODEC_IO",
            CodecError::InvalidMagic { .. } => "CODEC_BAD_MAGIC",
            CodecError::UnsupportedVersion { .. } => "CODEC_BAD_VERSION",
            CodecError::InvalidData { .. } => "CODEC_BAD_DATA",
            CodecError::Model(err) => err.code(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        CodecError::InvalidData {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Io(err) => write!(f, "[{}] I/O error: {}", self.code(), err),
            CodecError::InvalidMagic { found } => write!(
                f,
                "[{}] Not an SMS++ container file (magic {:02x?})",
                self.code(),
                found
            ),
            CodecError::UnsupportedVersion { found } => write!(
                f,
                "[{}] Unsupported container version {}",
                self.code(),
                found
            ),
            CodecError::InvalidData { reason } => {
                write!(f, "[{}] Invalid container data: {}", self.code(), reason)
            }
            CodecError::Model(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Io(err) => Some(err),
            CodecError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err)
    }
}

impl From<ModelError> for CodecError {
    fn from(err: ModelError) -> Self {
        CodecError::Model(err)
    }
}
