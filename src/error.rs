use std::io;
use hex::FromHexError;

#[derive(Debug)]
pub enum ConvertError {
    Io(io::Error),
    MalformedInput(String),
    UnrecognizedObjectType { token: String, code: String },
    MalformedHex(String),
    Multihash(String),
    InvalidCid(String),
    UnsupportedCodec(u64),
    UnsupportedHash(u64),
    HashMismatch { expected: String, actual: String },
}

impl ConvertError {
    /// Whether the error means "not something a SWHID can name" rather than a broken input.
    pub fn is_foreign(&self) -> bool {
        matches!(self, ConvertError::UnsupportedCodec(_) | ConvertError::UnsupportedHash(_))
    }
}

impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        ConvertError::Io(err)
    }
}

impl From<FromHexError> for ConvertError {
    fn from(err: FromHexError) -> Self {
        ConvertError::MalformedHex(err.to_string())
    }
}

impl From<cid::Error> for ConvertError {
    fn from(err: cid::Error) -> Self {
        ConvertError::InvalidCid(err.to_string())
    }
}

impl From<cid::multihash::Error> for ConvertError {
    fn from(err: cid::multihash::Error) -> Self {
        ConvertError::Multihash(err.to_string())
    }
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::Io(err) => write!(f, "I/O error: {}", err),
            ConvertError::MalformedInput(input) => write!(f, "Malformed input: {}", input),
            ConvertError::UnrecognizedObjectType { token, code } => {
                write!(f, "Unknown SWHID object type: {} (in {})", code, token)
            }
            ConvertError::MalformedHex(msg) => write!(f, "Malformed hex: {}", msg),
            ConvertError::Multihash(msg) => write!(f, "Multihash error: {}", msg),
            ConvertError::InvalidCid(msg) => write!(f, "Invalid CID: {}", msg),
            ConvertError::UnsupportedCodec(code) => write!(
                f,
                "CID has codec {:#x}, but expected {:#x} (git-raw) or {:#x} (swhid-1-snp)",
                code,
                crate::codec::Codec::GitRaw.code(),
                crate::codec::Codec::Swhid1Snp.code()
            ),
            ConvertError::UnsupportedHash(code) => write!(
                f,
                "CID multihash is encoded with {:#x}, but expected {:#x} (SHA1)",
                code,
                crate::hash::SHA1_CODE
            ),
            ConvertError::HashMismatch { expected, actual } => {
                write!(f, "Block hash mismatch: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for ConvertError {}
