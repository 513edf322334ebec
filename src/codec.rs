//! Multicodec selection for SWHID object types.

use std::fmt;
use serde::{Serialize, Serializer};
use crate::swhid::ObjectType;

/// Multicodecs a SWHID-derived CID can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Plain bytes, used for hashes given without an object type.
    Raw,
    /// A raw git object: header plus body, hashed with SHA-1.
    GitRaw,
    /// Placeholder code reserved for Software Heritage snapshots.
    Swhid1Snp,
}

/// Codec used when a token carries no object type.
pub const DEFAULT_CODEC: Codec = Codec::Raw;

/// How well consumers of the CID understand its codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Support {
    Full,
    BestEffort,
}

impl Codec {
    pub fn code(&self) -> u64 {
        match self {
            Codec::Raw => 0x55,
            Codec::GitRaw => 0x78,
            Codec::Swhid1Snp => 0x01f0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Codec::Raw => "raw",
            Codec::GitRaw => "git-raw",
            Codec::Swhid1Snp => "swhid-1-snp",
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0x55 => Some(Codec::Raw),
            0x78 => Some(Codec::GitRaw),
            0x01f0 => Some(Codec::Swhid1Snp),
            _ => None,
        }
    }

    /// The codec for a SWHID object type, or `default` for bare hashes.
    pub fn select(object_type: Option<ObjectType>, default: Codec) -> (Codec, Support) {
        match object_type {
            Some(ObjectType::Content)
            | Some(ObjectType::Directory)
            | Some(ObjectType::Revision)
            | Some(ObjectType::Release) => (Codec::GitRaw, Support::Full),
            Some(ObjectType::Snapshot) => (Codec::Swhid1Snp, Support::BestEffort),
            None => (default, Support::Full),
        }
    }

    /// Object types a CID with this codec may name.
    pub fn object_types(&self) -> &'static [ObjectType] {
        match self {
            Codec::GitRaw => &ObjectType::GIT,
            Codec::Swhid1Snp => &[ObjectType::Snapshot],
            Codec::Raw => &[],
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Codec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
