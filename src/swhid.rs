use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Serializer};
use crate::error::ConvertError;

/// Software Heritage object types (Core SWHID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Content,
    Directory,
    Revision,
    Release,
    Snapshot,
}

impl ObjectType {
    pub const ALL: [ObjectType; 5] = [
        ObjectType::Content,
        ObjectType::Directory,
        ObjectType::Revision,
        ObjectType::Release,
        ObjectType::Snapshot,
    ];

    /// Object types stored as plain git objects.
    pub const GIT: [ObjectType; 4] = [
        ObjectType::Content,
        ObjectType::Directory,
        ObjectType::Revision,
        ObjectType::Release,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Content => "cnt",
            ObjectType::Directory => "dir",
            ObjectType::Revision => "rev",
            ObjectType::Release => "rel",
            ObjectType::Snapshot => "snp",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "cnt" => Some(ObjectType::Content),
            "dir" => Some(ObjectType::Directory),
            "rev" => Some(ObjectType::Revision),
            "rel" => Some(ObjectType::Release),
            "snp" => Some(ObjectType::Snapshot),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ObjectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Core Software Heritage Identifier.
///
/// The object id is kept as raw bytes; its length is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Swhid {
    object_type: ObjectType,
    object_id: Vec<u8>,
}

impl Swhid {
    pub const NAMESPACE: &'static str = "swh";
    pub const SCHEME_VERSION: u32 = 1;
    pub const PREFIX: &'static str = "swh:";

    pub fn new(object_type: ObjectType, object_id: Vec<u8>) -> Self {
        Self { object_type, object_id }
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn object_id(&self) -> &[u8] {
        &self.object_id
    }
}

impl fmt::Display for Swhid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}",
            Self::NAMESPACE,
            Self::SCHEME_VERSION,
            self.object_type,
            hex::encode(&self.object_id)
        )
    }
}

/// A command-line token after normalization: either a SWHID or a bare hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputToken {
    object_type: Option<ObjectType>,
    hash_hex: String,
    qualifiers: Option<String>,
}

impl InputToken {
    /// Split a token into its object type (if it is a SWHID) and hash hex.
    ///
    /// Only the object type is validated; the namespace version and the
    /// qualifiers are carried through untouched.
    pub fn parse(token: &str) -> Result<Self, ConvertError> {
        if !token.starts_with(Swhid::PREFIX) {
            return Ok(Self {
                object_type: None,
                hash_hex: token.to_string(),
                qualifiers: None,
            });
        }

        let (core, qualifiers) = match token.split_once(';') {
            Some((core, rest)) => (core, Some(rest.to_string())),
            None => (token, None),
        };

        let parts: Vec<&str> = core.split(':').collect();
        let missing = |field: &str| {
            ConvertError::MalformedInput(format!("SWHID has no {} field: {}", field, token))
        };

        let code = parts.get(2).ok_or_else(|| missing("object type"))?;
        let object_type = ObjectType::from_code(code).ok_or_else(|| {
            ConvertError::UnrecognizedObjectType {
                token: token.to_string(),
                code: code.to_string(),
            }
        })?;
        let hash_hex = parts.get(3).ok_or_else(|| missing("hash"))?;

        Ok(Self {
            object_type: Some(object_type),
            hash_hex: hash_hex.to_string(),
            qualifiers,
        })
    }

    pub fn object_type(&self) -> Option<ObjectType> {
        self.object_type
    }

    pub fn hash_hex(&self) -> &str {
        &self.hash_hex
    }

    pub fn qualifiers(&self) -> Option<&str> {
        self.qualifiers.as_deref()
    }

    pub fn is_swhid(&self) -> bool {
        self.object_type.is_some()
    }
}

impl FromStr for InputToken {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
