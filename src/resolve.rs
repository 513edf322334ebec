//! Going back from a CID to the git hash and the SWHIDs it may denote.

use std::fs;
use std::path::Path;
use cid::Cid;
use crate::codec::Codec;
use crate::error::ConvertError;
use crate::hash::{sha1_digest, SHA1_CODE};
use crate::swhid::{ObjectType, Swhid};

/// The git object a SWHID-flavoured CID points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitTarget {
    cid: Cid,
    codec: Codec,
    hash_hex: String,
    digest: Vec<u8>,
}

impl GitTarget {
    /// Accepts only `git-raw` and `swhid-1-snp` CIDs carrying a SHA-1 multihash.
    pub fn from_cid(cid: &Cid) -> Result<Self, ConvertError> {
        let codec = match Codec::from_code(cid.codec()) {
            Some(codec @ (Codec::GitRaw | Codec::Swhid1Snp)) => codec,
            _ => return Err(ConvertError::UnsupportedCodec(cid.codec())),
        };

        let multihash = cid.hash();
        if multihash.code() != SHA1_CODE {
            return Err(ConvertError::UnsupportedHash(multihash.code()));
        }

        let digest = multihash.digest().to_vec();
        Ok(Self {
            cid: *cid,
            codec,
            hash_hex: hex::encode(&digest),
            digest,
        })
    }

    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn hash_hex(&self) -> &str {
        &self.hash_hex
    }

    pub fn object_types(&self) -> &'static [ObjectType] {
        self.codec.object_types()
    }

    /// Every SWHID that could name this object, in cnt, dir, rev, rel, snp order.
    pub fn candidates(&self) -> Vec<Swhid> {
        self.object_types()
            .iter()
            .map(|ty| Swhid::new(*ty, self.digest.clone()))
            .collect()
    }
}

/// Check that `data` is the block `cid` names, by rehashing it.
pub fn verify_block(cid: &Cid, data: &[u8]) -> Result<(), ConvertError> {
    let target = GitTarget::from_cid(cid)?;
    let actual = sha1_digest(data);
    if actual[..] != target.digest[..] {
        return Err(ConvertError::HashMismatch {
            expected: target.hash_hex,
            actual: hex::encode(actual),
        });
    }
    Ok(())
}

pub fn verify_block_file<P: AsRef<Path>>(cid: &Cid, path: P) -> Result<(), ConvertError> {
    let data = fs::read(path)?;
    verify_block(cid, &data)
}
