//! Version-1 CID construction and text rendering.

use cid::multibase::Base;
use cid::{Cid, Version};
use crate::codec::Codec;
use crate::error::ConvertError;
use crate::hash::Multihash;

pub const OUTPUT_BASE: Base = Base::Base16Lower;

pub fn build(codec: Codec, multihash: Multihash) -> Cid {
    Cid::new_v1(codec.code(), multihash)
}

/// Render a CID as base16 text: the `f` multibase prefix followed by lowercase hex.
pub fn to_base16(cid: &Cid) -> Result<String, ConvertError> {
    Ok(cid.to_string_of_base(OUTPUT_BASE)?)
}

/// Parse a CID from any multibase text form.
pub fn parse(text: &str) -> Result<Cid, ConvertError> {
    let cid = Cid::try_from(text)?;
    if cid.version() != Version::V1 {
        return Err(ConvertError::InvalidCid(format!("{}: not a version 1 CID", text)));
    }
    Ok(cid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::encode_sha1;

    const HASH: &str = "94a9ed024d3859793618152ea559a168bbcbb5e2";

    fn digest() -> Vec<u8> {
        hex::decode(HASH).unwrap()
    }

    #[test]
    fn test_git_raw_prefix() {
        let cid = build(Codec::GitRaw, encode_sha1(&digest()).unwrap());
        assert_eq!(to_base16(&cid).unwrap(), format!("f01781114{}", HASH));
    }

    #[test]
    fn test_snapshot_codec_is_two_byte_varint() {
        let cid = build(Codec::Swhid1Snp, encode_sha1(&digest()).unwrap());
        assert_eq!(to_base16(&cid).unwrap(), format!("f01f0031114{}", HASH));
    }

    #[test]
    fn test_parse_round_trip() {
        let text = format!("f01551114{}", HASH);
        let cid = parse(&text).unwrap();

        assert_eq!(cid.codec(), Codec::Raw.code());
        assert_eq!(cid.hash().digest(), &digest()[..]);
        assert_eq!(to_base16(&cid).unwrap(), text);
    }

    #[test]
    fn test_parse_other_bases() {
        let cid = build(Codec::GitRaw, encode_sha1(&digest()).unwrap());
        let base32 = cid.to_string();
        assert_eq!(parse(&base32).unwrap(), cid);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse("not a cid"), Err(ConvertError::InvalidCid(_))));
    }
}
