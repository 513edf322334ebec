use crate::error::ConvertError;

/// Multihash code for SHA-1.
pub const SHA1_CODE: u64 = 0x11;

/// Multihash with room for any digest up to 64 bytes.
pub type Multihash = cid::multihash::Multihash<64>;

/// Decode the hex form of a digest.
pub fn decode_hex(hash_hex: &str) -> Result<Vec<u8>, ConvertError> {
    hex::decode(hash_hex)
        .map_err(|err| ConvertError::MalformedHex(format!("{}: {}", hash_hex, err)))
}

/// Tag an existing SHA-1 digest as a multihash. The digest is not recomputed.
pub fn encode_sha1(digest: &[u8]) -> Result<Multihash, ConvertError> {
    Ok(Multihash::wrap(SHA1_CODE, digest)?)
}

/// Hash bytes with SHA-1, as git does for its objects.
pub fn sha1_digest(data: &[u8]) -> [u8; 20] {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sha1_prefixes_code_and_length() {
        let digest = hex::decode("deadbeefdeadbeefdeadbeefdeadbeefdeadbeef").unwrap();
        let mh = encode_sha1(&digest).unwrap();

        assert_eq!(mh.code(), SHA1_CODE);
        assert_eq!(mh.size(), 20);
        assert_eq!(mh.digest(), &digest[..]);
        assert_eq!(&mh.to_bytes()[..2], &[0x11, 0x14]);
    }

    #[test]
    fn test_length_is_not_validated() {
        let mh = encode_sha1(&[0xab; 4]).unwrap();
        assert_eq!(mh.size(), 4);
    }

    #[test]
    fn test_oversized_digest_is_rejected() {
        assert!(matches!(encode_sha1(&[0u8; 65]), Err(ConvertError::Multihash(_))));
    }

    #[test]
    fn test_decode_hex_errors() {
        assert!(matches!(decode_hex("xyz0"), Err(ConvertError::MalformedHex(_))));
        assert!(matches!(decode_hex("abc"), Err(ConvertError::MalformedHex(_))));
        assert_eq!(decode_hex("DEADbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_sha1_of_empty_blob() {
        // git hash-object of an empty file
        let digest = sha1_digest(b"blob 0\0");
        assert_eq!(hex::encode(digest), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");
    }
}
