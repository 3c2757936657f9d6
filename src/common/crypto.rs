use sha2::{Digest as ShaDigest, Sha512};

pub type Digest = [u8; 64];

pub trait Hashable {
    fn hash(&self) -> Digest;
}

/// SHA-512 over a sequence of byte chunks.
pub fn digest_of<'a>(chunks: impl IntoIterator<Item = &'a [u8]>) -> Digest {
    let mut hasher = Sha512::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    let result = hasher.finalize();
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&result[..]);
    digest
}

/// First four bytes as hex, enough to tell transactions apart in logs.
pub fn short_hex(digest: &Digest) -> String {
    digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let a = digest_of([b"hello".as_slice(), b"world".as_slice()]);
        let b = digest_of([b"hello".as_slice(), b"world".as_slice()]);
        let c = digest_of([b"hello".as_slice()]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_short_hex() {
        let mut digest: Digest = [0u8; 64];
        digest[0] = 0xab;
        digest[3] = 0x01;

        assert_eq!(short_hex(&digest), "ab000001");
    }
}
