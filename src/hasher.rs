use std::fmt::{self, Debug, Display};

use sha2::Digest as _;
use sha2::Sha256;

/// Hash primitive the tree is built with.
///
/// Both operations must be pure and deterministic. `combine` is generally not commutative: the tree and every
/// verifier pass the left child first.
pub trait Hasher {
  type Digest: Clone + Eq + Debug + Display;

  /// Digest of a raw leaf value.
  fn leaf_hash(&self, value: &[u8]) -> Self::Digest;

  /// Digest of an interior node from its children's digests.
  fn combine(&self, left: &Self::Digest, right: &Self::Digest) -> Self::Digest;
}

/// Human-readable stand-in: a leaf hashes to its own text and `combine(a, b)` is `"a-b"`.
///
/// Leaf bytes outside printable ASCII are written as `\xNN` escapes (and `\` as `\\`), so distinct leaves never
/// share a digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConcatHasher;

impl Hasher for ConcatHasher {
  type Digest = String;

  fn leaf_hash(&self, value: &[u8]) -> String {
    value.escape_ascii().to_string()
  }

  fn combine(&self, left: &String, right: &String) -> String {
    let mut s = String::with_capacity(left.len() + 1 + right.len());
    s.push_str(left);
    s.push('-');
    s.push_str(right);
    s
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Hasher;

impl Hasher for Blake3Hasher {
  type Digest = blake3::Hash;

  fn leaf_hash(&self, value: &[u8]) -> blake3::Hash {
    blake3::hash(value)
  }

  fn combine(&self, left: &blake3::Hash, right: &blake3::Hash) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    hasher.finalize()
  }
}

pub const SHA256_LEN: usize = 32;

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

/// SHA-256 with certificate-transparency style domain separation, so a leaf value can never collide with the
/// encoding of an interior node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
  type Digest = Sha256Digest;

  fn leaf_hash(&self, value: &[u8]) -> Sha256Digest {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(value);
    Sha256Digest::from_slice(&hasher.finalize())
  }

  fn combine(&self, left: &Sha256Digest, right: &Sha256Digest) -> Sha256Digest {
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left.0);
    hasher.update(right.0);
    Sha256Digest::from_slice(&hasher.finalize())
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest(pub [u8; SHA256_LEN]);

impl Sha256Digest {
  fn from_slice(bytes: &[u8]) -> Self {
    let mut value = [0u8; SHA256_LEN];
    value.copy_from_slice(bytes);
    Sha256Digest(value)
  }

  pub fn as_bytes(&self) -> &[u8; SHA256_LEN] {
    &self.0
  }
}

impl AsRef<[u8]> for Sha256Digest {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Display for Sha256Digest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&hex::encode(self.0))
  }
}

impl Debug for Sha256Digest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Sha256Digest({self})")
  }
}
