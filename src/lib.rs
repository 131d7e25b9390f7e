//! Binary hash (Merkle) tree over a power-of-two list of transactions, with inclusion proofs.
//!
//! ```
//! use merkle_tree::{BinaryHashTree, ConcatHasher, HashTree};
//!
//! let tree = BinaryHashTree::new(ConcatHasher, ["p1", "p2", "p3", "p4"]).unwrap();
//! assert_eq!("p1-p2-p3-p4", tree.root_hash());
//!
//! let proof = tree.generate_proof(b"p3").unwrap();
//! assert_eq!(vec!["p4", "p1-p2"], proof);
//! assert!(tree.verify_proof(b"p3", &proof).unwrap());
//! ```

pub mod error;
pub mod formula;
pub mod hasher;
pub mod hashtree;
pub mod proof;

pub use error::{Error, Result};
pub use hasher::{Blake3Hasher, ConcatHasher, Hasher, Sha256Digest, Sha256Hasher};
pub use hashtree::HashTree;
pub use hashtree::binary::{BinaryHashTree, Node, NodeKind};
pub use proof::{Proof, ProofStep, Side, TaggedProof, compute_root, verify_path};

#[inline]
pub fn splitmix64(x: u64) -> u64 {
  let mut z = x.wrapping_add(0x9e3779b97f4a7c15);
  z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
  z ^ (z >> 31)
}

/// `n` distinct pseudo-random 8-byte transactions.
pub fn random_transactions(n: usize) -> Vec<Vec<u8>> {
  (0..n as u64).map(|i| splitmix64(i).to_le_bytes().to_vec()).collect()
}
