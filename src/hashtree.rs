use crate::proof::Proof;

pub mod binary;

/// Core hash tree abstraction
pub trait HashTree {
  type Digest;
  type Error;

  /// Get the number of leaf nodes
  fn size(&self) -> usize;

  /// Get the number of layers above the leaf layer
  fn height(&self) -> u32;

  /// Retrieve a leaf value by index
  fn get(&self, index: usize) -> Option<&[u8]>;

  /// Get the root hash
  fn root_hash(&self) -> &Self::Digest;

  /// Generate the proof path for the given leaf value
  fn generate_proof(&self, value: &[u8]) -> Result<Proof<Self::Digest>, Self::Error>;

  /// Verify a path from the given leaf value to this tree's root
  fn verify_path(&self, value: &[u8], proof: &[Self::Digest]) -> Result<bool, Self::Error>;
}
