//! Inclusion proofs and tree-independent verification.
//!
//! A [`Proof`] is the bare sibling path, leaf layer first. It only makes sense together with the leaf's position in
//! the tree, which is what [`verify_path`] takes. A [`TaggedProof`] records on which side each sibling sits, so it
//! can be checked against a published root with nothing but the leaf value.

use log::debug;

use crate::hasher::Hasher;

/// Sibling digests from the leaf layer up to (not including) the root.
pub type Proof<D> = Vec<D>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
  Left,
  Right,
}

impl Side {
  /// Side of the sibling of the node at `index` within its layer.
  pub fn of_sibling(index: usize) -> Side {
    if index % 2 == 0 { Side::Right } else { Side::Left }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep<D> {
  pub digest: D,
  pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedProof<D> {
  steps: Vec<ProofStep<D>>,
}

impl<D> TaggedProof<D> {
  /// Attach sides to a positional proof for the leaf at `index`.
  pub fn from_path(index: usize, path: Proof<D>) -> Self {
    let mut index = index;
    let steps = path
      .into_iter()
      .map(|digest| {
        let side = Side::of_sibling(index);
        index /= 2;
        ProofStep { digest, side }
      })
      .collect();
    TaggedProof { steps }
  }

  pub fn steps(&self) -> &[ProofStep<D>] {
    &self.steps
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Leaf index encoded by the sides, least significant bit at the leaf layer.
  pub fn index(&self) -> usize {
    self.steps.iter().enumerate().filter(|(_, s)| s.side == Side::Left).fold(0, |acc, (i, _)| acc | (1 << i))
  }

  /// Drop the sides, keeping the bare sibling path.
  pub fn into_path(self) -> Proof<D> {
    self.steps.into_iter().map(|s| s.digest).collect()
  }
}

impl<D: Clone + Eq> TaggedProof<D> {
  /// Root obtained by folding `value` through the steps.
  pub fn compute_root<H: Hasher<Digest = D>>(&self, hasher: &H, value: &[u8]) -> D {
    self.steps.iter().fold(hasher.leaf_hash(value), |hash, step| match step.side {
      Side::Right => hasher.combine(&hash, &step.digest),
      Side::Left => hasher.combine(&step.digest, &hash),
    })
  }

  /// `true` iff `value` with this proof reproduces `root`.
  pub fn verify<H: Hasher<Digest = D>>(&self, hasher: &H, value: &[u8], root: &D) -> bool {
    self.compute_root(hasher, value) == *root
  }
}

/// Recompute the root from the leaf `value` at `index` and its sibling path.
///
/// An even index means the running hash is a left child and the sibling goes on the right, an odd one the reverse.
/// The index is halved at every layer.
pub fn compute_root<H: Hasher>(hasher: &H, index: usize, value: &[u8], proof: &[H::Digest]) -> H::Digest {
  let mut index = index;
  let mut hash = hasher.leaf_hash(value);
  for sibling in proof {
    hash = if index % 2 == 0 { hasher.combine(&hash, sibling) } else { hasher.combine(sibling, &hash) };
    index /= 2;
  }
  hash
}

/// `true` iff the path proves `value` sits at `index` below `root`.
pub fn verify_path<H: Hasher>(hasher: &H, index: usize, value: &[u8], proof: &[H::Digest], root: &H::Digest) -> bool {
  let computed = compute_root(hasher, index, value, proof);
  if computed != *root {
    debug!("proof rejected: computed root {computed} != {root}");
    return false;
  }
  true
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hasher::ConcatHasher;

  fn path(digests: &[&str]) -> Proof<String> {
    digests.iter().map(|d| d.to_string()).collect()
  }

  #[test]
  fn sides_follow_index_bits() {
    let tagged = TaggedProof::from_path(5, path(&["a", "b", "c"]));
    let sides = tagged.steps().iter().map(|s| s.side).collect::<Vec<_>>();
    assert_eq!(vec![Side::Left, Side::Right, Side::Left], sides);
    assert_eq!(5, tagged.index());
    assert_eq!(path(&["a", "b", "c"]), tagged.into_path());
  }

  #[test]
  fn compute_root_by_index() {
    let h = ConcatHasher;
    assert_eq!("p1-p2-p3-p4", compute_root(&h, 2, b"p3", &path(&["p4", "p1-p2"])));
    assert_eq!("p1-p2-p3-p4", compute_root(&h, 1, b"p2", &path(&["p1", "p3-p4"])));
    assert!(verify_path(&h, 2, b"p3", &path(&["p4", "p1-p2"]), &"p1-p2-p3-p4".to_string()));
    assert!(!verify_path(&h, 3, b"p3", &path(&["p4", "p1-p2"]), &"p1-p2-p3-p4".to_string()));
  }

  #[test]
  fn tagged_proof_verifies_without_index() {
    let h = ConcatHasher;
    let root = "p1-p2-p3-p4".to_string();
    let tagged = TaggedProof::from_path(2, path(&["p4", "p1-p2"]));
    assert!(tagged.verify(&h, b"p3", &root));
    assert!(!tagged.verify(&h, b"p4", &root));
    assert!(TaggedProof::<String>::from_path(0, vec![]).verify(&h, b"only", &"only".to_string()));
  }
}
