use std::fmt::{self, Display};

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::formula::{is_power_of_two, log2, pow2e};
use crate::hasher::Hasher;
use crate::hashtree::HashTree;
use crate::proof::{self, Proof, TaggedProof};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind<D> {
  Leaf,
  Branch { left: Box<Node<D>>, right: Box<Node<D>> },
}

/// Node representation in the hash tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<D> {
  digest: D,
  kind: NodeKind<D>,
}

impl<D> Node<D> {
  pub fn new_leaf<H: Hasher<Digest = D>>(hasher: &H, value: &[u8]) -> Self {
    Node { digest: hasher.leaf_hash(value), kind: NodeKind::Leaf }
  }

  pub fn new_internal<H: Hasher<Digest = D>>(hasher: &H, left: Node<D>, right: Node<D>) -> Self {
    let digest = hasher.combine(&left.digest, &right.digest);
    let kind = NodeKind::Branch { left: Box::new(left), right: Box::new(right) };
    Node { digest, kind }
  }

  pub fn digest(&self) -> &D {
    &self.digest
  }

  pub fn kind(&self) -> &NodeKind<D> {
    &self.kind
  }

  pub fn is_leaf(&self) -> bool {
    matches!(self.kind, NodeKind::Leaf)
  }

  pub fn children(&self) -> Option<(&Node<D>, &Node<D>)> {
    match &self.kind {
      NodeKind::Leaf => None,
      NodeKind::Branch { left, right } => Some((left, right)),
    }
  }

  pub fn left(&self) -> Option<&Node<D>> {
    self.children().map(|(left, _)| left)
  }

  pub fn right(&self) -> Option<&Node<D>> {
    self.children().map(|(_, right)| right)
  }

  /// Number of nodes in this subtree, this one included.
  pub fn count(&self) -> usize {
    match self.children() {
      None => 1,
      Some((left, right)) => 1 + left.count() + right.count(),
    }
  }
}

impl<D: Display> Node<D> {
  fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    writeln!(f, "{:indent$}{}", "", self.digest, indent = depth * 2)?;
    if let Some((left, right)) = self.children() {
      left.write_indented(f, depth + 1)?;
      right.write_indented(f, depth + 1)?;
    }
    Ok(())
  }
}

impl<D: Display> Display for Node<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.write_indented(f, 0)
  }
}

/// Perfect binary hash tree over a fixed, power-of-two sized list of transactions.
///
/// The whole node graph is built once in [`BinaryHashTree::new`] and never mutated afterwards, so a tree can be
/// shared between threads for proof generation and verification as long as the hasher and its digest can.
///
/// ```text
///             p1-p2-p3-p4
///            /           \
///        p1-p2           p3-p4
///        /   \           /   \
///      p1     p2       p3     p4
/// ```
#[derive(Debug, Clone)]
pub struct BinaryHashTree<H: Hasher> {
  hasher: H,
  transactions: Vec<Vec<u8>>,
  root: Node<H::Digest>,
  height: u32,
}

impl<H: Hasher + Default> BinaryHashTree<H> {
  /// Build a tree with the default instance of the hasher.
  pub fn from_leaves<I, T>(leaves: I) -> Result<Self>
  where
    I: IntoIterator<Item = T>,
    T: Into<Vec<u8>>,
  {
    Self::new(H::default(), leaves)
  }
}

impl<H: Hasher> BinaryHashTree<H> {
  /// Build the tree over `leaves` in their given order.
  ///
  /// Fails with [`Error::InvalidLeafCount`] before anything is hashed if the number of leaves is zero or not a power
  /// of two.
  pub fn new<I, T>(hasher: H, leaves: I) -> Result<Self>
  where
    I: IntoIterator<Item = T>,
    T: Into<Vec<u8>>,
  {
    let transactions = leaves.into_iter().map(Into::into).collect::<Vec<Vec<u8>>>();
    let n_leaves = transactions.len();
    if !is_power_of_two(n_leaves) {
      debug!("rejected {n_leaves} transactions: not a nonzero power of 2");
      return Err(Error::InvalidLeafCount(n_leaves));
    }

    let height = log2(n_leaves);
    let root = Self::build(&hasher, &transactions, height);
    debug!("built tree: {n_leaves} leaves, {} nodes, height {height}, root {}", 2 * n_leaves - 1, root.digest);
    Ok(BinaryHashTree { hasher, transactions, root, height })
  }

  fn build(hasher: &H, transactions: &[Vec<u8>], height: u32) -> Node<H::Digest> {
    // hash the transactions into the bottom layer, then pair up adjacent nodes layer by layer
    let mut nodes = transactions.iter().map(|value| Node::new_leaf(hasher, value)).collect::<Vec<_>>();
    for layer in 1..=height {
      let mut lower = nodes.into_iter();
      let mut upper = Vec::with_capacity(pow2e(height - layer));
      while let (Some(left), Some(right)) = (lower.next(), lower.next()) {
        upper.push(Node::new_internal(hasher, left, right));
      }
      trace!("layer {layer}: {} nodes", upper.len());
      nodes = upper;
    }
    debug_assert_eq!(1, nodes.len());
    nodes.swap_remove(0)
  }

  pub fn hasher(&self) -> &H {
    &self.hasher
  }

  pub fn root(&self) -> &Node<H::Digest> {
    &self.root
  }

  /// Transactions in leaf order.
  pub fn leaves(&self) -> impl ExactSizeIterator<Item = &[u8]> {
    self.transactions.iter().map(Vec::as_slice)
  }

  /// Index of the first leaf equal to `value`.
  pub fn position(&self, value: &[u8]) -> Option<usize> {
    self.transactions.iter().position(|t| t.as_slice() == value)
  }

  pub fn contains(&self, value: &[u8]) -> bool {
    self.position(value).is_some()
  }

  /// Digests of every layer, the leaf layer first and the root layer last.
  pub fn layers(&self) -> Vec<Vec<&H::Digest>> {
    let mut layers = Vec::with_capacity(self.height as usize + 1);
    let mut current = vec![&self.root];
    loop {
      layers.push(current.iter().copied().map(Node::digest).collect::<Vec<_>>());
      let next = current.iter().copied().filter_map(Node::children).flat_map(|(l, r)| [l, r]).collect::<Vec<_>>();
      if next.is_empty() {
        break;
      }
      current = next;
    }
    layers.reverse();
    layers
  }

  /// Sibling digests for the leaf `value`, leaf layer first.
  ///
  /// With duplicate transactions the leftmost one is proven.
  pub fn generate_proof(&self, value: &[u8]) -> Result<Proof<H::Digest>> {
    let Some(index) = self.position(value) else {
      debug!("proof requested for a transaction that is not part of this tree");
      return Err(Error::NotFound);
    };
    let hashed_query = self.hasher.leaf_hash(value);
    let mut proof = Vec::with_capacity(self.height as usize);
    if !Self::collect_proof(&self.root, (0, self.size()), index, &hashed_query, &mut proof) {
      return Err(Error::NotFound);
    }
    debug_assert_eq!(self.height as usize, proof.len());
    Ok(proof)
  }

  /// Depth-first search for leaf `index` holding `hashed_query`, where `range` is the `(first, width)` span of leaves
  /// under `node`. The sibling of every node on the way back up is pushed, so `proof` ends up ordered from the leaf
  /// layer to the root.
  fn collect_proof(
    node: &Node<H::Digest>,
    range: (usize, usize),
    index: usize,
    hashed_query: &H::Digest,
    proof: &mut Proof<H::Digest>,
  ) -> bool {
    let (first, width) = range;
    match &node.kind {
      NodeKind::Leaf => first == index && node.digest == *hashed_query,
      NodeKind::Branch { left, right } => {
        let half = width / 2;
        if Self::collect_proof(left, (first, half), index, hashed_query, proof) {
          proof.push(right.digest.clone());
          true
        } else if Self::collect_proof(right, (first + half, half), index, hashed_query, proof) {
          proof.push(left.digest.clone());
          true
        } else {
          false
        }
      }
    }
  }

  /// Sibling digests for the leaf at `index`, leaf layer first.
  pub fn generate_proof_at(&self, index: usize) -> Result<Proof<H::Digest>> {
    if index >= self.size() {
      debug!("proof requested for leaf {index} of a tree with {} leaves", self.size());
      return Err(Error::NotFound);
    }
    // the bits of index, most significant first, are the turns from the root
    let mut proof = Vec::with_capacity(self.height as usize);
    let mut current = &self.root;
    for layer in (0..self.height).rev() {
      let Some((left, right)) = current.children() else { break };
      if (index >> layer) & 1 == 0 {
        proof.push(right.digest.clone());
        current = left;
      } else {
        proof.push(left.digest.clone());
        current = right;
      }
    }
    proof.reverse();
    Ok(proof)
  }

  /// Proof for `value` with the side of every sibling recorded, checkable without this tree.
  pub fn generate_tagged_proof(&self, value: &[u8]) -> Result<TaggedProof<H::Digest>> {
    let index = self.position(value).ok_or(Error::NotFound)?;
    Ok(TaggedProof::from_path(index, self.generate_proof_at(index)?))
  }

  /// Check `proof` for the transaction `value` against this tree's root.
  ///
  /// An empty proof is only acceptable for a single-leaf tree, where the leaf is the root. A proof whose length
  /// differs from the tree height is rejected.
  pub fn verify_proof(&self, value: &[u8], proof: &[H::Digest]) -> Result<bool> {
    let Some(index) = self.position(value) else {
      debug!("verification requested for a transaction that is not part of this tree");
      return Err(Error::NotFound);
    };
    if proof.is_empty() && self.height > 0 {
      return Err(Error::EmptyProof);
    }
    if proof.len() != self.height as usize {
      debug!("proof rejected: {} digests for a tree of height {}", proof.len(), self.height);
      return Ok(false);
    }
    Ok(proof::verify_path(&self.hasher, index, value, proof, &self.root.digest))
  }
}

impl<H: Hasher> HashTree for BinaryHashTree<H> {
  type Digest = H::Digest;
  type Error = Error;

  fn size(&self) -> usize {
    self.transactions.len()
  }

  fn height(&self) -> u32 {
    self.height
  }

  fn get(&self, index: usize) -> Option<&[u8]> {
    self.transactions.get(index).map(Vec::as_slice)
  }

  fn root_hash(&self) -> &H::Digest {
    &self.root.digest
  }

  fn generate_proof(&self, value: &[u8]) -> Result<Proof<H::Digest>> {
    BinaryHashTree::generate_proof(self, value)
  }

  fn verify_path(&self, value: &[u8], proof: &[H::Digest]) -> Result<bool> {
    self.verify_proof(value, proof)
  }
}

impl<H: Hasher> Display for BinaryHashTree<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    Display::fmt(&self.root, f)
  }
}
