use merkle_tree::{
  BinaryHashTree, Blake3Hasher, ConcatHasher, Error, HashTree, Hasher, Side, TaggedProof, compute_root, verify_path,
};

fn create_tree() -> BinaryHashTree<ConcatHasher> {
  BinaryHashTree::new(ConcatHasher, ["p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8"]).unwrap()
}

#[test]
fn tree_creation() {
  let tree = create_tree();
  assert_eq!("p1-p2-p3-p4-p5-p6-p7-p8", tree.root_hash());
  assert_eq!(3, tree.height());
  assert_eq!(8, tree.size());
}

#[test]
fn tree_proof() {
  let tree = create_tree();
  let proof = tree.generate_proof(b"p6").unwrap();
  assert_eq!(vec!["p5", "p7-p8", "p1-p2-p3-p4"], proof);
  assert!(tree.verify_proof(b"p6", &proof).unwrap());
}

#[test]
fn proofs_through_hash_tree_trait() {
  fn prove_all<T: HashTree>(tree: &T) -> bool
  where
    T::Error: std::fmt::Debug,
  {
    (0..tree.size()).all(|i| {
      let value = tree.get(i).unwrap().to_vec();
      let proof = tree.generate_proof(&value).unwrap();
      tree.verify_path(&value, &proof).unwrap()
    })
  }
  assert!(prove_all(&create_tree()));
  assert!(prove_all(&BinaryHashTree::<Blake3Hasher>::from_leaves(merkle_tree::random_transactions(32)).unwrap()));
}

#[test]
fn detached_verifiers() {
  let tree = create_tree();
  let root = tree.root_hash().clone();
  let proof = tree.generate_proof(b"p3").unwrap();

  // positional: needs the leaf index, but not the tree
  assert_eq!(root, compute_root(&ConcatHasher, 2, b"p3", &proof));
  assert!(verify_path(&ConcatHasher, 2, b"p3", &proof, &root));
  assert!(!verify_path(&ConcatHasher, 3, b"p3", &proof, &root));

  // tagged: needs neither
  let tagged: TaggedProof<String> = tree.generate_tagged_proof(b"p3").unwrap();
  assert_eq!(vec![Side::Right, Side::Left, Side::Right], tagged.steps().iter().map(|s| s.side).collect::<Vec<_>>());
  assert!(tagged.verify(&ConcatHasher, b"p3", &root));
  assert!(!tagged.verify(&ConcatHasher, b"p4", &root));
}

#[test]
fn errors_are_reported() {
  assert_eq!(Some(Error::InvalidLeafCount(0)), BinaryHashTree::new(ConcatHasher, Vec::<String>::new()).err());
  assert_eq!(Some(Error::InvalidLeafCount(5)), BinaryHashTree::new(ConcatHasher, ["a", "b", "c", "d", "e"]).err());

  let tree = create_tree();
  assert_eq!(Err(Error::NotFound), tree.generate_proof(b"p10"));
  assert_eq!(Err(Error::EmptyProof), tree.verify_proof(b"p1", &[]));
  assert_eq!("the number of transactions (5) has to be a nonzero power of 2", Error::InvalidLeafCount(5).to_string());
}

#[test]
fn custom_hasher() {
  /// Sum of bytes, order-sensitive on combine.
  struct Checksum;

  impl Hasher for Checksum {
    type Digest = u64;

    fn leaf_hash(&self, value: &[u8]) -> u64 {
      value.iter().map(|b| *b as u64).sum()
    }

    fn combine(&self, left: &u64, right: &u64) -> u64 {
      left.wrapping_mul(31).wrapping_add(*right)
    }
  }

  let tree = BinaryHashTree::new(Checksum, ["a", "bb", "ccc", "dddd"]).unwrap();
  for value in ["a", "bb", "ccc", "dddd"] {
    let proof = tree.generate_proof(value.as_bytes()).unwrap();
    assert!(tree.verify_proof(value.as_bytes(), &proof).unwrap());
  }
}
