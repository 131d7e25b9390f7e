use clap::{Parser, ValueEnum};
use log::info;
use merkle_tree::{BinaryHashTree, Blake3Hasher, ConcatHasher, HashTree, Hasher, Sha256Hasher, random_transactions};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HasherKind {
  /// Readable placeholder: leaves as-is, parents as "left-right"
  Concat,
  Blake3,
  /// SHA-256 with leaf/node domain separation
  Sha256,
}

#[derive(Parser)]
#[command(name = "merkle-demo")]
#[command(author, version, about = "Build a binary hash tree, print it, and prove one transaction's inclusion")]
struct Args {
  /// Transactions (leaf values); their number must be a power of 2
  #[arg(default_values_t = ["p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8"].map(String::from))]
  leaves: Vec<String>,

  #[arg(long, value_enum, default_value_t = HasherKind::Concat)]
  hasher: HasherKind,

  /// Use N pseudo-random 8-byte transactions instead of the given leaves
  #[arg(short = 'n', long)]
  count: Option<usize>,

  /// Leaf index to prove when no query is given
  #[arg(short, long, default_value_t = 0)]
  index: usize,

  /// Transaction to prove
  #[arg(short, long)]
  query: Option<String>,

  /// Do not print the tree structure
  #[arg(long, default_value_t = false)]
  quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
  let args = Args::parse();

  let transactions = match args.count {
    Some(n) => random_transactions(n),
    None => args.leaves.iter().map(|s| s.as_bytes().to_vec()).collect(),
  };

  match args.hasher {
    HasherKind::Concat => run(ConcatHasher, transactions, &args),
    HasherKind::Blake3 => run(Blake3Hasher, transactions, &args),
    HasherKind::Sha256 => run(Sha256Hasher, transactions, &args),
  }
}

fn run<H: Hasher>(hasher: H, transactions: Vec<Vec<u8>>, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
  let tree = BinaryHashTree::new(hasher, transactions)?;
  info!("{} transactions, height {}", tree.size(), tree.height());
  println!("root: {}", tree.root_hash());

  if !args.quiet {
    println!("Tree Structure");
    print!("{tree}");
  }

  let query = match &args.query {
    Some(q) => q.as_bytes().to_vec(),
    None => tree.get(args.index).ok_or(merkle_tree::Error::NotFound)?.to_vec(),
  };

  let proof = tree.generate_proof(&query)?;
  println!("proof:");
  for digest in &proof {
    println!("  {digest}");
  }
  println!("is the proof right? {}", tree.verify_proof(&query, &proof)?);

  let tagged = tree.generate_tagged_proof(&query)?;
  println!("tagged proof (leaf {}):", tagged.index());
  for step in tagged.steps() {
    println!("  {:?} {}", step.side, step.digest);
  }
  println!("is the tagged proof right? {}", tagged.verify(tree.hasher(), &query, tree.root_hash()));
  Ok(())
}
