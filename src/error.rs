use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("the number of transactions ({0}) has to be a nonzero power of 2")]
  InvalidLeafCount(usize),

  #[error("the query transaction is not part of this merkle tree")]
  NotFound,

  #[error("the proof is empty")]
  EmptyProof,
}
