use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
	#[error("parallel_for requires a nonzero step")]
	ZeroStep,
}
