use crate::queue::TaskQueue;
use parking_lot::Mutex;
use std::sync::atomic::AtomicUsize;
use std::thread::JoinHandle;

/// Data shared between the scheduler handle and all of its worker threads
pub(crate) struct Data {
	/// The name for each worker thread
	pub(crate) name: Option<String>,
	/// The stack size for each worker thread
	pub(crate) stack_size: Option<usize>,
	/// The configured number of workers, fixed for the scheduler's lifetime
	pub(crate) worker_count: usize,
	/// The current number of live worker threads
	pub(crate) thread_count: AtomicUsize,
	/// Handles for replacement workers spawned after a work-function panic
	pub(crate) replacements: Mutex<Vec<JoinHandle<()>>>,
	/// The bounded task queue the workers drain
	pub(crate) queue: TaskQueue,
}
