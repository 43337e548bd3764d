mod builder;
mod data;
mod error;
mod iter;
mod queue;
mod sentry;
mod task;

pub use crate::builder::Builder;
pub use crate::error::Error;
pub use crate::iter::{parallel_for, parallel_for_workers};
pub use crate::queue::{TaskQueue, DEFAULT_CAPACITY};
pub use crate::task::{Task, TaskStatus};

use crate::data::Data;
use crate::sentry::Sentry;
use std::fmt;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::JoinHandle;

/// A bounded task queue and the fixed pool of worker threads draining it.
///
/// Workers are spawned eagerly when the scheduler is built and joined when it
/// is [`shutdown`](Scheduler::shutdown) or dropped. The worker count and the
/// queue capacity are fixed for the scheduler's whole lifetime.
pub struct Scheduler {
	data: Arc<Data>,
	workers: Vec<JoinHandle<()>>,
}

impl Default for Scheduler {
	fn default() -> Self {
		Scheduler::new(0)
	}
}

impl Scheduler {
	/// Create a new scheduler with the default queue capacity.
	///
	/// A `workers` count of `0` resolves to the number of available hardware
	/// execution units. Use the [`Builder`] to configure the queue capacity,
	/// thread names, or stack sizes.
	pub fn new(workers: usize) -> Scheduler {
		Builder::new().worker_threads(workers).build()
	}

	/// Submit a task for execution on this scheduler's pool.
	///
	/// Equivalent to pushing onto the queue: blocks while the queue is full.
	/// Must not be called once [`shutdown`](Scheduler::shutdown) has begun.
	pub fn submit(&self, task: Arc<Task>) {
		self.data.queue.push(task);
	}

	/// Create a task from a work closure and submit it, returning the handle.
	///
	/// Blocks while the queue is full. Call [`Task::wait`] on the returned
	/// handle to block until the closure has run.
	///
	/// # Examples
	///
	/// ```
	/// let scheduler = parapool::Scheduler::new(4);
	/// let task = scheduler.spawn(|| println!("hello from a worker"));
	/// task.wait();
	/// ```
	pub fn spawn<F>(&self, func: F) -> Arc<Task>
	where
		F: FnOnce() + Send + 'static,
	{
		let task = Task::new(func);
		self.submit(task.clone());
		task
	}

	/// Shut the scheduler down, joining every worker thread.
	///
	/// The queue is shut down first so idle workers observe the sentinel and
	/// exit; tasks already queued are still drained and executed. Workers
	/// spawned as replacements after a work-function panic are joined too.
	/// Callers must not submit once shutdown has begun. Dropping the
	/// scheduler performs the same teardown.
	pub fn shutdown(mut self) {
		self.stop();
	}

	/// Get the configured number of workers in this pool
	pub fn worker_count(&self) -> usize {
		self.data.worker_count
	}

	/// Get the current number of live worker threads in this pool
	pub fn thread_count(&self) -> usize {
		self.data.thread_count.load(Ordering::SeqCst)
	}

	/// Spin up a new worker thread in this pool
	pub(crate) fn spin_up(data: Arc<Data>) -> JoinHandle<()> {
		// Create a new thread builder
		let mut builder = std::thread::Builder::new();
		// Assign a name to the thread if specified
		if let Some(ref name) = data.name {
			builder = builder.name(name.clone());
		}
		// Assign a stack size to the thread if specified
		if let Some(stack_size) = data.stack_size {
			builder = builder.stack_size(stack_size);
		}
		// Spawn a new worker thread
		let spawned = builder.spawn(move || {
			// Create a new sentry watcher
			let sentry = Sentry::new(Arc::downgrade(&data));
			// Increase the live thread counter
			data.thread_count.fetch_add(1, Ordering::SeqCst);
			// Loop continuously, processing any tasks
			loop {
				// Pull the next task from the queue
				let task = match data.queue.pop() {
					// We received a task to process
					Some(task) => task,
					// The queue was shut down and drained
					None => break,
				};
				// Execute the task, updating its status
				task.run();
			}
			// This thread has exited cleanly
			sentry.cancel();
		});
		// Thread creation only fails on resource exhaustion, which is fatal
		match spawned {
			Ok(handle) => handle,
			Err(err) => panic!("failed to spawn worker thread: {err}"),
		}
	}

	/// Shut the queue down and join every worker, idempotently
	fn stop(&mut self) {
		self.data.queue.shutdown();
		for worker in self.workers.drain(..) {
			// A worker that panicked was already replaced by its sentry
			let _ = worker.join();
		}
		// Join the replacement workers as well. The lock is released before
		// each join: a panicking replacement pushes its own replacement from
		// inside its sentry, and that push happens before its join returns.
		loop {
			let Some(worker) = self.data.replacements.lock().pop() else {
				break;
			};
			let _ = worker.join();
		}
	}
}

impl Drop for Scheduler {
	fn drop(&mut self) {
		self.stop();
	}
}

impl fmt::Debug for Scheduler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Scheduler")
			.field("worker_count", &self.worker_count())
			.field("thread_count", &self.thread_count())
			.finish()
	}
}
