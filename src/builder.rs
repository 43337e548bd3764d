use crate::data::Data;
use crate::queue::TaskQueue;
use crate::Scheduler;
use parking_lot::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

#[derive(Default, Clone)]
pub struct Builder {
	worker_threads: Option<usize>,
	queue_capacity: Option<usize>,
	thread_name: Option<String>,
	thread_stack_size: Option<usize>,
}

impl Builder {
	/// Initiate a new [`Builder`].
	///
	/// # Examples
	///
	/// ```
	/// let builder = parapool::Builder::new();
	/// ```
	pub fn new() -> Builder {
		Builder {
			worker_threads: None,
			queue_capacity: None,
			thread_name: None,
			thread_stack_size: None,
		}
	}

	/// Set the number of worker threads spawned by the built [`Scheduler`].
	/// A count of `0`, or no count at all, resolves to the number of
	/// available hardware execution units.
	///
	/// # Examples
	///
	/// Exactly eight workers will drain this scheduler's queue:
	///
	/// ```
	/// let scheduler = parapool::Builder::new()
	///     .worker_threads(8)
	///     .build();
	///
	/// assert_eq!(scheduler.worker_count(), 8);
	/// ```
	pub fn worker_threads(mut self, count: usize) -> Builder {
		self.worker_threads = Some(count);
		self
	}

	/// Set the capacity of the bounded task queue owned by the built
	/// [`Scheduler`]. A capacity of `0`, or no capacity at all, resolves to
	/// the default of [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) tasks.
	/// Submitting to a full queue blocks until a worker frees a slot.
	///
	/// # Examples
	///
	/// ```
	/// let scheduler = parapool::Builder::new()
	///     .queue_capacity(64)
	///     .build();
	/// ```
	pub fn queue_capacity(mut self, capacity: usize) -> Builder {
		self.queue_capacity = Some(capacity);
		self
	}

	/// Set the thread name for each of the workers spawned by the built
	/// [`Scheduler`]. If not specified, workers are unnamed.
	///
	/// # Examples
	///
	/// Each worker spawned by this scheduler will have the name "worker":
	///
	/// ```
	/// use std::thread;
	///
	/// let scheduler = parapool::Builder::new()
	///     .thread_name("worker")
	///     .build();
	///
	/// let task = scheduler.spawn(|| {
	///     assert_eq!(thread::current().name(), Some("worker"));
	/// });
	/// task.wait();
	/// ```
	pub fn thread_name(mut self, name: impl Into<String>) -> Builder {
		self.thread_name = Some(name.into());
		self
	}

	/// Set the stack size (in bytes) for each of the workers spawned by the
	/// built [`Scheduler`]. If not specified, workers get the stack size
	/// [as specified in the `std::thread` documentation][thread].
	///
	/// [thread]: https://doc.rust-lang.org/std/thread/index.html#stack-size
	///
	/// # Examples
	///
	/// Each worker spawned by this scheduler will have a 4 MB stack:
	///
	/// ```
	/// let scheduler = parapool::Builder::new()
	///     .thread_stack_size(4_000_000)
	///     .build();
	/// ```
	pub fn thread_stack_size(mut self, size: usize) -> Builder {
		self.thread_stack_size = Some(size);
		self
	}

	/// Finalize the [`Builder`] and build the [`Scheduler`], spawning its
	/// worker threads eagerly.
	///
	/// # Panics
	///
	/// This method panics if the operating system refuses to spawn a worker
	/// thread; the scheduler has no degraded mode.
	///
	/// # Examples
	///
	/// ```
	/// let scheduler = parapool::Builder::new()
	///     .worker_threads(4)
	///     .queue_capacity(64)
	///     .build();
	/// ```
	pub fn build(self) -> Scheduler {
		// Resolve a zero worker count to the available hardware threads
		let workers = match self.worker_threads {
			Some(count) if count > 0 => count,
			_ => num_cpus::get(),
		};
		// Create the scheduler shared data
		let data = Arc::new(Data {
			name: self.thread_name,
			stack_size: self.thread_stack_size,
			worker_count: workers,
			thread_count: AtomicUsize::new(0),
			replacements: Mutex::new(Vec::new()),
			queue: TaskQueue::new(self.queue_capacity.unwrap_or(0)),
		});
		// Spawn the desired number of workers
		let handles = (0..workers).map(|_| Scheduler::spin_up(data.clone())).collect();
		// Return the new scheduler
		Scheduler {
			data,
			workers: handles,
		}
	}
}
