use crate::task::Task;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

/// The queue capacity used when a caller requests a capacity of zero
pub const DEFAULT_CAPACITY: usize = 32;

/// A bounded, blocking, FIFO queue of pending tasks.
///
/// The queue is a fixed-size circular buffer shared between submitters and
/// workers. A full queue blocks submitters and an empty queue blocks workers,
/// which is the scheduler's only back-pressure mechanism. After
/// [`shutdown`](TaskQueue::shutdown), [`pop`](TaskQueue::pop) drains any
/// remaining tasks and then returns `None` so workers can exit their loops.
pub struct TaskQueue {
	inner: Mutex<Inner>,
	/// Signalled when a slot frees up
	space: Condvar,
	/// Signalled when a task arrives, broadcast on shutdown
	items: Condvar,
}

struct Inner {
	slots: Box<[Option<Arc<Task>>]>,
	head: usize,
	tail: usize,
	count: usize,
	shutdown: bool,
}

impl Inner {
	/// Advance a head or tail index one slot, wrapping at capacity
	fn advance(&self, index: usize) -> usize {
		let next = index + 1;
		if next == self.slots.len() {
			0
		} else {
			next
		}
	}
}

impl TaskQueue {
	/// Create a new queue holding at most `capacity` tasks.
	///
	/// A queue must be able to hold at least one task, so a `capacity` of
	/// zero falls back to [`DEFAULT_CAPACITY`].
	pub fn new(capacity: usize) -> TaskQueue {
		let capacity = if capacity == 0 {
			DEFAULT_CAPACITY
		} else {
			capacity
		};
		TaskQueue {
			inner: Mutex::new(Inner {
				slots: (0..capacity).map(|_| None).collect(),
				head: 0,
				tail: 0,
				count: 0,
				shutdown: false,
			}),
			space: Condvar::new(),
			items: Condvar::new(),
		}
	}

	/// Enqueue a task, blocking while the queue is full.
	///
	/// Never fails and never drops a task. Callers must not push after
	/// [`shutdown`](TaskQueue::shutdown).
	pub fn push(&self, task: Arc<Task>) {
		let mut inner = self.inner.lock();
		while inner.count == inner.slots.len() {
			self.space.wait(&mut inner);
		}
		debug_assert!(!inner.shutdown, "push after shutdown");
		let tail = inner.tail;
		let next = inner.advance(tail);
		inner.slots[tail] = Some(task);
		inner.tail = next;
		inner.count += 1;
		// Wake one worker waiting for a task
		self.items.notify_one();
	}

	/// Dequeue the oldest task, blocking while the queue is empty.
	///
	/// Returns `None` only once the queue has been shut down and drained;
	/// this is the sentinel a worker uses to exit its loop.
	pub fn pop(&self) -> Option<Arc<Task>> {
		let mut inner = self.inner.lock();
		while inner.count == 0 && !inner.shutdown {
			self.items.wait(&mut inner);
		}
		if inner.count == 0 {
			return None;
		}
		let head = inner.head;
		let next = inner.advance(head);
		let task = inner.slots[head].take();
		inner.head = next;
		inner.count -= 1;
		// Wake one submitter waiting for a free slot
		self.space.notify_one();
		task
	}

	/// Shut the queue down, waking every worker blocked in [`pop`](TaskQueue::pop).
	///
	/// Space waiters are not woken: no pushes occur after shutdown by the
	/// caller's contract.
	pub fn shutdown(&self) {
		let mut inner = self.inner.lock();
		inner.shutdown = true;
		self.items.notify_all();
	}

	/// Check whether the queue has been shut down
	pub fn is_shutdown(&self) -> bool {
		self.inner.lock().shutdown
	}

	/// Get the number of tasks currently queued
	pub fn len(&self) -> usize {
		self.inner.lock().count
	}

	/// Check whether the queue is currently empty
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Get the fixed capacity of this queue
	pub fn capacity(&self) -> usize {
		self.inner.lock().slots.len()
	}
}
