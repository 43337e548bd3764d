use parking_lot::{Condvar, Mutex};
use std::mem;
use std::sync::Arc;

type Work = Box<dyn FnOnce() + Send + 'static>;

/// The completion state of a [`Task`].
///
/// Statuses are strictly ordered and only ever advance: a task moves from
/// [`Created`](TaskStatus::Created) to [`Running`](TaskStatus::Running) to
/// [`Completed`](TaskStatus::Completed), never backwards and never skipping
/// a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskStatus {
	/// The task has been created but no worker has picked it up yet
	Created,
	/// A worker has dequeued the task and is executing its work function
	Running,
	/// The work function has returned
	Completed,
}

/// A single schedulable unit of work.
///
/// A task pairs a type-erased work closure with a small status monitor.
/// The submitter keeps an `Arc<Task>` to [`wait`](Task::wait) on; the queue
/// and the executing worker hold transient clones. The closure runs exactly
/// once, on whichever worker dequeues the task.
pub struct Task {
	/// The work closure, taken exactly once by the executing worker
	work: Mutex<Option<Work>>,
	/// The current status, guarded by its own lock
	state: Mutex<TaskStatus>,
	/// Signalled on every status transition
	cond: Condvar,
}

impl Task {
	/// Create a new task from a work closure
	pub fn new<F>(func: F) -> Arc<Task>
	where
		F: FnOnce() + Send + 'static,
	{
		// Safety: the closure is 'static, so no borrow can expire.
		unsafe { Self::scoped(func) }
	}

	/// Create a task from a closure borrowing non-`'static` data.
	///
	/// # Safety
	///
	/// The caller must ensure that every borrow captured by `func` remains
	/// valid until this task has been observed [`Completed`](TaskStatus::Completed),
	/// or until the last `Arc<Task>` handle has been dropped without the
	/// closure ever running. [`parallel_for`](crate::parallel_for) upholds
	/// this by awaiting every task and joining the pool before returning.
	pub(crate) unsafe fn scoped<'a, F>(func: F) -> Arc<Task>
	where
		F: FnOnce() + Send + 'a,
	{
		let work: Box<dyn FnOnce() + Send + 'a> = Box::new(func);
		// Erase the closure lifetime; validity is the caller's obligation.
		let work: Work = unsafe { mem::transmute(work) };
		Arc::new(Task {
			work: Mutex::new(Some(work)),
			state: Mutex::new(TaskStatus::Created),
			cond: Condvar::new(),
		})
	}

	/// Get the current status of this task
	pub fn status(&self) -> TaskStatus {
		*self.state.lock()
	}

	/// Block the calling thread until this task has completed.
	///
	/// Any number of threads may wait on the same task concurrently; all of
	/// them are released by the completion broadcast. Waiting on a task that
	/// is never executed blocks forever.
	pub fn wait(&self) {
		let mut state = self.state.lock();
		while *state != TaskStatus::Completed {
			self.cond.wait(&mut state);
		}
	}

	/// Transition the status and wake every waiter
	fn set_status(&self, new: TaskStatus) {
		let mut state = self.state.lock();
		debug_assert!(new >= *state, "task status never regresses");
		*state = new;
		self.cond.notify_all();
	}

	/// Execute this task on the calling worker thread.
	///
	/// The status lock is only held for the two transitions, never while the
	/// work closure itself runs.
	pub(crate) fn run(&self) {
		self.set_status(TaskStatus::Running);
		// Take the closure out so the work lock is released before the call
		let work = self.work.lock().take();
		if let Some(work) = work {
			work();
		}
		self.set_status(TaskStatus::Completed);
	}
}

impl std::fmt::Debug for Task {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Task").field("status", &self.status()).finish()
	}
}
