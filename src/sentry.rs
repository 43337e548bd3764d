use crate::data::Data;
use crate::Scheduler;
use std::sync::atomic::Ordering;
use std::sync::Weak;

/// A guard held by each worker thread for the duration of its loop
pub(crate) struct Sentry {
	active: bool,
	data: Weak<Data>,
}

impl Sentry {
	/// Create a new sentry tracker
	pub fn new(data: Weak<Data>) -> Sentry {
		Sentry {
			data,
			active: true,
		}
	}
	/// Cancel and destroy this sentry
	pub fn cancel(mut self) {
		self.active = false;
	}
}

impl Drop for Sentry {
	fn drop(&mut self) {
		let Some(data) = self.data.upgrade() else {
			return;
		};
		// This worker thread is exiting
		data.thread_count.fetch_sub(1, Ordering::SeqCst);
		// If this sentry was still active,
		// then a work function panicked out
		// of the worker loop, so we spawn a
		// replacement to keep the pool full.
		if self.active && !data.queue.is_shutdown() {
			// Spawn another new thread and
			// record its handle so shutdown
			// can join the replacement too.
			let handle = Scheduler::spin_up(data.clone());
			data.replacements.lock().push(handle);
		}
	}
}
