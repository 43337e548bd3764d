use crate::builder::Builder;
use crate::error::Error;
use crate::task::Task;

/// Run a loop body in parallel across all available hardware threads.
///
/// Calls `func` exactly once for every index in the arithmetic sequence
/// `start, start + step, ...` that lies before `end`, spread across a
/// dedicated pool of worker threads, and returns once every call has
/// completed. An empty range returns immediately without building a pool.
///
/// The scheduler never writes to the data captured by `func`; making
/// concurrent calls safe (for example by giving every index a disjoint
/// output slot) is entirely the caller's responsibility.
///
/// # Errors
///
/// Returns [`Error::ZeroStep`] if `step` is `0`.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicI64, Ordering};
///
/// let out: Vec<AtomicI64> = (0..10).map(|_| AtomicI64::new(0)).collect();
/// parapool::parallel_for(0, 1, 10, |i| {
///     out[i as usize].store(i * i, Ordering::Relaxed);
/// })
/// .unwrap();
///
/// assert_eq!(out[7].load(Ordering::Relaxed), 49);
/// ```
pub fn parallel_for<F>(start: i64, step: i64, end: i64, func: F) -> Result<(), Error>
where
	F: Fn(i64) + Sync,
{
	parallel_for_workers(start, step, end, 0, func)
}

/// Run a loop body in parallel on a pool of `workers` threads.
///
/// Identical to [`parallel_for`], except that the worker count is given
/// explicitly; `0` resolves to the number of available hardware execution
/// units. One scheduler is built per call and torn down before returning,
/// so no state is shared across calls. The queue keeps its default
/// capacity: when there are more tasks than free slots, submission simply
/// blocks until the workers catch up.
pub fn parallel_for_workers<F>(
	start: i64,
	step: i64,
	end: i64,
	workers: usize,
	func: F,
) -> Result<(), Error>
where
	F: Fn(i64) + Sync,
{
	if step == 0 {
		return Err(Error::ZeroStep);
	}
	let count = iter_count(start, step, end);
	if count == 0 {
		return Ok(());
	}
	// Build a dedicated scheduler for this call
	let scheduler = Builder::new().worker_threads(workers).build();
	let func = &func;
	let mut tasks = Vec::with_capacity(count);
	// Submit one task per loop index, blocking whenever the queue is full
	for k in 0..count {
		let i = start + k as i64 * step;
		// Safety: every task is awaited below and the scheduler is joined
		// before this function returns, so the borrow of `func` is valid
		// for as long as any task can run.
		let task = unsafe { Task::scoped(move || func(i)) };
		scheduler.submit(task.clone());
		tasks.push(task);
	}
	// Await every task in submission order
	for task in &tasks {
		task.wait();
	}
	// Tear the pool down now that nothing is pending or running
	scheduler.shutdown();
	Ok(())
}

/// Number of indices in the arithmetic sequence from `start` towards `end`.
///
/// Computes `ceil((end - start) / step)` clamped to zero; a step pointing
/// away from `end` yields an empty range. The span is computed on the
/// unsigned domain, so ranges wider than `i64::MAX` are handled exactly.
/// `step` must be nonzero.
fn iter_count(start: i64, step: i64, end: i64) -> usize {
	if start == end || (end > start) != (step > 0) {
		return 0;
	}
	let span = end.abs_diff(start);
	let step = step.unsigned_abs();
	span.div_ceil(step) as usize
}

#[cfg(test)]
mod tests {
	use super::iter_count;

	#[test]
	fn counts_unit_step() {
		assert_eq!(iter_count(0, 1, 10), 10);
		assert_eq!(iter_count(5, 1, 6), 1);
	}

	#[test]
	fn counts_round_up() {
		assert_eq!(iter_count(0, 3, 10), 4);
		assert_eq!(iter_count(0, 2, 7), 4);
		assert_eq!(iter_count(0, 16, 10), 1);
	}

	#[test]
	fn counts_negative_step() {
		assert_eq!(iter_count(10, -2, 0), 5);
		assert_eq!(iter_count(10, -3, 0), 4);
	}

	#[test]
	fn counts_empty_ranges() {
		assert_eq!(iter_count(5, 1, 5), 0);
		assert_eq!(iter_count(0, 1, -10), 0);
		assert_eq!(iter_count(0, -1, 10), 0);
	}

	#[test]
	fn counts_full_width_ranges() {
		// Spans wider than i64::MAX must not overflow
		assert_eq!(iter_count(i64::MIN, 1, i64::MAX), u64::MAX as usize);
		assert_eq!(iter_count(i64::MIN, i64::MAX, i64::MAX), 3);
		assert_eq!(iter_count(i64::MAX, i64::MIN, i64::MIN), 2);
	}
}
