use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parapool::{parallel_for_workers, Builder, Scheduler};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const WORKER_COUNTS: &[usize] = &[1, 2, 4, 8];

/// A simple CPU-intensive task for benchmarking
fn cpu_task(iterations: usize) -> usize {
	let mut sum: usize = 0;
	for i in 0..iterations {
		sum = sum.wrapping_add(i * 17 + 42);
	}
	sum
}

/// Benchmark spawn/await throughput with different worker counts
fn bench_spawn_throughput(c: &mut Criterion) {
	let mut group = c.benchmark_group("spawn_throughput");

	for &workers in WORKER_COUNTS {
		for &task_count in &[100, 1000] {
			group.throughput(Throughput::Elements(task_count as u64));

			group.bench_with_input(
				BenchmarkId::new(format!("{}_workers", workers), task_count),
				&(workers, task_count),
				|b, &(workers, task_count)| {
					let scheduler = Scheduler::new(workers);
					b.iter(|| {
						let mut tasks = Vec::with_capacity(task_count);
						for _ in 0..task_count {
							tasks.push(scheduler.spawn(|| {
								black_box(cpu_task(100));
							}));
						}
						for task in &tasks {
							task.wait();
						}
					});
				},
			);
		}
	}
	group.finish();
}

/// Benchmark a row-partitioned matrix multiply through parallel_for
fn bench_parallel_for_matmul(c: &mut Criterion) {
	let mut group = c.benchmark_group("parallel_for_matmul");

	let n = 64;
	let a: Arc<Vec<f64>> = Arc::new((0..n * n).map(|i| (i % 97) as f64).collect());
	let b_mat: Arc<Vec<f64>> = Arc::new((0..n * n).map(|i| (i % 89) as f64).collect());
	let out: Arc<Vec<AtomicU64>> = Arc::new((0..n * n).map(|_| AtomicU64::new(0)).collect());

	for &workers in WORKER_COUNTS {
		group.throughput(Throughput::Elements((n * n) as u64));

		group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |bench, &workers| {
			let a = a.clone();
			let b_mat = b_mat.clone();
			let out = out.clone();
			bench.iter(|| {
				parallel_for_workers(0, 1, n as i64, workers, |row| {
					let row = row as usize;
					for col in 0..n {
						let mut acc = 0.0f64;
						for k in 0..n {
							acc += a[row * n + k] * b_mat[k * n + col];
						}
						out[row * n + col].store(acc.to_bits(), Ordering::Relaxed);
					}
				})
				.unwrap();
			});
		});
	}
	group.finish();
}

/// Benchmark the per-call pool start/stop overhead on its own
fn bench_pool_lifecycle(c: &mut Criterion) {
	let mut group = c.benchmark_group("pool_lifecycle");

	for &workers in WORKER_COUNTS {
		group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |bench, &workers| {
			bench.iter(|| {
				let scheduler = Builder::new().worker_threads(workers).build();
				scheduler.shutdown();
			});
		});
	}
	group.finish();
}

criterion_group!(
	benches,
	bench_spawn_throughput,
	bench_parallel_for_matmul,
	bench_pool_lifecycle
);
criterion_main!(benches);
