use blockdeque::BlockDeque;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::VecDeque;

fn bench_sequential_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_push");

    for size in [100, 1000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("push_back", size), size, |b, &size| {
            b.iter(|| {
                let mut deque = BlockDeque::new();
                for i in 0..size as u64 {
                    deque.push_back(black_box(i)).unwrap();
                }
                black_box(deque.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("push_front", size), size, |b, &size| {
            b.iter(|| {
                let mut deque = BlockDeque::new();
                for i in 0..size as u64 {
                    deque.push_front(black_box(i)).unwrap();
                }
                black_box(deque.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("vecdeque_push_front", size), size, |b, &size| {
            b.iter(|| {
                let mut deque = VecDeque::new();
                for i in 0..size as u64 {
                    deque.push_front(black_box(i));
                }
                black_box(deque.len())
            });
        });
    }
    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for size in [100, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("index", size), size, |b, &size| {
            let deque: BlockDeque<u64> = (0..size as u64).collect();

            b.iter(|| {
                let mut index = 0usize;
                for _ in 0..size {
                    // Stride through the deque to defeat sequential prefetch
                    index = (index + 7919) % size;
                    black_box(deque[index]);
                }
            });
        });
    }
    group.finish();
}

fn bench_iterator_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterator");

    for size in [100, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("full_iteration", size), size, |b, &size| {
            let deque: BlockDeque<u64> = (0..size as u64).collect();

            b.iter(|| {
                for value in black_box(&deque) {
                    black_box(value);
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("cursor_walk", size), size, |b, &size| {
            let deque: BlockDeque<u64> = (0..size as u64).collect();

            b.iter(|| {
                let mut cursor = deque.begin();
                let end = deque.end();
                while cursor != end {
                    black_box(cursor.get());
                    cursor.move_next();
                }
            });
        });
    }
    group.finish();
}

fn bench_middle_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("middle");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("insert_remove_cycle", size),
            size,
            |b, &size| {
                let mut deque: BlockDeque<u64> = (0..size as u64).collect();

                b.iter(|| {
                    for i in 0..size {
                        deque.insert(i % deque.len(), black_box(i as u64)).unwrap();
                    }
                    for i in 0..size {
                        black_box(deque.remove(i % deque.len()).unwrap());
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_deque_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("push_pop_cycle", size),
            size,
            |b, &size| {
                b.iter(|| {
                    let mut deque = BlockDeque::new();

                    for i in 0..size {
                        black_box(deque.push_back(i).unwrap());
                        black_box(deque.push_front(i).unwrap());
                    }

                    for _ in 0..size {
                        black_box(deque.pop_front());
                        black_box(deque.pop_back());
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_large_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_elements");

    for count in [100, 1000].iter() {
        group.throughput(Throughput::Bytes(*count as u64 * 1024));
        group.bench_with_input(BenchmarkId::new("push_back_1k", count), count, |b, &count| {
            b.iter(|| {
                let mut deque = BlockDeque::new();
                for _ in 0..count {
                    black_box(deque.push_back([0u8; 1024]).unwrap());
                }
                black_box(deque.len())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_push,
    bench_random_access,
    bench_iterator_performance,
    bench_middle_operations,
    bench_deque_operations,
    bench_large_elements
);
criterion_main!(benches);
