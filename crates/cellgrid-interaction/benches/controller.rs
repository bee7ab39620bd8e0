//! Benchmarks for applying commands to large multi-selections.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench controller
//! ```

use std::hint;

use cellgrid_core::Position;
use cellgrid_interaction::{Command, InteractionController, MoveDirection};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

const SIZES: [usize; 3] = [9, 16, 25];

fn fully_selected(size: usize) -> InteractionController {
    let mut controller = InteractionController::with_empty(size).unwrap();
    for index in 0..size * size {
        controller
            .apply(Command::ToggleCell(Position::from_index(index, size)))
            .unwrap();
    }
    controller
}

fn bench_enter_digit(c: &mut Criterion) {
    for size in SIZES {
        c.bench_with_input(BenchmarkId::new("enter_digit", size), &size, |b, &size| {
            b.iter_batched_ref(
                || fully_selected(size),
                |controller| {
                    let first = controller.apply(Command::EnterDigit(1)).unwrap();
                    let second = controller.apply(Command::EnterDigit(2)).unwrap();
                    hint::black_box((first, second))
                },
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_truncate(c: &mut Criterion) {
    for size in SIZES {
        c.bench_with_input(BenchmarkId::new("truncate", size), &size, |b, &size| {
            b.iter_batched_ref(
                || {
                    let mut controller = fully_selected(size);
                    controller.apply(Command::EnterDigit(9)).unwrap();
                    controller
                },
                |controller| hint::black_box(controller.apply(Command::Truncate).unwrap()),
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_move(c: &mut Criterion) {
    for size in SIZES {
        c.bench_with_input(BenchmarkId::new("move", size), &size, |b, &size| {
            b.iter_batched_ref(
                || fully_selected(size),
                |controller| {
                    hint::black_box(controller.apply(Command::Move(MoveDirection::Down)).unwrap())
                },
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(benches, bench_enter_digit, bench_truncate, bench_move);
criterion_main!(benches);
