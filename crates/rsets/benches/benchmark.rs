use criterion::{criterion_group, criterion_main};

use crate::utils::{create_facts, create_scheduler};

mod benchmarks;
mod utils;

criterion_group!(scheduler, benchmarks::scheduler::benchmark);
criterion_group!(reconcile, benchmarks::reconcile::benchmark);

criterion_main!(scheduler, reconcile);
