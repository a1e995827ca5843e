use criterion::{BenchmarkId, Criterion};

use rsets::{TaskRequest, WorkerResources, get_resources};

use crate::{create_facts, create_scheduler};

fn bench_get_resources(c: &mut Criterion) {
    for node_count in [1, 16, 256] {
        let mut scheduler = create_scheduler(node_count, 4);
        let team = scheduler
            .assign_resources(node_count as u32 * 2)
            .unwrap()
            .into_team()
            .unwrap();
        let worker = WorkerResources::new(scheduler.inventory(), team).unwrap();
        let facts = create_facts(64);
        let request = TaskRequest {
            num_procs: Some(node_count as u32 * 8),
            ..Default::default()
        };

        c.bench_with_input(
            BenchmarkId::new("get resources", node_count),
            &(worker, facts, request),
            |b, (worker, facts, request)| {
                b.iter(|| get_resources(worker, facts, request, false).unwrap());
            },
        );
    }
}

pub fn benchmark(c: &mut Criterion) {
    bench_get_resources(c);
}
