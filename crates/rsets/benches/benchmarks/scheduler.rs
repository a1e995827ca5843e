use criterion::{BatchSize, BenchmarkId, Criterion};

use rsets::RsetId;

use crate::create_scheduler;

fn bench_assign(c: &mut Criterion) {
    for node_count in [4, 64, 256] {
        for rsets_req in [1, 3, 8] {
            c.bench_with_input(
                BenchmarkId::new(
                    "assign resources",
                    format!("nodes={node_count}, rsets_req={rsets_req}"),
                ),
                &(node_count, rsets_req),
                |b, &(node_count, rsets_req)| {
                    b.iter_batched_ref(
                        || create_scheduler(node_count, 4),
                        |scheduler| {
                            while scheduler.assign_resources(rsets_req).unwrap().is_assigned() {}
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

fn bench_assign_release(c: &mut Criterion) {
    for node_count in [4, 64, 256] {
        c.bench_with_input(
            BenchmarkId::new("assign and release", node_count),
            &node_count,
            |b, &node_count| {
                b.iter_batched_ref(
                    || {
                        let mut scheduler = create_scheduler(node_count, 4);
                        // Fragment the free capacity so that placement has to search
                        let mut teams: Vec<Vec<RsetId>> = Vec::new();
                        while let Some(team) = scheduler.assign_resources(3).unwrap().into_team() {
                            teams.push(team);
                        }
                        for team in teams.iter().step_by(2) {
                            scheduler.release_resources(team).unwrap();
                        }
                        scheduler
                    },
                    |scheduler| {
                        if let Some(team) = scheduler.assign_resources(2).unwrap().into_team() {
                            scheduler.release_resources(&team).unwrap();
                        }
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

pub fn benchmark(c: &mut Criterion) {
    bench_assign(c);
    bench_assign_release(c);
}
