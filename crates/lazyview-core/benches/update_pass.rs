use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lazyview_core::{LazyLoadSettings, LazyLoader, Notification};
use lazyview_geometry::Rect;
use lazyview_testing::{FakeDocument, FakeHost};

const CANDIDATE_SAMPLES: &[usize] = &[1_000, 10_000];
const ROW_HEIGHT: f32 = 200.0;

/// Candidates stacked below the first screen, so no pass ever removes one.
fn pending_fixture(count: usize, failure_limit: usize) -> LazyLoader<FakeHost> {
    let doc = FakeDocument::desktop();
    let mut loader = LazyLoader::new(
        FakeHost::new(&doc),
        LazyLoadSettings::new().with_failure_limit(failure_limit),
    );
    for i in 0..count {
        let id = doc.add_image(
            Rect::new(0.0, 1_000.0 + i as f32 * ROW_HEIGHT, 300.0, ROW_HEIGHT),
            "pending.jpg",
        );
        loader.register(id).expect("register");
    }
    loader
}

fn bench_early_stop(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_pass_early_stop");
    for &count in CANDIDATE_SAMPLES {
        group.bench_with_input(BenchmarkId::new("candidates", count), &count, |b, &count| {
            let mut loader = pending_fixture(count, 0);
            b.iter(|| black_box(loader.notify(Notification::Scroll)));
        });
    }
    group.finish();
}

fn bench_full_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_pass_full_scan");
    for &count in CANDIDATE_SAMPLES {
        group.bench_with_input(BenchmarkId::new("candidates", count), &count, |b, &count| {
            let mut loader = pending_fixture(count, usize::MAX);
            b.iter(|| black_box(loader.notify(Notification::Scroll)));
        });
    }
    group.finish();
}

criterion_group!(update_pass, bench_early_stop, bench_full_scan);
criterion_main!(update_pass);
