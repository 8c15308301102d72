use contours::{BruteForceContourExtractor, ContourExtractor, ContourTracer, IncrementalContourExtractor};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use morphotree::{Adjacency, Connectivity, Domain, build_max_tree};

/// Overlapping ramps and blobs so the tree has both deep chains and wide nodes.
fn synthetic_image(width: u32, height: u32) -> (Domain, Vec<u8>) {
    let domain = Domain::from_size(width, height);
    let f = domain
        .points()
        .map(|p| {
            let ramp = (p.x + p.y) as u32 % 64;
            let blob = if (p.x / 12 + p.y / 12) % 2 == 0 { 96 } else { 0 };
            let dx = p.x - width as i32 / 2;
            let dy = p.y - height as i32 / 2;
            let disk = if dx * dx + dy * dy < (width as i32 / 3).pow(2) { 64 } else { 0 };
            (ramp + blob + disk).min(255) as u8
        })
        .collect();
    (domain, f)
}

fn bench_extract(c: &mut Criterion) {
    let (domain, f) = synthetic_image(128, 128);
    let tree = build_max_tree(&f, &Adjacency::closed(domain, Connectivity::Eight)).expect("valid image");
    let adj = Adjacency::infinite(domain, Connectivity::Four);

    let mut group = c.benchmark_group("contours_128x128");
    group.sample_size(20);

    group.bench_function("incremental", |b| {
        b.iter(|| {
            let contours = IncrementalContourExtractor
                .extract_contours(black_box(&f), &adj, &tree)
                .expect("extraction");
            black_box(contours.len());
        });
    });

    group.bench_function("brute_force", |b| {
        b.iter(|| {
            let contours = BruteForceContourExtractor::default()
                .extract_contours(black_box(&f), &adj, &tree)
                .expect("extraction");
            black_box(contours.len());
        });
    });

    group.bench_function("trace", |b| {
        b.iter(|| {
            let mut tracer = ContourTracer::new(domain, black_box(&f)).expect("tracer");
            black_box(tracer.trace_tree(&tree).len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
