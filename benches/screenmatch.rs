use criterion::{criterion_group, criterion_main, Criterion};
use screenmatch::{
    format_fingerprint, AverageHasher, Checkpoint, Crop, DifferenceHasher, ImageView, Matcher,
    RegionHasher, Template,
};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn bench_hashing(c: &mut Criterion) {
    let width = 1920;
    let height = 1080;
    let image = make_image(width, height);
    let view = ImageView::from_slice(&image, width, height).unwrap();

    c.bench_function("dhash_1080p", |b| {
        b.iter(|| black_box(DifferenceHasher.hash(view).unwrap()));
    });
    c.bench_function("ahash_1080p", |b| {
        b.iter(|| black_box(AverageHasher.hash(view).unwrap()));
    });
}

fn bench_matcher(c: &mut Criterion) {
    let width = 1920;
    let height = 1080;
    let image = make_image(width, height);
    let view = ImageView::from_slice(&image, width, height).unwrap();
    let matcher = Matcher::new();

    let whole_bits = DifferenceHasher.hash(view).unwrap().bits();
    let whole = Template {
        fingerprint: format_fingerprint(whole_bits),
        threshold: 4,
        ..Template::default()
    };

    let crops = [
        Crop::new(40, 30, 220, 60),
        Crop::new(1500, 40, 300, 90),
        Crop::new(800, 900, 320, 120),
    ];
    let checkpoints = crops
        .iter()
        .map(|crop| {
            let region = crop.apply(view).unwrap();
            let bits = DifferenceHasher.hash(region).unwrap().bits();
            Checkpoint::new(*crop, format_fingerprint(bits))
        })
        .collect();
    let anchored = Template {
        checkpoints,
        ..Template::default()
    };

    c.bench_function("match_whole_image", |b| {
        b.iter(|| black_box(matcher.matches(view, &whole)));
    });
    c.bench_function("match_three_checkpoints", |b| {
        b.iter(|| black_box(matcher.matches(view, &anchored)));
    });

    let library: Vec<Template> = (0..64)
        .map(|idx| Template {
            fingerprint: format_fingerprint(whole_bits.rotate_left(idx + 1)),
            ..Template::default()
        })
        .chain(std::iter::once(anchored.clone()))
        .collect();
    c.bench_function("find_first_65_templates", |b| {
        b.iter(|| black_box(matcher.find_first(view, &library)));
    });
}

criterion_group!(benches, bench_hashing, bench_matcher);
criterion_main!(benches);
