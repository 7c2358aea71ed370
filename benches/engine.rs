use criterion::{black_box, criterion_group, criterion_main, Criterion};
use redline_core::revision::{build_revision_passes, Section};
use redline_core::text;

fn synthetic_sections(count: usize) -> Vec<Section> {
    (0..count)
        .map(|i| {
            let text = format!(
                "Paragraph {i} opens with a claim that basically shows the trend. \
                 The data was gathered over several weeks. \"First quote here.\" \
                 \"Second quote right after.\" However, the the argument continues \
                 for a while (with an aside) and eventually lands. It should be \
                 noted that very long drafts exercise every pass at once.",
            );
            Section {
                title: format!("Body {}", i + 1),
                text,
                target_words: 120,
            }
        })
        .collect()
}

fn bench_revision_passes(c: &mut Criterion) {
    let sections = synthetic_sections(40);
    c.bench_function("revision_passes_40_sections", |b| {
        b.iter(|| {
            black_box(build_revision_passes(
                black_box(&sections),
                4_800,
                Some("Remote learning reshapes how students stay motivated"),
            ))
        });
    });
}

fn bench_tokenize_meaningful(c: &mut Criterion) {
    let text = synthetic_sections(1)[0].text.repeat(20);
    c.bench_function("tokenize_meaningful_long_text", |b| {
        b.iter(|| black_box(text::tokenize_meaningful(black_box(&text))));
    });
}

criterion_group!(engine, bench_revision_passes, bench_tokenize_meaningful);
criterion_main!(engine);
