//! Benchmarks for per-line classification and full-text highlighting.
//!
//! Run with: cargo bench -p codepanel-text --bench classify_bench

use std::hint::black_box;

use codepanel_text::{Classifier, SourceText, highlight_lines};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

const SAMPLE: &str = r#"class Developer:
    def __init__(self, name, title, location):
        self.name = name
        self.skills = []

    def add_skill(self, skill):
        self.skills.append(skill)  # keep order

    def print_about_me(self):
        print(f"Hi, I'm {self.name}")
        for skill in self.skills:
            print(f"  - {skill}")
"#;

fn bench_classify_line(c: &mut Criterion) {
    let classifier = Classifier::python();
    let mut group = c.benchmark_group("classify/line");

    for line in [
        "        self.skills.append(skill)  # keep order",
        r#"        print(f"Hi, I'm {self.name}")"#,
        "x = 1",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(line.len()), line, |b, line| {
            b.iter(|| black_box(classifier.classify_line(black_box(line))));
        });
    }

    group.finish();
}

fn bench_render_prefixes(c: &mut Criterion) {
    let classifier = Classifier::python();
    let source = SourceText::new(&SAMPLE.repeat(8));
    let mut group = c.benchmark_group("classify/prefix");

    for fraction in [4, 2, 1] {
        let revealed = source.len() / fraction;
        group.bench_with_input(
            BenchmarkId::from_parameter(revealed),
            &revealed,
            |b, &revealed| {
                b.iter(|| {
                    let lines = highlight_lines(&classifier, source.prefix(revealed));
                    black_box(lines.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_classify_line, bench_render_prefixes);
criterion_main!(benches);
