//! Benchmarks for mdpreso parsing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks parse synthetic decks mixing every block type.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic deck with the given number of slides.
fn create_test_deck(slide_count: usize) -> String {
    let mut content = String::from("---\nfrontmatter: True\ntitle: Benchmark\nrefresh: 60\n---\n");

    for i in 0..slide_count {
        if i > 0 {
            content.push_str("---\n");
        }
        content.push_str(&format!("# Slide {}\n", i + 1));
        content.push_str("Some **bold**, _emphasis_ and ==highlight==");
        content.push_str(" with a [link](https://example.com).\n");
        content.push_str("- first\n  - nested\n    - deeper\n- second\n");
        content.push_str("| Name | Value |\n|:-----|------:|\n| a | 1 |\n| b | 2 |\n");
        content.push_str("```rust\nfn main() { println!(\"<slide>\"); }\n```\n");
        if i % 3 == 0 {
            content.push_str("```mermaid\ngraph TD; A-->B;\n```\n");
        }
        content.push_str("<text{top: 10%; left: 5%}>\n## Positioned\n- inside\n</text>\n");
        content.push_str(&format!("![img](img/{}.png)\n", i));
        content.push_str("<!-- speaker notes for this slide -->\n");
    }

    content
}

/// Benchmark deck parsing at various sizes.
fn bench_deck_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck_parsing");

    for slide_count in [1, 10, 50].iter() {
        let source = create_test_deck(*slide_count);

        group.bench_function(format!("{}_slides", slide_count), |b| {
            b.iter(|| mdpreso::parse_str(black_box(&source)).unwrap());
        });

        group.bench_function(format!("{}_slides_sequential", slide_count), |b| {
            b.iter(|| {
                let options = mdpreso::ParseOptions::new().sequential();
                mdpreso::parse_str_with_options(black_box(&source), options).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark inline formatting of a single line.
fn bench_inline_formatting(c: &mut Criterion) {
    let line = "Mix **strong** and *em* and __strong__ and _em_ and ==mark== in one line";

    c.bench_function("format_inline", |b| {
        b.iter(|| mdpreso::parser::format_inline(black_box(line)));
    });
}

/// Benchmark HTML rendering of a parsed deck.
fn bench_html_rendering(c: &mut Criterion) {
    let deck = mdpreso::parse_str(&create_test_deck(20)).unwrap();
    let options = mdpreso::RenderOptions::default();

    c.bench_function("render_html_20_slides", |b| {
        b.iter(|| mdpreso::render::to_html(black_box(&deck), &options).unwrap());
    });
}

criterion_group!(
    benches,
    bench_deck_parsing,
    bench_inline_formatting,
    bench_html_rendering,
);
criterion_main!(benches);
