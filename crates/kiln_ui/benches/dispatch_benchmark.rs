//! # Dispatch and Render Benchmark
//!
//! Measures one input pass and one render pass over a wide, shallow tree,
//! the shape of a typical grid screen.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kiln_ui::{
    navigation_channel, Color, Constraint, ConstraintFlags, Container, DisplaySettings, Element,
    EventContext, InputEvents, ParentFrame, RecordingBackend, RenderContext, Trash, Widget,
};

const ROWS: usize = 20;
const COLUMNS: usize = 20;

fn build_grid() -> Element {
    let mut column = Container::column().with_spacing(4.0);
    for _ in 0..ROWS {
        let mut row = Container::row().with_spacing(4.0);
        for _ in 0..COLUMNS {
            row.add(
                Element::new()
                    .with_size(48.0, 24.0)
                    .with_background(Color::SLATE)
                    .with_action(|| {}),
            );
        }
        column.add(row);
    }

    let mut root = Element::new().with_size(1280.0, 720.0);
    column
        .element_mut()
        .add_constraint(Constraint::new(ConstraintFlags::CENTER_BOTH));
    root.add(column);
    root
}

fn bench_render(c: &mut Criterion) {
    let mut root = build_grid();
    let mut backend = RecordingBackend::default();
    let settings = DisplaySettings::default();

    c.bench_function("render_grid_400", |b| {
        b.iter(|| {
            backend.clear();
            let mut ctx = RenderContext::new(&mut backend, &settings, 0);
            root.render(Some(&ParentFrame::ORIGIN), &mut ctx);
            black_box(backend.commands().len())
        });
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let mut root = build_grid();
    let mut backend = RecordingBackend::default();
    let settings = DisplaySettings::default();
    {
        let mut ctx = RenderContext::new(&mut backend, &settings, 0);
        root.render(Some(&ParentFrame::ORIGIN), &mut ctx);
    }
    let (navigator, _pending) = navigation_channel();
    let mut trash = Trash::new();
    let drag = InputEvents::touch_drag(640.0, 360.0);

    c.bench_function("dispatch_drag_grid_400", |b| {
        b.iter(|| {
            let mut ctx = EventContext::new(&drag, &settings, &navigator, &mut trash);
            black_box(root.process(&mut ctx))
        });
    });
}

criterion_group!(benches, bench_render, bench_dispatch);
criterion_main!(benches);
