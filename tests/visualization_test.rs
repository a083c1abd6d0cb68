// Integration tests for classification, preview decoding, layout,
// rendering, and the entrance animation scheduler

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use ratatui::style::Color;

use tracetty::playback::Controller;
use tracetty::render::anim::{EntranceAnimator, ENTRANCE_DURATION, STAGGER_DELAY};
use tracetty::render::surface::blend;
use tracetty::render::{draw, Surface, EMPTY_STATE_MESSAGE};
use tracetty::structure::layout::{lay_out, Shape};
use tracetty::structure::{decode, StructureData, StructureKind};
use tracetty::trace::resolve::resolve_references;
use tracetty::trace::{Step, TraceResponse};
use tracetty::ui::theme::DEFAULT_THEME;

fn step(json: &str) -> Step {
    serde_json::from_str(json).expect("step fixture")
}

// === WIRE FORMAT ===

#[test]
fn tracer_response_defaults_missing_fields() {
    let response: TraceResponse =
        serde_json::from_str(r#"{"trace": [], "stdout": "", "stderr": ""}"#)
            .expect("minimal response");
    assert!(response.trace.is_empty());
    assert!(response.code_lines.is_empty());
    assert!(!response.trace_truncated);
}

#[test]
fn locals_preserve_declaration_order() {
    let step = step(
        r#"{"line": 1, "locals": {
            "zebra": {"type": "int", "value": "1"},
            "apple": {"type": "int", "value": "2"},
            "mango": {"type": "int", "value": "3"}
        }}"#,
    );
    let names: Vec<&str> = step.locals.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["zebra", "apple", "mango"]);
}

// === CLASSIFICATION & DECODING ===

#[test]
fn type_tags_classify_to_structure_kinds() {
    assert_eq!(StructureKind::classify("list"), StructureKind::Sequence);
    assert_eq!(StructureKind::classify("tuple"), StructureKind::Sequence);
    assert_eq!(StructureKind::classify("dict"), StructureKind::Mapping);
    assert_eq!(StructureKind::classify("set"), StructureKind::Set);
    assert_eq!(StructureKind::classify("frozenset"), StructureKind::Set);
    assert_eq!(StructureKind::classify("str"), StructureKind::Generic);
    assert_eq!(StructureKind::classify("Node"), StructureKind::Generic);
}

#[test]
fn sequence_preview_round_trip() {
    assert_eq!(
        decode(StructureKind::Sequence, "[1, 2, 3]"),
        StructureData::Sequence(vec!["1".into(), "2".into(), "3".into()])
    );
}

#[test]
fn mapping_preview_round_trip_keeps_pair_order() {
    assert_eq!(
        decode(StructureKind::Mapping, "{'a': 1, 'b': 2}"),
        StructureData::Mapping(vec![
            ("a".into(), "1".into()),
            ("b".into(), "2".into()),
        ])
    );
}

#[test]
fn malformed_sequence_preview_becomes_one_opaque_token() {
    assert_eq!(
        decode(StructureKind::Sequence, "[1, 2"),
        StructureData::Sequence(vec!["[1, 2".into()])
    );
}

#[test]
fn set_preview_and_empty_set_repr() {
    assert_eq!(
        decode(StructureKind::Set, "{1, 2}"),
        StructureData::Set(vec!["1".into(), "2".into()])
    );
    assert_eq!(decode(StructureKind::Set, "set()"), StructureData::Set(vec![]));
}

#[test]
fn generic_preview_is_never_decomposed() {
    assert_eq!(
        decode(StructureKind::Generic, "<Node object at 0x7f>"),
        StructureData::Generic("<Node object at 0x7f>".into())
    );
}

// === REFERENCE RESOLUTION ===

#[test]
fn resolver_skips_value_locals_and_dangling_ids() {
    let step = step(
        r#"{"line": 1,
            "locals": {
                "n": {"type": "int", "value": "3"},
                "gone": {"type": "list", "id": "h404"},
                "xs": {"type": "list", "id": "h1"}
            },
            "heap": {
                "h1": {"type": "list", "preview": "[1, 2]", "size": 2}
            }}"#,
    );
    let resolved = resolve_references(&step);
    assert_eq!(resolved.len(), 1, "value local and dangling id are skipped");
    assert_eq!(resolved[0].0, "xs");
    assert_eq!(resolved[0].1.preview, "[1, 2]");
}

// === THE FULL SCENARIO ===

/// A trace whose middle step binds `arr` to a three-element list must
/// render one sequence named `arr` with cells 5, 3, 1 in order, each cell's
/// entrance delayed relative to the previous one.
#[test]
fn sequence_scenario_renders_three_staggered_cells() {
    let trace = vec![
        step(r#"{"line": 1}"#),
        step(
            r#"{"line": 2,
                "locals": {"arr": {"type": "list", "id": "h1"}},
                "heap": {"h1": {"type": "list", "preview": "[5, 3, 1]", "size": 3}}}"#,
        ),
        step(r#"{"line": 3}"#),
    ];
    let mut controller = Controller::new(Duration::from_millis(100));
    controller.install(trace);

    let view = controller.show_step(1).expect("in range");
    assert_eq!(view.structures.len(), 1);
    assert_eq!(view.structures[0].name, "arr");
    assert_eq!(view.structures[0].kind, StructureKind::Sequence);
    assert_eq!(
        view.structures[0].data,
        StructureData::Sequence(vec!["5".into(), "3".into(), "1".into()])
    );

    let layouts = lay_out(&view.structures);
    assert_eq!(layouts.len(), 1);
    let cells = &layouts[0].elements;
    assert_eq!(cells.len(), 3);
    let labels: Vec<&str> = cells.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["5", "3", "1"]);

    // Cells are laid out left to right.
    let xs: Vec<f64> = cells
        .iter()
        .map(|c| match c.shape {
            Shape::Rect { x, .. } => x,
            _ => panic!("sequence cells are rectangles"),
        })
        .collect();
    assert!(xs[0] < xs[1] && xs[1] < xs[2]);

    // Later cells materialize later.
    let mut animator = EntranceAnimator::new();
    let t0 = Instant::now();
    animator.begin(&layouts, t0);
    assert!(animator.tick(t0 + Duration::from_millis(60)));
    let o0 = animator.opacity((0, 0));
    let o1 = animator.opacity((0, 1));
    let o2 = animator.opacity((0, 2));
    assert!(o0 > o1, "second cell is delayed relative to the first");
    assert!(o1 > o2, "third cell is delayed relative to the second");

    // All transitions finish, then the scheduler goes idle.
    let settle = ENTRANCE_DURATION + STAGGER_DELAY * 2 + Duration::from_millis(10);
    assert!(!animator.tick(t0 + settle));
    assert!(animator.is_idle());
    assert_eq!(animator.opacity((0, 0)), 1.0);
    assert_eq!(animator.opacity((0, 2)), 1.0);
}

#[test]
fn a_new_render_supersedes_inflight_transitions() {
    let structures = vec![tracetty::structure::classify_object(
        "xs",
        &serde_json::from_str(r#"{"type": "list", "preview": "[1, 2]"}"#)
            .expect("heap object fixture"),
    )];
    let layouts = lay_out(&structures);

    let mut animator = EntranceAnimator::new();
    let t0 = Instant::now();
    animator.begin(&layouts, t0);
    animator.tick(t0 + Duration::from_millis(200));
    assert!(animator.opacity((0, 0)) > 0.0);

    // Restarting from a later step resets every opacity to zero.
    let t1 = t0 + Duration::from_millis(300);
    animator.begin(&layouts, t1);
    assert_eq!(animator.opacity((0, 0)), 0.0);
    assert!(animator.tick(t1 + Duration::from_millis(1)));
}

// === RENDERING ===

#[derive(Debug, PartialEq)]
enum DrawCall {
    Clear,
    Rect,
    Circle,
    Line,
    Text(String),
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }
    fn rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64, _color: Color) {
        self.calls.push(DrawCall::Rect);
    }
    fn circle(&mut self, _x: f64, _y: f64, _r: f64, _color: Color) {
        self.calls.push(DrawCall::Circle);
    }
    fn line(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64, _color: Color) {
        self.calls.push(DrawCall::Line);
    }
    fn text(&mut self, _x: f64, _y: f64, content: &str, _color: Color) {
        self.calls.push(DrawCall::Text(content.to_owned()));
    }
}

#[test]
fn empty_structures_render_only_the_empty_state() {
    let mut surface = RecordingSurface::default();
    let animator = EntranceAnimator::new();
    draw(&mut surface, &[], &animator, &DEFAULT_THEME);
    assert_eq!(
        surface.calls,
        vec![DrawCall::Clear, DrawCall::Text(EMPTY_STATE_MESSAGE.to_owned())]
    );
}

#[test]
fn sequences_draw_cells_labels_and_brackets() {
    let structures = vec![tracetty::structure::classify_object(
        "xs",
        &serde_json::from_str(r#"{"type": "list", "preview": "[7, 8]"}"#)
            .expect("heap object fixture"),
    )];
    let layouts = lay_out(&structures);

    let mut surface = RecordingSurface::default();
    let animator = EntranceAnimator::new();
    draw(&mut surface, &layouts, &animator, &DEFAULT_THEME);

    let rects = surface.calls.iter().filter(|c| **c == DrawCall::Rect).count();
    let lines = surface.calls.iter().filter(|c| **c == DrawCall::Line).count();
    assert_eq!(rects, 2, "one cell per element");
    assert_eq!(lines, 6, "three strokes per bracket");
    assert!(surface.calls.contains(&DrawCall::Text("xs:".to_owned())));
    assert!(surface.calls.contains(&DrawCall::Text("7".to_owned())));
    assert!(surface.calls.contains(&DrawCall::Text("8".to_owned())));
}

#[test]
fn blend_interpolates_rgb_channels() {
    let fg = Color::Rgb(200, 100, 0);
    let bg = Color::Rgb(0, 0, 0);
    assert_eq!(blend(fg, bg, 0.0), bg);
    assert_eq!(blend(fg, bg, 1.0), fg);
    assert_eq!(blend(fg, bg, 0.5), Color::Rgb(100, 50, 0));
}
