//! Property-based tests for the editor session using proptest
//!
//! Random sequences of edits, history moves, reloads and ticks must keep
//! the model and the live simulation in agreement after every step:
//! - one live body per object, one live spring per link
//! - valid link endpoints and back-references
//! - counters ahead of every issued id
//! - selection holds only live ids

use physbox_editor_lib::harness::TestHarness;
use physbox_editor_lib::session::PhysicsPatch;
use proptest::prelude::*;
use shared::{BodyType, Point2D, Shape};

/// One editor action; indices pick among the objects present at that time
#[derive(Debug, Clone)]
enum Op {
    Add(Point2D, Shape, BodyType),
    Select(usize),
    SetShape(Shape),
    SetDensity(f64),
    SetLocked(bool),
    Duplicate,
    Link(usize, usize),
    Delete(usize),
    Undo,
    Redo,
    Reload,
    Step(usize),
    Reset,
}

fn shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        (5.0..60.0f64).prop_map(|radius| Shape::Circle { radius }),
        (5.0..120.0f64, 5.0..120.0f64)
            .prop_map(|(width, height)| Shape::Rectangle { width, height }),
        (3u32..10, 5.0..60.0f64).prop_map(|(sides, radius)| Shape::Polygon { sides, radius }),
    ]
}

fn body_type() -> impl Strategy<Value = BodyType> {
    prop_oneof![
        Just(BodyType::Dynamic),
        Just(BodyType::Static),
        Just(BodyType::Sensor),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => ((-400.0..400.0f64), (-400.0..400.0f64), shape(), body_type())
            .prop_map(|(x, y, s, b)| Op::Add(Point2D::new(x, y), s, b)),
        2 => any::<usize>().prop_map(Op::Select),
        1 => shape().prop_map(Op::SetShape),
        1 => (0.0005..0.01f64).prop_map(Op::SetDensity),
        1 => any::<bool>().prop_map(Op::SetLocked),
        1 => Just(Op::Duplicate),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Link(a, b)),
        2 => any::<usize>().prop_map(Op::Delete),
        2 => Just(Op::Undo),
        1 => Just(Op::Redo),
        1 => Just(Op::Reload),
        1 => (1usize..5).prop_map(Op::Step),
        1 => Just(Op::Reset),
    ]
}

fn pick(h: &TestHarness, i: usize) -> Option<String> {
    let objects = h.session.scene().objects();
    if objects.is_empty() {
        None
    } else {
        Some(objects[i % objects.len()].id.clone())
    }
}

fn apply(h: &mut TestHarness, op: &Op) {
    match op {
        Op::Add(position, shape, body_type) => {
            let _ = h.session.add_object(*position, shape.clone(), *body_type);
        }
        Op::Select(i) => {
            if let Some(id) = pick(h, *i) {
                h.select(&id);
            }
        }
        Op::SetShape(shape) => {
            h.session.set_shape(shape.clone());
        }
        Op::SetDensity(density) => {
            h.session.set_physics(PhysicsPatch {
                density: Some(*density),
                ..Default::default()
            });
        }
        Op::SetLocked(locked) => {
            h.session.set_locked(*locked);
        }
        Op::Duplicate => {
            let _ = h.session.duplicate_selected();
        }
        Op::Link(a, b) => {
            if let (Some(a), Some(b)) = (pick(h, *a), pick(h, *b)) {
                h.link(&a, &b);
            }
        }
        Op::Delete(i) => {
            if let Some(id) = pick(h, *i) {
                h.delete(&id);
            }
        }
        Op::Undo => {
            h.undo();
        }
        Op::Redo => {
            h.redo();
        }
        Op::Reload => {
            let json = h.export_scene_json().unwrap();
            h.load_scene_json(&json).unwrap();
        }
        Op::Step(n) => h.step(*n),
        Op::Reset => h.reset(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Live handles track the model through any sequence of actions
    #[test]
    fn test_session_stays_consistent(ops in prop::collection::vec(op(), 1..40)) {
        let mut h = TestHarness::new();
        for op in &ops {
            apply(&mut h, op);
            let problems = h.validate();
            prop_assert!(problems.is_empty(), "after {:?}: {:?}", op, problems);
        }
    }

    /// Undoing every action returns to the empty scene, redoing every action
    /// returns to the newest history entry
    #[test]
    fn test_full_undo_redo_walk(ops in prop::collection::vec(op(), 1..25)) {
        let mut h = TestHarness::new();
        for op in &ops {
            apply(&mut h, op);
        }
        while h.redo() {}
        let last = h.session.history().current().cloned().unwrap();

        while h.undo() {}
        prop_assert_eq!(h.object_count(), 0);
        prop_assert_eq!(h.body_count(), 0);
        prop_assert!(h.validate().is_empty());

        while h.redo() {}
        prop_assert_eq!(&h.session.snapshot().objects, &last.objects);
        prop_assert_eq!(&h.session.snapshot().links, &last.links);
        prop_assert!(h.validate().is_empty());
    }
}
