//! Integration tests for TestHarness.
//!
//! Drives whole editing sessions and checks model/simulation consistency
//! after every step.

use physbox_editor_lib::harness::TestHarness;
use shared::{PhysicsPreset, Point2D, Shape};

#[test]
fn test_harness_undo_redo_cycle() {
    let mut h = TestHarness::new();
    h.create_circle(0.0, 0.0, 10.0);
    h.create_rect(100.0, 0.0, 20.0, 20.0);
    assert_eq!(h.object_count(), 2);

    assert!(h.undo());
    assert_eq!(h.object_count(), 1);
    h.assert_consistent();

    assert!(h.undo());
    assert_eq!(h.object_count(), 0);
    assert_eq!(h.body_count(), 0);

    assert!(!h.undo()); // nothing to undo

    assert!(h.redo());
    assert!(h.redo());
    assert_eq!(h.object_count(), 2);
    assert!(!h.redo());
    h.assert_consistent();
}

#[test]
fn test_harness_shape_swap_scenario() {
    let mut h = TestHarness::new();
    let id = h.create_circle(100.0, 100.0, 20.0);
    let old = h.session.sync().handle(&id).unwrap();

    assert!(h.session.set_shape(Shape::Rectangle {
        width: 40.0,
        height: 30.0,
    }));
    assert_eq!(h.position(&id), Some(Point2D::new(100.0, 100.0)));
    assert_ne!(h.session.sync().handle(&id).unwrap(), old);
    h.assert_consistent();

    assert!(h.undo());
    let object = h.session.scene().object(&id).unwrap();
    assert_eq!(object.shape, Shape::Circle { radius: 20.0 });
    assert_eq!(object.position, Point2D::new(100.0, 100.0));
    h.assert_consistent();
}

#[test]
fn test_harness_delete_linked_endpoint() {
    let mut h = TestHarness::new();
    let a = h.create_circle(0.0, 0.0, 10.0);
    let b = h.create_circle(100.0, 0.0, 10.0);
    h.link(&a, &b).unwrap();
    let b_handle = h.session.sync().handle(&b);

    assert!(h.delete(&a));

    assert_eq!(h.link_count(), 0);
    assert_eq!(h.spring_count(), 0);
    assert_eq!(h.session.sync().handle(&b), b_handle);
    h.assert_consistent();

    // undo brings both the object and its link back
    assert!(h.undo());
    assert_eq!(h.link_count(), 1);
    assert_eq!(h.spring_count(), 1);
    h.assert_consistent();
}

#[test]
fn test_harness_rebuild_while_moving() {
    let mut h = TestHarness::new();
    let a = h.create_circle(0.0, 0.0, 10.0);
    let b = h.create_circle(80.0, 0.0, 10.0);
    h.link(&a, &b).unwrap();
    h.step(10);

    let before = h.session.sync().kinematics(&a).unwrap();
    h.select(&a);
    assert!(h.session.apply_preset(PhysicsPreset::Heavy));
    assert!(h.session.set_shape(Shape::Polygon { sides: 5, radius: 10.0 }));
    let after = h.session.sync().kinematics(&a).unwrap();

    assert_eq!(before, after);
    assert_eq!(h.spring_count(), 1);
    h.assert_consistent();
}

#[test]
fn test_harness_ids_never_reused_across_undo() {
    let mut h = TestHarness::new();
    let a = h.create_circle(0.0, 0.0, 10.0);
    let b = h.create_circle(50.0, 0.0, 10.0);
    h.undo();
    let c = h.create_circle(90.0, 0.0, 10.0);
    assert_ne!(c, b);
    assert_ne!(c, a);
}

#[test]
fn test_harness_step_moves_dynamic_only() {
    let mut h = TestHarness::new();
    let ball = h.create_circle(0.0, 0.0, 10.0);
    let ground = h.create_ground(0.0, 400.0, 800.0);
    h.step(30);
    assert!(h.position(&ball).unwrap().y > 0.0);
    assert_eq!(h.position(&ground), Some(Point2D::new(0.0, 400.0)));
}

#[test]
fn test_harness_reset_then_undo() {
    let mut h = TestHarness::new();
    let a = h.create_circle(0.0, 0.0, 10.0);
    let b = h.create_circle(50.0, 0.0, 10.0);
    h.link(&a, &b);
    h.reset();
    assert_eq!(h.object_count(), 0);
    assert_eq!(h.body_count(), 0);
    assert_eq!(h.session.scene().next_id(), 1);

    assert!(h.undo());
    assert_eq!(h.object_count(), 2);
    assert_eq!(h.spring_count(), 1);
    h.assert_consistent();
}
