//! Undo/redo across gestures and commands.

use crate::helpers::{
    MemoryResources, TestSessionBuilder, drag, item_center, move_to, press, release,
};
use pinboard::input::coords::ScreenPoint;
use pinboard::input::{HitTarget, InputEvent, InputOutcome, Key, Modifiers};
use pinboard::session::Session;

fn undo_key(session: &mut Session) -> InputOutcome {
    session.dispatch(InputEvent::KeyDown {
        key: Key::Char('z'),
        modifiers: Modifiers::command(),
    })
}

fn redo_key(session: &mut Session) -> InputOutcome {
    session.dispatch(InputEvent::KeyDown {
        key: Key::Char('z'),
        modifiers: Modifiers {
            command: true,
            shift: true,
            alt: false,
        },
    })
}

#[test]
fn test_undo_redo_drag() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .build();

    drag(&mut session, (100.0, 100.0), (150.0, 100.0));
    assert_eq!(item_center(&session, &ids[0]), (150.0, 100.0));

    assert_eq!(undo_key(&mut session), InputOutcome::Handled);
    assert_eq!(item_center(&session, &ids[0]), (100.0, 100.0));
    // the scene follows the restored document
    assert_eq!(
        session.hit_test(ScreenPoint::new(60.0, 100.0)),
        HitTarget::Item(ids[0].clone())
    );

    assert_eq!(redo_key(&mut session), InputOutcome::Handled);
    assert_eq!(item_center(&session, &ids[0]), (150.0, 100.0));
    assert_eq!(redo_key(&mut session), InputOutcome::Ignored);
}

#[test]
fn test_new_edit_discards_redo() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .build();

    drag(&mut session, (100.0, 100.0), (150.0, 100.0));
    session.undo();
    assert!(session.can_redo());

    drag(&mut session, (100.0, 100.0), (100.0, 150.0));
    assert!(!session.can_redo());
}

#[test]
fn test_undo_waits_for_gesture_to_end() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .build();
    drag(&mut session, (100.0, 100.0), (150.0, 100.0));

    press(&mut session, 150.0, 100.0);
    move_to(&mut session, 200.0, 100.0);
    assert_eq!(undo_key(&mut session), InputOutcome::Ignored);
    release(&mut session, 200.0, 100.0);

    assert_eq!(item_center(&session, &ids[0]), (200.0, 100.0));
    assert_eq!(undo_key(&mut session), InputOutcome::Handled);
    assert_eq!(item_center(&session, &ids[0]), (150.0, 100.0));
}

#[test]
fn test_undo_keeps_live_camera() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .build();
    drag(&mut session, (100.0, 100.0), (150.0, 100.0));
    session.reset_view();
    let camera = session.camera();

    session.undo();

    assert_eq!(session.camera(), camera);
    assert_eq!(session.document().active_tab().camera, camera);
}

#[test]
fn test_history_is_bounded() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .build();
    press(&mut session, 100.0, 100.0);
    release(&mut session, 100.0, 100.0);

    for _ in 0..60 {
        session.toggle_flip_h();
    }

    let mut undos = 0;
    while session.undo() {
        undos += 1;
    }
    assert_eq!(undos, 49);
}

#[test]
fn test_undo_drops_selection_of_removed_item() {
    let (mut session, _) = TestSessionBuilder::new().build();
    let probe = MemoryResources::new();

    let id = session.add_image("/new.png", &probe);
    assert_eq!(session.selected(), Some(&id));

    session.undo();
    assert!(session.selected().is_none());
    assert!(session.document().active_tab().items.is_empty());
}
