//! Keyboard shortcuts acting on the selection.

use crate::helpers::{TestSessionBuilder, assert_item_count, item, press, release};
use pinboard::input::{InputEvent, InputOutcome, Key, Modifiers};
use pinboard::session::{PendingAction, Session};

fn key(session: &mut Session, key: Key) -> InputOutcome {
    session.dispatch(InputEvent::KeyDown {
        key,
        modifiers: Modifiers::none(),
    })
}

fn command(session: &mut Session, c: char) -> InputOutcome {
    session.dispatch(InputEvent::KeyDown {
        key: Key::Char(c),
        modifiers: Modifiers::command(),
    })
}

#[test]
fn test_shortcuts_need_a_selection() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .build();

    assert_eq!(key(&mut session, Key::Char('l')), InputOutcome::Ignored);
    assert_eq!(key(&mut session, Key::Delete), InputOutcome::Ignored);
    assert_eq!(command(&mut session, 'c'), InputOutcome::Ignored);
    assert_eq!(command(&mut session, 'v'), InputOutcome::PasteRequested);
}

#[test]
fn test_toggles_and_bring_to_front() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .with_item("/b.png", (300.0, 300.0), (100.0, 100.0))
        .build();
    press(&mut session, 100.0, 100.0);
    release(&mut session, 100.0, 100.0);

    key(&mut session, Key::Char('l'));
    key(&mut session, Key::Char('h'));
    key(&mut session, Key::Char('v'));
    let a = item(&session, &ids[0]);
    assert!(a.locked && a.flip_h && a.flip_v);

    let b_z = item(&session, &ids[1]).z;
    assert!(item(&session, &ids[0]).z > b_z);

    assert_eq!(command(&mut session, 'c'), InputOutcome::CopyRequested);
}

#[test]
fn test_delete_waits_for_confirmation() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .build();
    press(&mut session, 100.0, 100.0);
    release(&mut session, 100.0, 100.0);

    assert_eq!(key(&mut session, Key::Delete), InputOutcome::NeedsConfirmation);
    assert!(matches!(
        session.pending_action(),
        Some(PendingAction::DeleteItem { item_id, .. }) if item_id == &ids[0]
    ));
    assert_item_count(&session, 1);

    key(&mut session, Key::Escape);
    assert!(session.pending_action().is_none());
    assert_item_count(&session, 1);

    assert_eq!(key(&mut session, Key::Backspace), InputOutcome::NeedsConfirmation);
    assert!(session.confirm_pending().unwrap());
    assert_item_count(&session, 0);
    assert!(session.selected().is_none());
    assert!(session.scene().is_empty());
}
