//! Tabs: per-tab cameras, switching, duplication and clearing.

use crate::helpers::{
    MemoryResources, TestSessionBuilder, assert_item_count, move_to, press, release,
};
use pinboard::input::coords::ScreenPoint;
use pinboard::input::{InputEvent, Key, Modifiers, PointerButton, PointerEvent};
use pinboard::session::{ChangeReason, PendingAction};
use pinboard::types::Camera;

#[test]
fn test_each_tab_keeps_its_camera() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_camera(10.0, 20.0, 1.5)
        .build();
    let first = session.document().active_tab_id.clone();

    let second = session.new_tab();
    assert_eq!(session.document().active_tab_id, second);
    assert_eq!(session.camera(), Camera::new(200.0, 120.0, 1.0));

    session.dispatch(InputEvent::KeyDown {
        key: Key::Space,
        modifiers: Modifiers::none(),
    });
    press(&mut session, 0.0, 0.0);
    move_to(&mut session, 50.0, 0.0);
    release(&mut session, 50.0, 0.0);
    let panned = session.camera();

    session.switch_tab(&first).unwrap();
    assert_eq!(session.camera(), Camera::new(10.0, 20.0, 1.5));

    session.switch_tab(&second).unwrap();
    assert_eq!(session.camera(), panned);
}

#[test]
fn test_switch_clears_selection_and_rebuilds_scene() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .build();
    let first = session.document().active_tab_id.clone();
    press(&mut session, 100.0, 100.0);
    release(&mut session, 100.0, 100.0);

    session.new_tab();
    assert!(session.selected().is_none());
    assert!(session.scene().is_empty());

    session.switch_tab(&first).unwrap();
    assert!(session.scene().placement(&ids[0]).is_some());
    session.take_changes();

    session.switch_tab(&first).unwrap();
    let changes = session.take_changes();
    assert_eq!(changes[0].reason, ChangeReason::TabSwitched);
    assert!(changes[0].autosave_only);
}

#[test]
fn test_duplicate_copies_items_with_fresh_ids() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .with_item("/b.png", (300.0, 100.0), (100.0, 100.0))
        .build();
    let source_name = session.document().active_tab().name.clone();

    let copy = session.duplicate_active_tab().unwrap();

    let tab = session.document().active_tab();
    assert_eq!(tab.id, copy);
    assert_eq!(tab.name, format!("{source_name} (copy)"));
    assert_eq!(tab.items.len(), 2);
    assert!(tab.items.iter().all(|item| !ids.contains(&item.id)));
    assert_eq!(tab.items[1].path, std::path::PathBuf::from("/b.png"));
}

#[test]
fn test_clear_tab_after_confirmation() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
        .with_item("/b.png", (300.0, 100.0), (100.0, 100.0))
        .build();
    let tab = session.document().active_tab_id.clone();

    assert_eq!(
        session.request_clear_tab().cloned(),
        Some(PendingAction::ClearTab(tab))
    );
    assert_item_count(&session, 2);

    assert!(session.confirm_pending().unwrap());
    assert_item_count(&session, 0);
    assert!(session.scene().is_empty());
}

#[test]
fn test_added_images_land_at_view_center() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_camera(100.0, 0.0, 2.0)
        .build();
    let probe = MemoryResources::new()
        .with_file("/wide.png", 2048, Some((2000, 500)))
        .with_file("/tiny.png", 10, Some((20, 20)));

    let ids = session.add_images(
        &["/wide.png".into(), "/tiny.png".into(), "/gone.png".into()],
        &probe,
    );

    let tab = session.document().active_tab();
    assert_eq!(ids.len(), 3);
    for item in &tab.items {
        // canvas center (500, 400) -> world ((500 - 100) / 2, 400 / 2)
        assert_eq!((item.x, item.y), (200.0, 200.0));
    }
    assert_eq!(tab.items[0].w, 520.0);
    assert_eq!((tab.items[1].w, tab.items[1].h), (140.0, 120.0));
    assert_eq!((tab.items[2].w, tab.items[2].h), (420.0, 300.0));
    assert_eq!(tab.items.iter().map(|i| i.z).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(session.selected(), Some(&ids[2]));

    let usage = session.byte_usage(&probe);
    assert_eq!(usage.tab, 2058);
    assert_eq!(usage.total, 2058);
}

#[test]
fn test_switching_tabs_cancels_live_pan() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_camera(0.0, 0.0, 1.0)
        .build();
    let first = session.document().active_tab_id.clone();
    let second = session.new_tab();
    session.switch_tab(&first).unwrap();

    session.dispatch(InputEvent::PointerDown(
        PointerEvent::primary(ScreenPoint::new(0.0, 0.0)).with_button(PointerButton::Middle),
    ));
    assert!(session.input_state().is_panning());
    session.switch_tab(&second).unwrap();
    assert!(session.input_state().is_idle());

    move_to(&mut session, 10.0, 10.0);
    release(&mut session, 10.0, 10.0);

    assert_eq!(session.camera(), Camera::new(200.0, 120.0, 1.0));
    assert_eq!(
        session.document().active_tab().camera,
        Camera::new(200.0, 120.0, 1.0)
    );
}
