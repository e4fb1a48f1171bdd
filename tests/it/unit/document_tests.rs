//! Document rules: loading defaults, tab lifecycle guards.

use crate::helpers::fixed_tab;
use pinboard::error::BoardError;
use pinboard::session::{PendingAction, Session};
use pinboard::types::{Camera, Document};

#[test]
fn test_missing_camera_gets_default() {
    let json = r#"{
        "V": "pinboard-1",
        "ActiveTabId": "t1",
        "Tabs": [{ "Id": "t1", "Name": "Moods", "Items": [] }]
    }"#;

    let doc = Document::from_json(json).unwrap();

    assert_eq!(doc.tabs[0].camera, Camera::new(200.0, 120.0, 1.0));
    assert_eq!(doc.ui.scale, 1.0);
}

#[test]
fn test_unknown_active_tab_falls_back_to_first() {
    let json = r#"{ "ActiveTabId": "gone", "Tabs": [{ "Id": "a" }, { "Id": "b" }] }"#;
    let doc = Document::from_json(json).unwrap();
    assert_eq!(doc.active_tab_id.as_str(), "a");
}

#[test]
fn test_board_without_tabs_is_rejected() {
    let result = Document::from_json(r#"{ "V": "pinboard-1", "Tabs": [] }"#);
    assert!(matches!(result, Err(BoardError::Validation(_))));
}

#[test]
fn test_last_tab_cannot_be_deleted() {
    let mut session = Session::default();

    assert!(matches!(session.request_delete_tab(), Err(BoardError::LastTab)));
    assert!(session.pending_action().is_none());
    assert_eq!(session.document().tabs.len(), 1);
}

#[test]
fn test_delete_tab_needs_confirmation() {
    let mut doc = Document::new();
    doc.tabs = vec![fixed_tab("a", "A"), fixed_tab("b", "B")];
    doc.active_tab_id = "b".into();
    let mut session = Session::new(doc);

    let pending = session.request_delete_tab().unwrap().clone();
    assert_eq!(pending, PendingAction::DeleteTab("b".into()));
    assert_eq!(session.document().tabs.len(), 2);

    session.cancel_pending();
    assert!(!session.confirm_pending().unwrap());
    assert_eq!(session.document().tabs.len(), 2);

    session.request_delete_tab().unwrap();
    assert!(session.confirm_pending().unwrap());
    assert_eq!(session.document().tabs.len(), 1);
    assert_eq!(session.document().active_tab_id.as_str(), "a");
}

#[test]
fn test_rename_sanitizes() {
    let mut session = Session::default();
    let id = session.document().active_tab_id.clone();

    assert_eq!(session.rename_tab(&id, "   ").unwrap(), "Tab");
    let long = "x".repeat(60);
    assert_eq!(session.rename_tab(&id, &long).unwrap().chars().count(), 40);
    assert!(matches!(
        session.rename_tab(&"nope".into(), "x"),
        Err(BoardError::TabNotFound(_))
    ));
}
