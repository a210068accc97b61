use super::*;

fn consistent(session: &Session) -> bool {
    session.is_authenticated() == session.token().is_some()
}

// =============================================================
// Session defaults and transitions
// =============================================================

#[test]
fn session_default_is_empty() {
    let session = Session::default();
    assert!(session.token().is_none());
    assert!(session.user().is_none());
    assert!(!session.is_authenticated());
    assert!(!session.loading());
    assert!(session.error().is_none());
    assert!(consistent(&session));
}

#[test]
fn establish_sets_flag_with_token() {
    let mut session = Session::default();
    session.establish("abc123".to_owned(), Some(User { id: None, username: "alice".to_owned() }));
    assert_eq!(session.token(), Some("abc123"));
    assert!(session.is_authenticated());
    assert_eq!(session.user().map(|u| u.username.as_str()), Some("alice"));
    assert!(consistent(&session));
}

#[test]
fn clear_identity_keeps_error() {
    let mut session = Session::default();
    session.establish("abc123".to_owned(), None);
    session.finish_loading(Some("boom".to_owned()));
    session.clear_identity();
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert_eq!(session.error(), Some("boom"));
    assert!(consistent(&session));
}

#[test]
fn begin_loading_clears_previous_error() {
    let mut session = Session::default();
    session.finish_loading(Some("old".to_owned()));
    session.begin_loading();
    assert!(session.loading());
    assert!(session.error().is_none());
}

#[test]
fn finish_loading_without_error_keeps_error_cleared() {
    let mut session = Session::default();
    session.begin_loading();
    session.finish_loading(None);
    assert!(!session.loading());
    assert!(session.error().is_none());
}

// =============================================================
// User persistence shape
// =============================================================

#[test]
fn user_with_numeric_id_serializes_compactly() {
    let user = User { id: Some(UserId::Number(7)), username: "alice".to_owned() };
    assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"id":7,"username":"alice"}"#);
}

#[test]
fn user_without_id_omits_field() {
    let user = User { id: None, username: "bob".to_owned() };
    assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"username":"bob"}"#);
}

#[test]
fn user_from_persisted_accepts_string_id() {
    let user = User::from_persisted(r#"{"id":"u-42","username":"carol"}"#).unwrap();
    assert_eq!(user.id, Some(UserId::Text("u-42".to_owned())));
    assert_eq!(user.id.unwrap().to_string(), "u-42");
}

#[test]
fn user_from_persisted_malformed_is_none() {
    assert!(User::from_persisted("{not json").is_none());
    assert!(User::from_persisted("42").is_none());
    assert!(User::from_persisted(r#"{"id":1}"#).is_none());
}
