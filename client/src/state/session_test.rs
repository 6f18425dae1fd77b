use super::*;

fn teacher_session() -> Session {
    Session {
        token: "tok-1".to_owned(),
        role: Role::Teacher,
        user_id: "t-42".to_owned(),
        display_name: "Ms. Rao".to_owned(),
    }
}

// =============================================================
// Role
// =============================================================

#[test]
fn role_parse_accepts_any_case_and_whitespace() {
    assert_eq!(Role::parse("admin"), Some(Role::Admin));
    assert_eq!(Role::parse(" Teacher "), Some(Role::Teacher));
    assert_eq!(Role::parse("STUDENT"), Some(Role::Student));
    assert_eq!(Role::parse("principal"), None);
    assert_eq!(Role::parse(""), None);
}

#[test]
fn role_paths_are_distinct_per_role() {
    assert_eq!(Role::Admin.login_path(), "/adminlogin");
    assert_eq!(Role::Teacher.login_path(), "/teacherlogin");
    assert_eq!(Role::Student.login_path(), "/studentlogin");
    assert_eq!(Role::Admin.dashboard_path(), "/admindash");
    assert_eq!(Role::Teacher.dashboard_path(), "/teacherdash");
    assert_eq!(Role::Student.dashboard_path(), "/studentdash");
}

#[test]
fn role_storage_keys_match_legacy_layout() {
    assert_eq!(Role::Admin.id_key(), "adminId");
    assert_eq!(Role::Teacher.id_key(), "teacherId");
    assert_eq!(Role::Student.id_key(), "studentId");
    assert_eq!(Role::Admin.name_key(), "adminName");
    assert_eq!(Role::Teacher.name_key(), "teacherName");
    assert_eq!(Role::Student.name_key(), "studentName");
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
    assert_eq!(Role::Student.to_string(), "student");
}

// =============================================================
// persist / load / clear
// =============================================================

#[test]
fn persist_then_load_returns_same_session() {
    let store = MemoryStore::new();
    persist(&store, &teacher_session()).unwrap();
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-1"));
    assert_eq!(store.get(ROLE_KEY).as_deref(), Some("teacher"));
    assert_eq!(store.get("teacherId").as_deref(), Some("t-42"));
    assert_eq!(store.get("teacherName").as_deref(), Some("Ms. Rao"));
    assert_eq!(load(&store), Some(teacher_session()));
}

#[test]
fn persist_drops_identifiers_from_previous_role() {
    let store = MemoryStore::new();
    store.set("adminId", "a-1").unwrap();
    store.set("adminName", "Root").unwrap();
    persist(&store, &teacher_session()).unwrap();
    assert_eq!(store.get("adminId"), None);
    assert_eq!(store.get("adminName"), None);
}

#[test]
fn load_requires_token_and_known_role() {
    let store = MemoryStore::new();
    assert_eq!(load(&store), None);

    store.set(TOKEN_KEY, "tok").unwrap();
    assert_eq!(load(&store), None);

    store.set(ROLE_KEY, "janitor").unwrap();
    assert_eq!(load(&store), None);

    store.set(ROLE_KEY, "student").unwrap();
    let session = load(&store).unwrap();
    assert_eq!(session.role, Role::Student);
    assert_eq!(session.user_id, "");
    assert_eq!(session.display_name, "Student");
}

#[test]
fn load_ignores_blank_token() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "   ").unwrap();
    store.set(ROLE_KEY, "admin").unwrap();
    assert_eq!(load(&store), None);
}

#[test]
fn clear_removes_every_session_key() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "t").unwrap();
    store.set(ROLE_KEY, "admin").unwrap();
    for role in Role::ALL {
        store.set(role.id_key(), "id").unwrap();
        store.set(role.name_key(), "name").unwrap();
    }
    clear(&store).unwrap();
    assert!(store.is_empty());
}

#[test]
fn clear_leaves_unrelated_keys() {
    let store = MemoryStore::new();
    store.set("theme", "dark").unwrap();
    store.set(TOKEN_KEY, "t").unwrap();
    clear(&store).unwrap();
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
    assert_eq!(store.get(TOKEN_KEY), None);
}

// =============================================================
// AuthContext
// =============================================================

#[test]
fn auth_context_starts_unrestored_and_empty() {
    let auth = AuthContext::new();
    assert!(!auth.is_restored());
    assert_eq!(auth.current_untracked(), None);
}

#[test]
fn auth_context_restore_reads_store() {
    let store = MemoryStore::new();
    persist(&store, &teacher_session()).unwrap();
    let auth = AuthContext::new();
    auth.restore(&store);
    assert!(auth.is_restored());
    assert_eq!(auth.current_untracked(), Some(teacher_session()));
    assert_eq!(auth.display_name(Role::Teacher), "Ms. Rao");
    assert_eq!(auth.display_name(Role::Admin), "Admin");
}

#[test]
fn auth_context_logout_clears_store_and_reports_role() {
    let store = MemoryStore::new();
    persist(&store, &teacher_session()).unwrap();
    let auth = AuthContext::new();
    auth.restore(&store);

    assert_eq!(auth.logout(&store), Some(Role::Teacher));
    assert!(store.is_empty());
    assert_eq!(auth.current_untracked(), None);
}

#[test]
fn auth_context_logout_falls_back_to_stored_role() {
    let store = MemoryStore::new();
    store.set(ROLE_KEY, "student").unwrap();
    let auth = AuthContext::new();
    assert_eq!(auth.logout(&store), Some(Role::Student));
}

#[test]
fn persist_reports_rejected_writes() {
    let err = persist(&testing::FullStore, &teacher_session()).unwrap_err();
    assert_eq!(err, StoreError::Write { key: TOKEN_KEY.to_owned(), reason: "QuotaExceededError".to_owned() });
}

#[test]
fn clear_attempts_every_key_and_reports_the_first_failure() {
    struct Jammed(RefCell<Vec<String>>);
    impl SessionStore for Jammed {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Ok(())
        }
        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.0.borrow_mut().push(key.to_owned());
            Err(StoreError::Write { key: key.to_owned(), reason: "locked".to_owned() })
        }
    }

    let store = Jammed(RefCell::new(Vec::new()));
    let err = clear(&store).unwrap_err();

    assert_eq!(err, StoreError::Write { key: TOKEN_KEY.to_owned(), reason: "locked".to_owned() });
    assert_eq!(store.0.borrow().len(), 8);
}

#[test]
fn server_render_store_refuses_writes() {
    assert_eq!(BrowserSessionStore.set(TOKEN_KEY, "t"), Err(StoreError::Unavailable));
    assert_eq!(BrowserSessionStore.get(TOKEN_KEY), None);
}
