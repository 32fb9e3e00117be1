use crate::model::repository::User;
use crate::repository::{open_connection, user_repository};
use crate::test::{cleanup, create_user_db_entry, refresh_db};

fn user(username: &str, email: &str) -> User {
    User {
        id: None,
        username: String::from(username),
        email: String::from(email),
        password_hash: String::from("hash"),
        created_at: chrono::offset::Local::now().naive_local(),
    }
}

#[test]
fn create_user_assigns_an_id() {
    refresh_db();
    let con = open_connection();
    let created = user_repository::create_user(&user("username", "user@example.com"), &con).unwrap();
    con.close().unwrap();
    assert!(created.id.is_some());
    assert_eq!("username", created.username);
    cleanup();
}

#[test]
fn get_by_username_or_email_matches_either_field() {
    refresh_db();
    let created = create_user_db_entry("username", "user@example.com");
    let con = open_connection();
    let by_username = user_repository::get_by_username_or_email("username", "username", &con)
        .unwrap()
        .unwrap();
    let by_email =
        user_repository::get_by_username_or_email("user@example.com", "user@example.com", &con)
            .unwrap()
            .unwrap();
    con.close().unwrap();
    assert_eq!(created.id, by_username.id);
    assert_eq!(created.id, by_email.id);
    cleanup();
}

#[test]
fn get_by_username_or_email_returns_none_for_no_match() {
    refresh_db();
    create_user_db_entry("username", "user@example.com");
    let con = open_connection();
    let found = user_repository::get_by_username_or_email("nobody", "nobody@example.com", &con)
        .unwrap();
    con.close().unwrap();
    assert_eq!(None, found);
    cleanup();
}

#[test]
fn create_user_enforces_unique_username() {
    refresh_db();
    create_user_db_entry("username", "first@example.com");
    let con = open_connection();
    let result = user_repository::create_user(&user("username", "second@example.com"), &con);
    con.close().unwrap();
    assert!(matches!(
        result,
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    ));
    cleanup();
}

#[test]
fn create_user_enforces_unique_email() {
    refresh_db();
    create_user_db_entry("first", "user@example.com");
    let con = open_connection();
    let result = user_repository::create_user(&user("second", "user@example.com"), &con);
    con.close().unwrap();
    assert!(matches!(
        result,
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    ));
    cleanup();
}
