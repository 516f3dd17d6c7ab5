use axum::http::StatusCode;
use chrono::NaiveDate;
use rusqlite::Connection;
use shared::{
    api::{error::ServerError, response_errors::CreateUserError},
    model::{LogFilter, NewExercise, User, UserLog},
    types::UserId,
};
use tempfile::TempDir;

use super::*;

fn migrated_database() -> (TempDir, Connection) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.sqlite");
    let path = path.to_str().unwrap();

    run_migrations(path).unwrap();

    let mut conn = Connection::open(path).unwrap();
    configure_new_connection(&mut conn).unwrap();
    (dir, conn)
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn add_exercise(conn: &mut Connection, user: &User, description: &str, duration: i64, on: &str) {
    NewExercise {
        user_id: user.id.clone(),
        description: description.to_string(),
        duration,
        date: date(on),
    }
    .create(conn)
    .unwrap()
    .expect("user exists");
}

fn exercise_rows(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM exercises", (), |row| row.get(0)).unwrap()
}

#[test]
fn migrations_only_run_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.sqlite");
    let path = path.to_str().unwrap();

    assert_eq!(run_migrations(path).unwrap(), 2);
    assert_eq!(run_migrations(path).unwrap(), 0);
}

#[test]
fn creates_and_fetches_a_user() {
    let (_dir, mut conn) = migrated_database();

    let user = User::create(&mut conn, "alice").unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.id.len(), 24);

    let fetched = User::fetch_by_id(&conn, &user.id).unwrap();
    assert_eq!(fetched, Some(user));
}

#[test]
fn fresh_usernames_get_distinct_ids() {
    let (_dir, mut conn) = migrated_database();

    let ids: Vec<UserId> = (0..20)
        .map(|i| User::create(&mut conn, &format!("user{i}")).unwrap().id)
        .collect();

    for (i, id) in ids.iter().enumerate() {
        assert!(!ids[i + 1..].contains(id), "{id} issued twice");
    }
}

#[test]
fn duplicate_username_is_its_own_error() {
    let (_dir, mut conn) = migrated_database();

    User::create(&mut conn, "alice").unwrap();
    let err = User::create(&mut conn, "alice").unwrap_err();

    assert!(
        matches!(
            err,
            ServerError::Inner {
                code: StatusCode::CONFLICT,
                inner: CreateUserError::UsernameTaken
            }
        ),
        "{err:?}"
    );
    assert_eq!(User::fetch_all(&conn).unwrap().len(), 1);
}

#[test]
fn lists_users_in_signup_order() {
    let (_dir, mut conn) = migrated_database();
    assert!(User::fetch_all(&conn).unwrap().is_empty());

    let carol = User::create(&mut conn, "carol").unwrap();
    let alice = User::create(&mut conn, "alice").unwrap();
    let bob = User::create(&mut conn, "bob").unwrap();

    assert_eq!(User::fetch_all(&conn).unwrap(), vec![carol, alice, bob]);
}

#[test]
fn exercise_for_unknown_user_writes_nothing() {
    let (_dir, mut conn) = migrated_database();

    let record = NewExercise {
        user_id: UserId::from("ffffffffffffffffffffffff"),
        description: "run".to_string(),
        duration: 30,
        date: date("2024-01-05"),
    }
    .create(&mut conn)
    .unwrap();

    assert_eq!(record, None);
    assert_eq!(exercise_rows(&conn), 0);
}

#[test]
fn recorded_exercise_is_rendered_for_humans() {
    let (_dir, mut conn) = migrated_database();
    let user = User::create(&mut conn, "alice").unwrap();

    let record = NewExercise {
        user_id: user.id.clone(),
        description: "run".to_string(),
        duration: 30,
        date: date("2024-01-05"),
    }
    .create(&mut conn)
    .unwrap()
    .unwrap();

    assert_eq!(record.id, user.id);
    assert_eq!(record.username, "alice");
    assert_eq!(record.date, "Fri Jan 05 2024");
    assert_eq!(record.duration, 30);
    assert_eq!(record.description, "run");

    let stored: String = conn
        .query_row("SELECT date FROM exercises", (), |row| row.get(0))
        .unwrap();
    assert_eq!(stored, "2024-01-05");
}

#[test]
fn storage_refuses_non_positive_durations() {
    let (_dir, mut conn) = migrated_database();
    let user = User::create(&mut conn, "alice").unwrap();

    let res = NewExercise {
        user_id: user.id.clone(),
        description: "nap".to_string(),
        duration: 0,
        date: date("2024-01-05"),
    }
    .create(&mut conn);

    assert!(res.is_err());
    assert_eq!(exercise_rows(&conn), 0);
}

#[test]
fn log_of_unknown_user_is_none() {
    let (_dir, mut conn) = migrated_database();

    let log = UserLog::fetch(&mut conn, &UserId::from("nobody"), &LogFilter::default()).unwrap();
    assert_eq!(log, None);
}

#[test]
fn empty_log() {
    let (_dir, mut conn) = migrated_database();
    let user = User::create(&mut conn, "alice").unwrap();

    let log = UserLog::fetch(&mut conn, &user.id, &LogFilter::default())
        .unwrap()
        .unwrap();
    assert_eq!(log.count, 0);
    assert!(log.log.is_empty());
}

#[test]
fn count_ignores_the_limit() {
    let (_dir, mut conn) = migrated_database();
    let user = User::create(&mut conn, "alice").unwrap();
    for day in 1..=10 {
        add_exercise(&mut conn, &user, &format!("day {day}"), day, &format!("2024-01-{day:02}"));
    }

    let filter = LogFilter {
        from: Some(date("2024-01-03")),
        to: Some(date("2024-01-08")),
        limit: Some(2),
    };
    let log = UserLog::fetch(&mut conn, &user.id, &filter).unwrap().unwrap();

    assert_eq!(log.count, 6);
    assert_eq!(log.log.len(), 2);
    assert_eq!(log.log[0].date, "Mon Jan 08 2024");
    assert_eq!(log.log[1].date, "Sun Jan 07 2024");

    let unlimited = LogFilter { limit: None, ..filter };
    let log = UserLog::fetch(&mut conn, &user.id, &unlimited).unwrap().unwrap();
    assert_eq!(log.count, 6);
    assert_eq!(log.log.len(), 6);
}

#[test]
fn log_only_contains_the_users_exercises() {
    let (_dir, mut conn) = migrated_database();
    let alice = User::create(&mut conn, "alice").unwrap();
    let bob = User::create(&mut conn, "bob").unwrap();
    add_exercise(&mut conn, &alice, "run", 30, "2024-01-05");
    add_exercise(&mut conn, &bob, "swim", 45, "2024-01-05");
    add_exercise(&mut conn, &bob, "swim", 50, "2024-01-06");

    let log = UserLog::fetch(&mut conn, &alice.id, &LogFilter::default())
        .unwrap()
        .unwrap();
    assert_eq!(log.count, 1);
    assert_eq!(log.log[0].description, "run");
}

#[test]
fn log_is_newest_first_then_latest_entry_first() {
    let (_dir, mut conn) = migrated_database();
    let user = User::create(&mut conn, "alice").unwrap();
    add_exercise(&mut conn, &user, "morning", 10, "2024-01-05");
    add_exercise(&mut conn, &user, "older", 20, "2024-01-01");
    add_exercise(&mut conn, &user, "evening", 30, "2024-01-05");

    let log = UserLog::fetch(&mut conn, &user.id, &LogFilter::default())
        .unwrap()
        .unwrap();
    let descriptions: Vec<&str> = log.log.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, ["evening", "morning", "older"]);
}

#[test]
fn date_range_bounds_are_inclusive() {
    let (_dir, mut conn) = migrated_database();
    let user = User::create(&mut conn, "alice").unwrap();
    add_exercise(&mut conn, &user, "run", 30, "2024-03-01");

    let fetch = |conn: &mut Connection, from: Option<&str>, to: Option<&str>| {
        let filter = LogFilter {
            from: from.map(date),
            to: to.map(date),
            limit: None,
        };
        UserLog::fetch(conn, &user.id, &filter).unwrap().unwrap()
    };

    let log = fetch(&mut conn, Some("2024-02-01"), Some("2024-04-01"));
    assert_eq!(log.count, 1);
    assert_eq!(log.log[0].date, "Fri Mar 01 2024");

    assert_eq!(fetch(&mut conn, Some("2024-03-01"), Some("2024-03-01")).count, 1);
    assert_eq!(fetch(&mut conn, None, Some("2024-01-01")).count, 0);
    assert_eq!(fetch(&mut conn, Some("2024-03-02"), None).count, 0);
}
