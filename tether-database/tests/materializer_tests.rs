use pretty_assertions::assert_eq;
use rusqlite::Connection;
use serde_json::json;
use tether_database::{
    materialize, DatabaseError, DatabaseResult, FieldSpec, RowBound, RowSchema, RowView,
};

#[derive(Debug, PartialEq)]
struct User {
    name: String,
    age: i64,
}

impl RowBound for User {
    fn schema() -> RowSchema {
        RowSchema::new("user", vec![FieldSpec::leaf("name"), FieldSpec::leaf("age")])
    }

    fn from_row(view: &RowView) -> DatabaseResult<Self> {
        Ok(Self {
            name: view.field("user", "name")?,
            age: view.field("user", "age")?,
        })
    }
}

#[derive(Debug, PartialEq)]
struct Account {
    owner: User,
    balance: i64,
}

impl RowBound for Account {
    fn schema() -> RowSchema {
        RowSchema::new(
            "account",
            vec![FieldSpec::nested("owner"), FieldSpec::leaf("balance")],
        )
    }

    fn from_row(view: &RowView) -> DatabaseResult<Self> {
        Ok(Self {
            owner: materialize(view)?,
            balance: view.field("account", "balance")?,
        })
    }
}

// ── Flat materialization ─────────────────────────────────────────

#[test]
fn materializes_a_flat_type() {
    let view = RowView::from_pairs([
        ("user.name", json!("Ada")),
        ("user.age", json!(36)),
    ]);

    let user: User = materialize(&view).unwrap();
    assert_eq!(
        user,
        User {
            name: "Ada".to_string(),
            age: 36,
        }
    );
}

#[test]
fn missing_leaf_column_fails_before_building() {
    let view = RowView::from_pairs([("user.name", json!("Ada"))]);

    let err = materialize::<User>(&view).unwrap_err();
    assert!(matches!(err, DatabaseError::MissingColumn(label) if label == "user.age"));
}

#[test]
fn uncoercible_column_fails_with_type_mismatch() {
    let view = RowView::from_pairs([
        ("user.name", json!("Ada")),
        ("user.age", json!("not a number")),
    ]);

    let err = materialize::<User>(&view).unwrap_err();
    assert!(matches!(err, DatabaseError::TypeMismatch { column, .. } if column == "user.age"));
}

#[test]
fn extra_columns_are_ignored() {
    let view = RowView::from_pairs([
        ("user.name", json!("Ada")),
        ("user.age", json!(36)),
        ("audit.touched_at", json!("2024-01-01")),
    ]);

    assert!(materialize::<User>(&view).is_ok());
}

// ── Nested materialization ───────────────────────────────────────

#[test]
fn materializes_one_nested_level() {
    let view = RowView::from_pairs([
        ("account.balance", json!(100)),
        ("user.name", json!("Ada")),
        ("user.age", json!(36)),
    ]);

    let account: Account = materialize(&view).unwrap();
    assert_eq!(
        account,
        Account {
            owner: User {
                name: "Ada".to_string(),
                age: 36,
            },
            balance: 100,
        }
    );
}

#[test]
fn nested_missing_column_surfaces_the_nested_label() {
    let view = RowView::from_pairs([
        ("account.balance", json!(100)),
        ("user.name", json!("Ada")),
    ]);

    let err = materialize::<Account>(&view).unwrap_err();
    assert!(matches!(err, DatabaseError::MissingColumn(label) if label == "user.age"));
}

// ── Optional and null columns ────────────────────────────────────

#[derive(Debug, PartialEq)]
struct Profile {
    nickname: Option<String>,
}

impl RowBound for Profile {
    fn schema() -> RowSchema {
        RowSchema::new("profile", vec![FieldSpec::leaf("nickname")])
    }

    fn from_row(view: &RowView) -> DatabaseResult<Self> {
        Ok(Self {
            nickname: view.field("profile", "nickname")?,
        })
    }
}

#[test]
fn sql_null_materializes_as_none() {
    let view = RowView::from_pairs([("profile.nickname", serde_json::Value::Null)]);
    let profile: Profile = materialize(&view).unwrap();
    assert_eq!(profile, Profile { nickname: None });
}

// ── Schema declarations ──────────────────────────────────────────

#[test]
fn schema_reports_leaf_columns_only() {
    let schema = Account::schema();
    assert_eq!(schema.table, "account");
    let leaves: Vec<&str> = schema.leaf_columns().collect();
    assert_eq!(leaves, vec!["balance"]);
}

#[test]
fn qualified_labels_use_the_table_binding() {
    assert_eq!(User::schema().qualified("name"), "user.name");
}

// ── Driver rows ──────────────────────────────────────────────────

fn seeded_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "
        CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, age INTEGER NOT NULL);
        CREATE TABLE accounts (id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL, balance INTEGER NOT NULL);
        INSERT INTO users (id, name, age) VALUES (1, 'Ada', 36);
        INSERT INTO accounts (id, user_id, balance) VALUES (10, 1, 100);
        ",
    )
    .unwrap();
    conn
}

#[test]
fn captures_a_driver_row_with_qualified_aliases() {
    let conn = seeded_connection();
    let view = conn
        .query_row(
            "SELECT name AS \"user.name\", age AS \"user.age\" FROM users WHERE id = 1",
            [],
            |row| Ok(RowView::from_row(row)),
        )
        .unwrap()
        .unwrap();

    assert_eq!(view.len(), 2);
    assert_eq!(view.get_object("user.name"), Some(&json!("Ada")));

    let user: User = materialize(&view).unwrap();
    assert_eq!(user.age, 36);
}

#[test]
fn materializes_a_joined_row_into_a_nested_type() {
    let conn = seeded_connection();
    let view = conn
        .query_row(
            "SELECT a.balance AS \"account.balance\",
                    u.name    AS \"user.name\",
                    u.age     AS \"user.age\"
             FROM accounts a JOIN users u ON u.id = a.user_id
             WHERE a.id = 10",
            [],
            |row| Ok(RowView::from_row(row)),
        )
        .unwrap()
        .unwrap();

    let account: Account = materialize(&view).unwrap();
    assert_eq!(account.balance, 100);
    assert_eq!(account.owner.name, "Ada");
}

#[test]
fn driver_null_is_captured_as_json_null() {
    let conn = Connection::open_in_memory().unwrap();
    let view = conn
        .query_row(
            "SELECT NULL AS \"profile.nickname\"",
            [],
            |row| Ok(RowView::from_row(row)),
        )
        .unwrap()
        .unwrap();

    let profile: Profile = materialize(&view).unwrap();
    assert_eq!(profile.nickname, None);
}
