//! SQLite-backed store.
//!
//! One connection behind a mutex; every call runs on the blocking pool.
//! Decimals are stored as TEXT to keep their exact scale, timestamps as
//! fixed-width RFC 3339 UTC strings so they sort lexicographically.

use super::{sort_newest_first, OrderStore, StoreError, UserStore};
use crate::model::{
    normalize_email, LineItem, LineItemId, NewUser, Order, OrderCreate, OrderDetails, OrderId,
    OrderStatus, User, UserId, UserRecord,
};
use crate::order_actor::OrderError;
use crate::user_actor::UserError;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Current schema version. Bump when adding new migrations.
const CURRENT_SCHEMA_VERSION: i32 = 1;

const ORDER_COLUMNS: &str = "o.id, o.user_id, o.total_amount, o.status, o.delivery_address, \
     o.latitude, o.longitude, o.phone, o.notes, o.payment_method, o.created_at, o.updated_at";

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database file, applies pragmas and migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening database");
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;
             PRAGMA synchronous = NORMAL;",
        )?;
        Self::with_connection(conn)
    }

    /// Private in-memory database; gone when the store is dropped.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn run<T, E, F>(&self, f: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, E> + Send + 'static,
    {
        let conn = self.conn.clone();
        let joined = tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| E::from(StoreError::Poisoned))?;
            f(&mut guard)
        })
        .await;
        match joined {
            Ok(result) => result,
            Err(e) => Err(E::from(StoreError::Task(e))),
        }
    }
}

/// Run all pending migrations up to `CURRENT_SCHEMA_VERSION`.
fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT DEFAULT (datetime('now'))
        );",
    )?;

    let current: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    if current >= CURRENT_SCHEMA_VERSION {
        debug!(version = current, "Database schema up to date");
        return Ok(());
    }

    info!(from = current, to = CURRENT_SCHEMA_VERSION, "Migrating database");
    if current < 1 {
        migrate_v1(conn)?;
    }
    Ok(())
}

fn migrate_v1(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "BEGIN;
         CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE COLLATE NOCASE,
            password_hash TEXT NOT NULL,
            name TEXT NOT NULL,
            phone TEXT,
            created_at TEXT NOT NULL
         );
         CREATE TABLE orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER REFERENCES users(id),
            total_amount TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'confirmed', 'delivered')),
            delivery_address TEXT NOT NULL,
            latitude REAL,
            longitude REAL,
            phone TEXT NOT NULL,
            notes TEXT,
            payment_method TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
         );
         CREATE TABLE order_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL REFERENCES orders(id),
            menu_item_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            price TEXT NOT NULL
         );
         CREATE INDEX idx_orders_user ON orders(user_id);
         CREATE INDEX idx_orders_created ON orders(created_at);
         CREATE INDEX idx_order_items_order ON order_items(order_id);
         INSERT INTO schema_version (version) VALUES (1);
         COMMIT;",
    )?;
    Ok(())
}

// --- Row decoding ---

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("timestamp {raw:?}: {e}")))
}

fn parse_decimal(raw: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(raw).map_err(|e| StoreError::Corrupt(format!("decimal {raw:?}: {e}")))
}

fn to_i64(id: u64) -> Result<i64, StoreError> {
    i64::try_from(id).map_err(|_| StoreError::Corrupt(format!("id {id} out of range")))
}

/// Order columns as SQLite hands them back, before decoding.
struct RawOrder {
    id: i64,
    user_id: Option<i64>,
    total_amount: String,
    status: String,
    delivery_address: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    phone: String,
    notes: Option<String>,
    payment_method: String,
    created_at: String,
    updated_at: String,
}

impl RawOrder {
    /// Reads the `ORDER_COLUMNS` at positions 0..12.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            total_amount: row.get(2)?,
            status: row.get(3)?,
            delivery_address: row.get(4)?,
            latitude: row.get(5)?,
            longitude: row.get(6)?,
            phone: row.get(7)?,
            notes: row.get(8)?,
            payment_method: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }

    fn decode(self) -> Result<Order, StoreError> {
        let status = OrderStatus::from_str(&self.status)
            .map_err(|_| StoreError::Corrupt(format!("status {:?}", self.status)))?;
        Ok(Order {
            id: OrderId(self.id as u64),
            user_id: self.user_id.map(|id| UserId(id as u64)),
            total_amount: parse_decimal(&self.total_amount)?,
            status,
            delivery_address: self.delivery_address,
            latitude: self.latitude,
            longitude: self.longitude,
            phone: self.phone,
            notes: self.notes,
            payment_method: self.payment_method,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// One element of the aggregated `items` JSON array.
#[derive(Deserialize)]
struct RawItem {
    id: u64,
    menu_item_id: u64,
    quantity: u32,
    price: String,
}

fn decode_items(raw: &str) -> Result<Vec<LineItem>, StoreError> {
    let parsed: Vec<RawItem> = serde_json::from_str(raw)
        .map_err(|e| StoreError::Corrupt(format!("items {raw:?}: {e}")))?;
    let mut items = parsed
        .into_iter()
        .map(|item| {
            Ok(LineItem {
                id: LineItemId(item.id),
                menu_item_id: item.menu_item_id,
                quantity: item.quantity,
                price: parse_decimal(&item.price)?,
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;
    items.sort_by_key(|i| i.id);
    Ok(items)
}

fn read_order(conn: &Connection, id: i64) -> Result<Option<Order>, StoreError> {
    let raw = conn
        .query_row(
            &format!("SELECT {ORDER_COLUMNS} FROM orders o WHERE o.id = ?1"),
            [id],
            RawOrder::from_row,
        )
        .optional()?;
    raw.map(RawOrder::decode).transpose()
}

fn read_user(row: &Row<'_>) -> rusqlite::Result<(i64, String, String, Option<String>, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn decode_user(
    (id, email, name, phone, created_at): (i64, String, String, Option<String>, String),
) -> Result<User, StoreError> {
    Ok(User {
        id: UserId(id as u64),
        email,
        name,
        phone,
        created_at: parse_timestamp(&created_at)?,
    })
}

// --- Orders ---

#[async_trait]
impl OrderStore for SqliteStore {
    #[instrument(skip(self, params), fields(items = params.items.len()))]
    async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        self.run(move |conn| {
            let tx = conn.transaction().map_err(StoreError::from)?;

            if let Some(user_id) = params.user_id {
                let exists: bool = tx
                    .query_row(
                        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
                        [to_i64(user_id.0)?],
                        |row| row.get(0),
                    )
                    .map_err(StoreError::from)?;
                if !exists {
                    return Err(OrderError::UnknownCustomer(user_id));
                }
            }

            let now = timestamp(Utc::now());
            tx.execute(
                "INSERT INTO orders
                    (user_id, total_amount, status, delivery_address, latitude, longitude,
                     phone, notes, payment_method, created_at, updated_at)
                 VALUES (?1, ?2, 'pending', ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                params![
                    params.user_id.map(|u| u.0 as i64),
                    params.total_amount.to_string(),
                    params.delivery_address,
                    params.latitude,
                    params.longitude,
                    params.phone,
                    params.notes,
                    params.payment_method,
                    now,
                ],
            )
            .map_err(StoreError::from)?;
            let order_id = tx.last_insert_rowid();

            {
                let mut insert_item = tx
                    .prepare(
                        "INSERT INTO order_items (order_id, menu_item_id, quantity, price)
                         VALUES (?1, ?2, ?3, ?4)",
                    )
                    .map_err(StoreError::from)?;
                for item in &params.items {
                    insert_item
                        .execute(params![
                            order_id,
                            to_i64(item.menu_item_id)?,
                            item.quantity,
                            item.price.to_string(),
                        ])
                        .map_err(StoreError::from)?;
                }
            }

            let order = read_order(&tx, order_id)?.ok_or_else(|| {
                StoreError::Corrupt(format!("order {order_id} missing after insert"))
            })?;
            tx.commit().map_err(StoreError::from)?;
            Ok(order)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self, owner: Option<UserId>) -> Result<Vec<OrderDetails>, OrderError> {
        self.run(move |conn| {
            let owner = owner.map(|u| to_i64(u.0)).transpose()?;
            let sql = format!(
                "SELECT {ORDER_COLUMNS}, u.name, u.email,
                    CASE WHEN COUNT(oi.id) = 0 THEN '[]'
                         ELSE json_group_array(json_object(
                             'id', oi.id,
                             'menu_item_id', oi.menu_item_id,
                             'quantity', oi.quantity,
                             'price', oi.price))
                    END AS items
                 FROM orders o
                 LEFT JOIN order_items oi ON oi.order_id = o.id
                 LEFT JOIN users u ON u.id = o.user_id
                 WHERE ?1 IS NULL OR o.user_id = ?1
                 GROUP BY o.id
                 ORDER BY o.created_at DESC, o.id DESC"
            );
            let mut stmt = conn.prepare(&sql).map_err(StoreError::from)?;
            let rows = stmt
                .query_map([owner], |row| {
                    Ok((
                        RawOrder::from_row(row)?,
                        row.get::<_, Option<String>>(12)?,
                        row.get::<_, Option<String>>(13)?,
                        row.get::<_, String>(14)?,
                    ))
                })
                .map_err(StoreError::from)?;

            let mut orders = Vec::new();
            for row in rows {
                let (raw, user_name, user_email, items) = row.map_err(StoreError::from)?;
                orders.push(OrderDetails {
                    order: raw.decode()?,
                    user_name,
                    user_email,
                    items: decode_items(&items)?,
                });
            }
            sort_newest_first(&mut orders);
            Ok(orders)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: OrderId, target: OrderStatus) -> Result<Order, OrderError> {
        self.run(move |conn| {
            let row_id = to_i64(id.0)?;
            let tx = conn.transaction().map_err(StoreError::from)?;

            let current: Option<String> = tx
                .query_row("SELECT status FROM orders WHERE id = ?1", [row_id], |row| {
                    row.get(0)
                })
                .optional()
                .map_err(StoreError::from)?;
            let Some(current) = current else {
                return Err(OrderError::NotFound(id));
            };
            let current = OrderStatus::from_str(&current)
                .map_err(|_| StoreError::Corrupt(format!("status {current:?}")))?;
            let next = current.transition_to(target)?;

            tx.execute(
                "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![next.as_str(), timestamp(Utc::now()), row_id],
            )
            .map_err(StoreError::from)?;

            let order = read_order(&tx, row_id)?.ok_or(OrderError::NotFound(id))?;
            tx.commit().map_err(StoreError::from)?;
            Ok(order)
        })
        .await
    }
}

// --- Users ---

#[async_trait]
impl UserStore for SqliteStore {
    async fn create_user(&self, params: NewUser) -> Result<User, UserError> {
        self.run(move |conn| {
            let created_at = timestamp(Utc::now());
            let inserted = conn.execute(
                "INSERT INTO users (email, password_hash, name, phone, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    params.email,
                    params.password_hash,
                    params.name,
                    params.phone,
                    created_at,
                ],
            );
            match inserted {
                Ok(_) => {}
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    return Err(UserError::AlreadyExists(normalize_email(&params.email)));
                }
                Err(e) => return Err(StoreError::from(e).into()),
            }
            Ok(User {
                id: UserId(conn.last_insert_rowid() as u64),
                email: params.email,
                name: params.name,
                phone: params.phone,
                created_at: parse_timestamp(&created_at)?,
            })
        })
        .await
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserRecord>, UserError> {
        let email = normalize_email(email);
        self.run(move |conn| {
            let found = conn
                .query_row(
                    "SELECT id, email, name, phone, created_at, password_hash
                     FROM users WHERE email = ?1",
                    [email],
                    |row| Ok((read_user(row)?, row.get::<_, String>(5)?)),
                )
                .optional()
                .map_err(StoreError::from)?;
            match found {
                Some((user, password_hash)) => Ok(Some(UserRecord {
                    user: decode_user(user)?,
                    password_hash,
                })),
                None => Ok(None),
            }
        })
        .await
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.run(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, email, name, phone, created_at FROM users ORDER BY id")
                .map_err(StoreError::from)?;
            let rows = stmt.query_map([], read_user).map_err(StoreError::from)?;
            let mut users = Vec::new();
            for row in rows {
                users.push(decode_user(row.map_err(StoreError::from)?)?);
            }
            Ok(users)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_a_file_keeps_the_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cafe.db");
        drop(SqliteStore::open(&path).unwrap());
        let store = SqliteStore::open(&path).unwrap();

        let conn = store.conn.lock().unwrap();
        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn timestamps_round_trip_and_sort_as_text() {
        let earlier = Utc::now();
        let later = earlier + chrono::TimeDelta::milliseconds(1);
        assert!(timestamp(earlier) < timestamp(later));
        let back = parse_timestamp(&timestamp(earlier)).unwrap();
        assert_eq!(back.timestamp_micros(), earlier.timestamp_micros());
    }

    #[test]
    fn aggregated_items_are_sorted_by_id() {
        let items = decode_items(
            r#"[{"id":5,"menu_item_id":1,"quantity":1,"price":"3.00"},
                {"id":2,"menu_item_id":9,"quantity":4,"price":"12.50"}]"#,
        )
        .unwrap();
        assert_eq!(items[0].id, LineItemId(2));
        assert_eq!(items[0].price, Decimal::new(1250, 2));
        assert_eq!(items[1].quantity, 1);
        assert!(decode_items("[]").unwrap().is_empty());
    }

    #[test]
    fn garbage_in_the_store_is_reported_as_corrupt() {
        assert!(matches!(parse_decimal("abc"), Err(StoreError::Corrupt(_))));
        assert!(matches!(parse_timestamp("yesterday"), Err(StoreError::Corrupt(_))));
    }
}
