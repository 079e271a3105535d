use crate::core::error::StoreError;
use crate::models::user::{NewUser, Role, User};
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    password TEXT NOT NULL,
    role TEXT NOT NULL
)";

const INSERT_USER: &str = "INSERT INTO users (username, password, role) VALUES (?, ?, ?)";

const SELECT_USERS: &str = "SELECT id, username, password, role FROM users ORDER BY id";

/// Row shape of the `users` table
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id).map_err(|_| StoreError::Corrupt {
            id: row.id,
            reason: "negative id".to_string(),
        })?;

        let role = row.role.parse::<Role>().map_err(|e| StoreError::Corrupt {
            id: row.id,
            reason: e.to_string(),
        })?;

        Ok(User {
            id,
            username: row.username,
            password_hash: row.password,
            role,
        })
    }
}

/// SQL-backed user persistence. The only component that touches the database.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `users` table if it does not exist yet
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a user and return it with its assigned id
    ///
    /// AUTOINCREMENT guarantees ids are never reused, even after rows vanish.
    pub async fn save(&self, user: NewUser) -> Result<User, StoreError> {
        let result = sqlx::query(INSERT_USER)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .execute(&self.pool)
            .await?;

        let rowid = result.last_insert_rowid();
        let id = u64::try_from(rowid).map_err(|_| StoreError::Corrupt {
            id: rowid,
            reason: "negative id".to_string(),
        })?;

        Ok(user.with_id(id))
    }

    /// All persisted users, in primary-key order
    pub async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<UserRow> = sqlx::query_as(SELECT_USERS)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    /// Round-trip a trivial query to check the database is reachable
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
