//! Label repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable createOne/readOne/readMany/update/delete APIs over the
//!   `labels` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Label::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - All statements constrain rows to the handle's instance namespace.

use crate::db::DbError;
use crate::model::label::{ItemId, Label, LabelId, LabelValidationError, UserId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const LABEL_SELECT_SQL: &str = "SELECT
    uuid,
    owner,
    name,
    item
FROM labels";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for label persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(LabelValidationError),
    Db(DbError),
    NotFound(LabelId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "label not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted label data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<LabelValidationError> for RepoError {
    fn from(value: LabelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Filter options for listing labels, mirroring the readMany shape used by
/// concept callers.
///
/// `owner` is always required; `name` and `item` narrow the result further.
#[derive(Debug, Clone)]
pub struct LabelListQuery {
    pub owner: UserId,
    pub name: Option<String>,
    pub item: Option<ItemId>,
}

impl LabelListQuery {
    /// All labels created by `owner`.
    pub fn for_owner(owner: UserId) -> Self {
        Self {
            owner,
            name: None,
            item: None,
        }
    }

    /// Labels created by `owner` carrying the exact name.
    pub fn by_name(owner: UserId, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: Some(name.into()),
            item: None,
        }
    }

    /// Labels created by `owner` on the referenced item.
    pub fn by_item(owner: UserId, item: ItemId) -> Self {
        Self {
            owner,
            name: None,
            item: Some(item),
        }
    }
}

/// Repository interface for label collection operations.
///
/// Update and delete report whether a row changed instead of failing on a
/// missing id; the concept layer decides whether absence matters.
pub trait LabelRepository {
    fn create_label(&self, label: &Label) -> RepoResult<LabelId>;
    fn get_label(&self, id: LabelId) -> RepoResult<Option<Label>>;
    fn list_labels(&self, query: &LabelListQuery) -> RepoResult<Vec<Label>>;
    fn rename_label(&self, id: LabelId, name: &str) -> RepoResult<bool>;
    fn delete_label(&self, id: LabelId) -> RepoResult<bool>;
}

/// SQLite-backed label repository scoped to one concept instance.
pub struct SqliteLabelRepository<'conn> {
    conn: &'conn Connection,
    instance: String,
}

impl<'conn> SqliteLabelRepository<'conn> {
    /// Constructs a repository over a migrated connection.
    ///
    /// `instance` is the concept namespace (e.g. `circles`, `favorites`);
    /// every row written through this handle is tagged with it and every
    /// query is constrained to it.
    pub fn new(conn: &'conn Connection, instance: impl Into<String>) -> Self {
        Self {
            conn,
            instance: instance.into(),
        }
    }

    /// Returns the namespace this handle is scoped to.
    pub fn instance(&self) -> &str {
        &self.instance
    }
}

impl LabelRepository for SqliteLabelRepository<'_> {
    fn create_label(&self, label: &Label) -> RepoResult<LabelId> {
        label.validate()?;

        self.conn.execute(
            "INSERT INTO labels (uuid, instance, owner, name, item)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                label.id.to_string(),
                self.instance.as_str(),
                label.owner.to_string(),
                label.name.as_str(),
                label.item.to_string(),
            ],
        )?;

        Ok(label.id)
    }

    fn get_label(&self, id: LabelId) -> RepoResult<Option<Label>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LABEL_SELECT_SQL}
             WHERE instance = ?1
               AND uuid = ?2;"
        ))?;

        let mut rows = stmt.query(params![self.instance.as_str(), id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_label_row(row)?));
        }

        Ok(None)
    }

    fn list_labels(&self, query: &LabelListQuery) -> RepoResult<Vec<Label>> {
        let mut sql = format!(
            "{LABEL_SELECT_SQL}
             WHERE instance = ?
               AND owner = ?"
        );
        let mut bind_values: Vec<Value> = vec![
            Value::Text(self.instance.clone()),
            Value::Text(query.owner.to_string()),
        ];

        if let Some(name) = query.name.as_ref() {
            sql.push_str(" AND name = ?");
            bind_values.push(Value::Text(name.clone()));
        }

        if let Some(item) = query.item {
            sql.push_str(" AND item = ?");
            bind_values.push(Value::Text(item.to_string()));
        }

        sql.push_str(" ORDER BY created_at ASC, uuid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut labels = Vec::new();

        while let Some(row) = rows.next()? {
            labels.push(parse_label_row(row)?);
        }

        Ok(labels)
    }

    fn rename_label(&self, id: LabelId, name: &str) -> RepoResult<bool> {
        if name.trim().is_empty() {
            return Err(LabelValidationError::EmptyName.into());
        }

        let changed = self.conn.execute(
            "UPDATE labels
             SET
                name = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE instance = ?2
               AND uuid = ?3;",
            params![name, self.instance.as_str(), id.to_string()],
        )?;

        Ok(changed > 0)
    }

    fn delete_label(&self, id: LabelId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM labels
             WHERE instance = ?1
               AND uuid = ?2;",
            params![self.instance.as_str(), id.to_string()],
        )?;

        Ok(changed > 0)
    }
}

fn parse_label_row(row: &Row<'_>) -> RepoResult<Label> {
    let id = parse_uuid_column(row, "uuid")?;
    let owner = parse_uuid_column(row, "owner")?;
    let item = parse_uuid_column(row, "item")?;

    let label = Label {
        id,
        owner,
        name: row.get("name")?,
        item,
    };
    label.validate()?;
    Ok(label)
}

fn parse_uuid_column(row: &Row<'_>, column: &'static str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in labels.{column}"))
    })
}
