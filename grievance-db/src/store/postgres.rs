//! Postgres storage backend.
//!
//! A newtype over a pooled sqlx connection. All SQL is runtime-checked
//! (`sqlx::query`, not `sqlx::query!`) so no live database is needed at
//! compile time, and every criterion or field value travels as a bind
//! parameter. The status transition is a single UPDATE statement, which is
//! the consistency boundary: concurrent transitions on one id cannot
//! interleave partial updates, and history appends commute.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::types::Json;
use sqlx::PgPool;

use grievance_core::{
    canonical_phone_key, HistoryEvent, NewSubmission, Official, Submission, SubmissionType,
    Urgency, DEFAULT_STATUS, OFFICIAL_RESPONSE_DELIMITER, RESOLVED_STATUS,
};

use crate::error::{StoreError, StoreResult};
use crate::filter::{FilterOp, Predicate, SubmissionFilter, MAX_RESULTS};
use crate::schema::GRIEVANCE_SCHEMA;
use crate::store::{OfficialDirectory, SubmissionStore};

/// Unique-violation SQLSTATE, raised on duplicate submission ids.
const UNIQUE_VIOLATION: &str = "23505";

const SUBMISSION_COLUMNS: &str = "id, type, name, phone, email, department, category, \
     taluk, firka, village, description, urgency, status, photos, history, \
     timestamp, last_updated, resolved_at";

/// Postgres-backed submission store and official directory.
pub struct PgGrievanceStore {
    pool: PgPool,
}

impl PgGrievanceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool from a connection string.
    ///
    /// `require_tls` forces encrypted transport to the database regardless
    /// of what the connection string says.
    pub async fn connect(database_url: &str, require_tls: bool) -> StoreResult<Self> {
        let mut options = PgConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        if require_tls {
            options = options.ssl_mode(PgSslMode::Require);
        }

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        tracing::info!(require_tls, "connected to grievance database");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the submissions/officials tables if absent.
    pub async fn init_schema(&self) -> StoreResult<()> {
        for statement in GRIEVANCE_SCHEMA
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        tracing::debug!("grievance schema initialized");
        Ok(())
    }
}

/// Raw row shape; converted into the domain type after fetching.
#[derive(sqlx::FromRow)]
struct PgSubmissionRow {
    id: String,
    #[sqlx(rename = "type")]
    kind: String,
    name: String,
    phone: String,
    email: Option<String>,
    department: Option<String>,
    category: Option<String>,
    taluk: String,
    firka: String,
    village: String,
    description: String,
    urgency: String,
    status: String,
    photos: Json<Vec<String>>,
    history: Json<Vec<HistoryEvent>>,
    timestamp: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl TryFrom<PgSubmissionRow> for Submission {
    type Error = StoreError;

    fn try_from(row: PgSubmissionRow) -> Result<Self, Self::Error> {
        let kind = SubmissionType::parse(&row.kind).ok_or_else(|| {
            StoreError::Backend(format!("stored submission {} has type {:?}", row.id, row.kind))
        })?;
        let urgency = Urgency::parse(&row.urgency).ok_or_else(|| {
            StoreError::Backend(format!(
                "stored submission {} has urgency {:?}",
                row.id, row.urgency
            ))
        })?;

        Ok(Submission {
            id: row.id,
            kind,
            name: row.name,
            phone: row.phone,
            email: row.email,
            department: row.department,
            category: row.category,
            taluk: row.taluk,
            firka: row.firka,
            village: row.village,
            description: row.description,
            urgency,
            status: row.status,
            photos: row.photos.0,
            history: row.history.0,
            timestamp: row.timestamp,
            last_updated: row.last_updated,
            resolved_at: row.resolved_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PgOfficialRow {
    id: i32,
    username: String,
    password: String,
}

impl From<PgOfficialRow> for Official {
    fn from(row: PgOfficialRow) -> Self {
        Official {
            id: row.id,
            username: row.username,
            password: row.password,
        }
    }
}

/// Compile predicates into a listing statement.
///
/// Column names come from the fixed [`crate::FilterField::column`] table and
/// operators from the predicate tags; values are bound afterwards, one
/// placeholder per predicate.
fn build_list_sql(predicates: &[Predicate]) -> String {
    let mut sql = format!("select {SUBMISSION_COLUMNS} from submissions");
    for (i, predicate) in predicates.iter().enumerate() {
        let n = i + 1;
        sql.push_str(if i == 0 { " where " } else { " and " });
        match predicate.op {
            FilterOp::Eq => {
                sql.push_str(&format!("{} = ${n}", predicate.field.column()));
            }
            FilterOp::ContainsFolded => {
                sql.push_str(&format!(
                    "(lower(id) like ${n} or lower(description) like ${n})"
                ));
            }
        }
    }
    sql.push_str(&format!(
        " order by last_updated desc, timestamp desc limit {MAX_RESULTS}"
    ));
    sql
}

#[async_trait]
impl SubmissionStore for PgGrievanceStore {
    async fn create(&self, new: &NewSubmission) -> StoreResult<Submission> {
        let kind = SubmissionType::parse(&new.kind)
            .ok_or_else(|| StoreError::Validation(format!("invalid type: {:?}", new.kind)))?;
        let urgency = Urgency::parse(&new.urgency)
            .ok_or_else(|| StoreError::Validation(format!("invalid urgency: {:?}", new.urgency)))?;
        let status = new
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STATUS);

        let sql = format!(
            "insert into submissions \
               (id, type, name, phone, email, department, category, taluk, firka, \
                village, description, urgency, status, photos, history, \
                timestamp, last_updated, resolved_at) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
                jsonb_build_array(jsonb_build_object( \
                    'timestamp', to_jsonb(now()), 'status', $13::text, 'response', null)), \
                now(), now(), null) \
             returning {SUBMISSION_COLUMNS}"
        );

        let row = sqlx::query_as::<_, PgSubmissionRow>(&sql)
            .bind(&new.id)
            .bind(kind.as_str())
            .bind(&new.name)
            .bind(&new.phone)
            .bind(&new.email)
            .bind(&new.department)
            .bind(&new.category)
            .bind(&new.taluk)
            .bind(&new.firka)
            .bind(&new.village)
            .bind(&new.description)
            .bind(urgency.as_str())
            .bind(status)
            .bind(Json(&new.photos))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                    StoreError::DuplicateId(new.id.clone())
                }
                _ => StoreError::Backend(e.to_string()),
            })?;

        row.try_into()
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Submission>> {
        let sql = format!("select {SUBMISSION_COLUMNS} from submissions where id = $1 limit 1");
        sqlx::query_as::<_, PgSubmissionRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .map(Submission::try_from)
            .transpose()
    }

    async fn get_by_id_and_phone(
        &self,
        id: &str,
        phone: &str,
    ) -> StoreResult<Option<Submission>> {
        // The stored phone is normalized on the database side with the same
        // rule canonical_phone_key applies to the supplied one: digits only,
        // last ten kept.
        let sql = format!(
            "select {SUBMISSION_COLUMNS} from submissions \
             where lower(id) = lower($1) \
               and right(regexp_replace(phone, '[^0-9]', '', 'g'), 10) = $2 \
             limit 1"
        );
        sqlx::query_as::<_, PgSubmissionRow>(&sql)
            .bind(id)
            .bind(canonical_phone_key(phone))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .map(Submission::try_from)
            .transpose()
    }

    async fn list(&self, filter: &SubmissionFilter) -> StoreResult<Vec<Submission>> {
        let predicates = filter.predicates();
        let sql = build_list_sql(&predicates);

        let mut query = sqlx::query_as::<_, PgSubmissionRow>(&sql);
        for predicate in &predicates {
            query = match predicate.op {
                FilterOp::Eq => query.bind(predicate.value.clone()),
                FilterOp::ContainsFolded => {
                    query.bind(format!("%{}%", predicate.value.to_lowercase()))
                }
            };
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .into_iter()
            .map(Submission::try_from)
            .collect()
    }

    async fn transition_status(
        &self,
        id: &str,
        status: &str,
        response: Option<&str>,
    ) -> StoreResult<()> {
        let sql = format!(
            "update submissions set \
               status = $2, \
               last_updated = now(), \
               description = case when $3::text is not null \
                   then description || $4 || $3 else description end, \
               history = history || jsonb_build_object( \
                   'timestamp', to_jsonb(now()), 'status', $2::text, 'response', $3::text), \
               resolved_at = case when $2 = '{RESOLVED_STATUS}' \
                   then coalesce(resolved_at, now()) else resolved_at end \
             where id = $1"
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(status)
            .bind(response)
            .bind(OFFICIAL_RESPONSE_DELIMITER)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("select 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl OfficialDirectory for PgGrievanceStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Official>> {
        let row = sqlx::query_as::<_, PgOfficialRow>(
            "select id, username, password from officials where username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(row.map(Official::from))
    }

    async fn seed_official(&self, username: &str, password: &str) -> StoreResult<()> {
        let result = sqlx::query(
            "insert into officials (username, password) values ($1, $2) \
             on conflict (username) do nothing",
        )
        .bind(username)
        .bind(password)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        if result.rows_affected() > 0 {
            tracing::info!(username, "seeded bootstrap official account");
        }
        Ok(())
    }
}
