//! PostgreSQL Repository Implementation

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::IdentityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::identity::{Identity, NewIdentity};
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{
    auth_provider::AuthProvider, birth_date::BirthDate, credential::CredentialHash, display_name::DisplayName,
    email::Email, lifecycle::Lifecycle,
};
use crate::error::{IdentityError, IdentityResult};

const IDENTITY_COLUMNS: &str = r#"
    identity_id,
    name,
    email,
    credential_hash,
    auth_provider,
    avatar_ref,
    date_of_birth,
    created_at,
    updated_at,
    deleted_at
"#;

/// PostgreSQL-backed identity repository
#[derive(Clone)]
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Drop every table owned by the service, including the migration ledger
    pub async fn drop_tables(&self) -> IdentityResult<()> {
        sqlx::query("DROP TABLE IF EXISTS identities, _sqlx_migrations CASCADE")
            .execute(&self.pool)
            .await?;

        tracing::warn!("Dropped identity tables");

        Ok(())
    }
}

impl IdentityRepository for PgIdentityRepository {
    async fn create(&self, new: &NewIdentity) -> IdentityResult<Identity> {
        let sql = format!(
            r#"
            INSERT INTO identities (
                identity_id,
                name,
                email,
                credential_hash,
                auth_provider,
                avatar_ref,
                date_of_birth
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {IDENTITY_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, IdentityRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(new.name.as_ref().map(|n| n.as_str()))
            .bind(new.email.as_str())
            .bind(new.credential.as_db_str())
            .bind(new.auth_provider.code())
            .bind(new.avatar_ref.as_deref())
            .bind(new.date_of_birth.map(|d| d.date()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    IdentityError::Conflict
                }
                other => IdentityError::Database(other),
            })?;

        row.into_identity()
    }

    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<Identity>> {
        let sql = format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE email = $1 AND deleted_at IS NULL"
        );

        let row = sqlx::query_as::<_, IdentityRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_identity()).transpose()
    }

    async fn find_by_id(&self, id: &IdentityId) -> IdentityResult<Option<Identity>> {
        let sql = format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE identity_id = $1 AND deleted_at IS NULL"
        );

        let row = sqlx::query_as::<_, IdentityRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_identity()).transpose()
    }

    async fn count(&self) -> IdentityResult<u64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM identities WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn page(&self, offset: u64, limit: u64) -> IdentityResult<Vec<Identity>> {
        let sql = format!(
            r#"
            SELECT {IDENTITY_COLUMNS}
            FROM identities
            WHERE deleted_at IS NULL
            ORDER BY created_at, identity_id
            LIMIT $1 OFFSET $2
            "#
        );

        let rows = sqlx::query_as::<_, IdentityRow>(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_identity()).collect()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct IdentityRow {
    identity_id: Uuid,
    name: Option<String>,
    email: String,
    credential_hash: String,
    auth_provider: String,
    avatar_ref: Option<String>,
    date_of_birth: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl IdentityRow {
    fn into_identity(self) -> IdentityResult<Identity> {
        let auth_provider = AuthProvider::from_code(&self.auth_provider).map_err(|_| {
            IdentityError::Internal(format!("Invalid auth_provider: {}", self.auth_provider))
        })?;

        Ok(Identity {
            id: IdentityId::from_uuid(self.identity_id),
            name: self.name.map(DisplayName::from_db),
            email: Email::from_db(self.email),
            credential: CredentialHash::from_db(self.credential_hash),
            auth_provider,
            avatar_ref: self.avatar_ref,
            date_of_birth: self.date_of_birth.map(BirthDate::from_db),
            created_at: self.created_at,
            updated_at: self.updated_at,
            lifecycle: Lifecycle::from_db(self.deleted_at),
        })
    }
}
