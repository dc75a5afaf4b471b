use async_trait::async_trait;
use friends_common::{AccountId, FriendEntry, RelationshipRecord};
use sqlx::{migrate::Migrator, types::Json, FromRow, PgExecutor, PgPool};

use super::{error::RelationshipStoreError, traits::RelationshipStore};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(FromRow)]
struct RecordRow {
    account_id: String,
    incoming: Json<Vec<FriendEntry>>,
    outgoing: Json<Vec<FriendEntry>>,
    accepted: Json<Vec<FriendEntry>>,
    blocked: Json<Vec<FriendEntry>>,
}

impl From<RecordRow> for RelationshipRecord {
    fn from(row: RecordRow) -> Self {
        RelationshipRecord::builder()
            .account_id(row.account_id)
            .incoming(row.incoming.0)
            .outgoing(row.outgoing.0)
            .accepted(row.accepted.0)
            .blocked(row.blocked.0)
            .build()
    }
}

/// One row per account, each list a JSONB column.
#[derive(Clone)]
pub struct PostgresRelationshipStore {
    pool: PgPool,
}

impl PostgresRelationshipStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, RelationshipStoreError> {
        let pool = PgPool::connect(database_url).await?;
        MIGRATOR.run(&pool).await?;
        Ok(Self::new(pool))
    }
}

async fn update<'e>(
    executor: impl PgExecutor<'e>,
    record: &RelationshipRecord,
) -> Result<(), RelationshipStoreError> {
    let result = sqlx::query(
        "UPDATE relationships
         SET incoming = $2, outgoing = $3, accepted = $4, blocked = $5
         WHERE account_id = $1",
    )
    .bind(record.account_id().as_ref())
    .bind(Json(record.incoming()))
    .bind(Json(record.outgoing()))
    .bind(Json(record.accepted()))
    .bind(Json(record.blocked()))
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RelationshipStoreError::AccountNotFound(
            record.account_id().clone(),
        ));
    }
    Ok(())
}

#[async_trait]
impl RelationshipStore for PostgresRelationshipStore {
    async fn create(
        &mut self,
        account_id: &AccountId,
    ) -> Result<RelationshipRecord, RelationshipStoreError> {
        sqlx::query("INSERT INTO relationships (account_id) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(account_id.as_ref())
            .execute(&self.pool)
            .await?;
        self.get(account_id).await
    }

    async fn get(
        &self,
        account_id: &AccountId,
    ) -> Result<RelationshipRecord, RelationshipStoreError> {
        sqlx::query_as::<_, RecordRow>(
            "SELECT account_id, incoming, outgoing, accepted, blocked
             FROM relationships
             WHERE account_id = $1",
        )
        .bind(account_id.as_ref())
        .fetch_optional(&self.pool)
        .await?
        .map(RelationshipRecord::from)
        .ok_or_else(|| RelationshipStoreError::AccountNotFound(account_id.clone()))
    }

    async fn save(&mut self, record: &RelationshipRecord) -> Result<(), RelationshipStoreError> {
        update(&self.pool, record).await
    }

    /// Both rows commit together or not at all.
    async fn save_pair(
        &mut self,
        first: &RelationshipRecord,
        second: &RelationshipRecord,
    ) -> Result<(), RelationshipStoreError> {
        let mut tx = self.pool.begin().await?;
        update(&mut *tx, first).await?;
        update(&mut *tx, second).await?;
        tx.commit().await?;
        Ok(())
    }
}
