//! SeaORM repository implementations

use crate::contract::{EntityKind, RecordId};
use crate::domain::repository::{DocumentRepository, StoredDocument};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity;

// ===== Document Repository =====

pub struct SeaOrmDocumentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmDocumentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

async fn find_model<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    id: RecordId,
) -> Result<Option<entity::Model>> {
    let model = entity::Entity::find()
        .filter(entity::Column::Collection.eq(kind.collection()))
        .filter(entity::Column::Id.eq(id.as_uuid()))
        .one(conn)
        .await?;
    Ok(model)
}

#[async_trait]
impl DocumentRepository for SeaOrmDocumentRepository {
    async fn insert(&self, kind: EntityKind, body: serde_json::Value) -> Result<StoredDocument> {
        let now = chrono::Utc::now();
        let active = entity::ActiveModel {
            seq: NotSet,
            id: Set(Uuid::new_v4()),
            collection: Set(kind.collection().to_string()),
            body: Set(body),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(&*self.db).await?;
        Ok(model.into())
    }

    async fn find(&self, kind: EntityKind, id: RecordId) -> Result<Option<StoredDocument>> {
        Ok(find_model(&*self.db, kind, id).await?.map(Into::into))
    }

    async fn replace(
        &self,
        kind: EntityKind,
        id: RecordId,
        body: serde_json::Value,
    ) -> Result<Option<StoredDocument>> {
        let txn = self.db.begin().await?;

        let Some(existing) = find_model(&txn, kind, id).await? else {
            txn.rollback().await?;
            return Ok(None);
        };

        let mut active: entity::ActiveModel = existing.into();
        active.body = Set(body);
        active.updated_at = Set(chrono::Utc::now());
        let model = active.update(&txn).await?;

        txn.commit().await?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, kind: EntityKind, id: RecordId) -> Result<bool> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::Collection.eq(kind.collection()))
            .filter(entity::Column::Id.eq(id.as_uuid()))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn list_all(&self, kind: EntityKind) -> Result<Vec<StoredDocument>> {
        let results = entity::Entity::find()
            .filter(entity::Column::Collection.eq(kind.collection()))
            .order_by_desc(entity::Column::Seq)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn count(&self, kind: EntityKind) -> Result<u64> {
        let count = entity::Entity::find()
            .filter(entity::Column::Collection.eq(kind.collection()))
            .count(&*self.db)
            .await?;

        Ok(count)
    }
}
