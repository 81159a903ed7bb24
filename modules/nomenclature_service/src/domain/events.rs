//! Domain events for the nomenclature service
//!
//! Every successful mutation publishes one event. The default publisher
//! writes them to the `nomenclature::audit` tracing target.

use crate::contract::{EntityKind, RecordId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Domain event types for nomenclature records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum NomenclatureEvent {
    /// Record was created
    Created(RecordChange),
    /// Record fields were replaced
    Updated(RecordChange),
    /// Record was deleted
    Deleted(RecordChange),
}

/// Which record changed and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordChange {
    /// Collection name
    pub collection: &'static str,
    /// Record id
    pub id: Uuid,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
}

impl RecordChange {
    fn new(kind: EntityKind, id: RecordId) -> Self {
        Self {
            collection: kind.collection(),
            id: id.as_uuid(),
            timestamp: Utc::now(),
        }
    }
}

impl NomenclatureEvent {
    pub fn created(kind: EntityKind, id: RecordId) -> Self {
        Self::Created(RecordChange::new(kind, id))
    }

    pub fn updated(kind: EntityKind, id: RecordId) -> Self {
        Self::Updated(RecordChange::new(kind, id))
    }

    pub fn deleted(kind: EntityKind, id: RecordId) -> Self {
        Self::Deleted(RecordChange::new(kind, id))
    }

    pub fn change(&self) -> &RecordChange {
        match self {
            Self::Created(change) | Self::Updated(change) | Self::Deleted(change) => change,
        }
    }

    fn action(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
            Self::Deleted(_) => "deleted",
        }
    }
}

/// Event publisher trait for publishing domain events
///
/// Publishing failures are logged by the service and never fail the
/// mutation that produced the event.
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: NomenclatureEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: NomenclatureEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes events to the audit log
pub struct TracingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: NomenclatureEvent) -> anyhow::Result<()> {
        let change = event.change();
        tracing::info!(
            target: "nomenclature::audit",
            action = event.action(),
            collection = change.collection,
            id = %change.id,
            at = %change.timestamp,
            "record {}",
            event.action()
        );
        Ok(())
    }
}
