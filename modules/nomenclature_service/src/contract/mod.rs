//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::{ApiEntity, NomenclatureApi};
pub use error::NomenclatureError;
pub use model::{
    Activity, ActivityDraft, Characteristic, CharacteristicDraft, Entity, EntityKind,
    PtSchemeObject, PtSchemeObjectDraft, Quantity, QuantityDraft, Record, RecordId, Standard,
    StandardDraft, Subcontractor, SubcontractorDraft,
};
