//! Nomenclature Service Module
//!
//! Reference data of a proficiency-testing scheme: activities, PT scheme
//! objects, characteristics, quantities, standards and subcontractors.
//! Records reference each other by id; labels and dropdown filters are
//! resolved at read time.

// Public exports
pub mod contract;
pub use contract::{
    client::{ApiEntity, NomenclatureApi},
    error::NomenclatureError,
    Activity, Characteristic, EntityKind, PtSchemeObject, Quantity, Record, RecordId, Standard,
    Subcontractor,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::NomenclatureModule;

pub mod orchestrator;

pub mod api;
pub use api::{http::RestClient, native::NativeClient};

pub mod domain;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod infra;
