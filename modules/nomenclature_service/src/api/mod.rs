//! API layer: REST surface plus the two `NomenclatureApi` clients

pub mod http;
pub mod native;
pub mod rest;
