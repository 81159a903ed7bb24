//! Domain layer - business logic and services

pub mod events;
pub mod repository;
pub mod resolver;
pub mod service;
pub mod validation;

pub use events::{EventPublisher, NoOpEventPublisher, NomenclatureEvent, TracingEventPublisher};
pub use repository::{DocumentCodec, DocumentRepository, StoredDocument};
pub use resolver::{FilterPolicy, ReferenceIndex, Resolve, SelectOption, Snapshot, UNKNOWN};
pub use service::Service;
pub use validation::Validate;
