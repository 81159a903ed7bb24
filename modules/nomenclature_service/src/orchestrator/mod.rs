//! CRUD orchestration for the entity pages
//!
//! [`CrudPage`] combines the form [`PageState`] machine, the loaded rows and
//! the reference resolver, and talks to the service through any
//! [`NomenclatureApi`](crate::contract::NomenclatureApi) implementation.

pub mod attachment;
pub mod page;
pub mod state;

pub use attachment::{encode_attachment, MAX_ATTACHMENT_BYTES};
pub use page::{CrudPage, Row};
pub use state::{PageState, Submission};
