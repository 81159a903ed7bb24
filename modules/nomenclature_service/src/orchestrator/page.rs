//! Page controller: one entity list plus its create/edit form

use super::attachment::encode_attachment;
use super::state::{PageState, Submission};
use crate::config::Config;
use crate::contract::{
    Activity, ApiEntity, Characteristic, EntityKind, NomenclatureApi, NomenclatureError,
    PtSchemeObject, Record, RecordId,
};
use crate::domain::{FilterPolicy, ReferenceIndex, Resolve, SelectOption, Snapshot};
use std::sync::Arc;

/// A list row with its reference columns already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a, E> {
    pub record: &'a Record<E>,
    pub references: Vec<String>,
}

/// Drives one entity page against any [`NomenclatureApi`].
///
/// Every successful mutation is followed by a full reload; rows are never
/// patched locally.
pub struct CrudPage<E, A>
where
    E: ApiEntity + Resolve,
    A: NomenclatureApi,
{
    api: Arc<A>,
    policy: FilterPolicy,
    max_attachment_bytes: usize,
    state: PageState<E::Draft>,
    records: Vec<Record<E>>,
    snapshot: Snapshot,
    options: Vec<SelectOption>,
    alert: Option<String>,
}

async fn fetch_if<R, A>(api: &A, needed: bool) -> Result<Vec<Record<R>>, NomenclatureError>
where
    R: ApiEntity,
    A: NomenclatureApi,
{
    if needed {
        api.list::<R>().await
    } else {
        Ok(Vec::new())
    }
}

impl<E, A> CrudPage<E, A>
where
    E: ApiEntity + Resolve,
    A: NomenclatureApi,
{
    pub fn new(api: Arc<A>, config: &Config) -> Self {
        Self {
            api,
            policy: config.filter_policy(),
            max_attachment_bytes: config.max_attachment_bytes,
            state: PageState::default(),
            records: Vec::new(),
            snapshot: Snapshot::default(),
            options: Vec::new(),
            alert: None,
        }
    }

    /// Fetch the page's collection and every collection its labels need.
    ///
    /// All requests run concurrently and the first failure aborts the load;
    /// the previously loaded rows stay in place.
    pub async fn load(&mut self) -> Result<(), NomenclatureError> {
        let needs = |kind: EntityKind| E::REFERENCES.contains(&kind);
        let api = self.api.as_ref();

        let loaded = tokio::try_join!(
            api.list::<E>(),
            fetch_if::<Activity, A>(api, needs(EntityKind::Activity)),
            fetch_if::<PtSchemeObject, A>(api, needs(EntityKind::PtSchemeObject)),
            fetch_if::<Characteristic, A>(api, needs(EntityKind::Characteristic)),
        );

        match loaded {
            Ok((records, activities, objects, characteristics)) => {
                self.records = records;
                self.snapshot = Snapshot {
                    activities,
                    objects,
                    characteristics,
                };
                self.options = E::form_options(&ReferenceIndex::new(&self.snapshot), &self.policy);
                self.alert = None;
                tracing::debug!(
                    collection = %E::KIND,
                    rows = self.records.len(),
                    options = self.options.len(),
                    "page loaded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(collection = %E::KIND, error = %e, "page load failed");
                self.alert = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Loaded records, newest first, with resolved reference columns
    pub fn rows(&self) -> Vec<Row<'_, E>> {
        let index = ReferenceIndex::new(&self.snapshot);
        self.records
            .iter()
            .map(|record| Row {
                record,
                references: record.data.reference_columns(&index),
            })
            .collect()
    }

    pub fn records(&self) -> &[Record<E>] {
        &self.records
    }

    /// Choices for the form's reference field(s)
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn state(&self) -> &PageState<E::Draft> {
        &self.state
    }

    /// Editable form fields; `None` while a request is in flight
    pub fn draft_mut(&mut self) -> Option<&mut E::Draft> {
        self.state.draft_mut()
    }

    /// Page-level message from the last failed load or delete
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Prefill the form from an already loaded row
    pub fn start_edit(&mut self, id: RecordId) -> Result<(), NomenclatureError> {
        let draft = self
            .records
            .iter()
            .find(|record| record.id == id)
            .map(|record| record.data.to_draft())
            .ok_or_else(|| NomenclatureError::not_found(E::KIND, id))?;

        let state = std::mem::take(&mut self.state);
        self.state = state.start_edit(id, draft);
        Ok(())
    }

    pub fn cancel(&mut self) {
        let state = std::mem::take(&mut self.state);
        self.state = state.cancel();
    }

    /// Encode an uploaded file into the form's image/logo field
    pub fn attach(&mut self, mime: &str, bytes: &[u8]) -> Result<(), NomenclatureError> {
        let data_url = encode_attachment(mime, bytes, self.max_attachment_bytes)?;
        let draft = self
            .state
            .draft_mut()
            .ok_or_else(|| NomenclatureError::validation("A request is already in progress"))?;
        let slot = E::attachment_mut(draft)
            .ok_or_else(|| NomenclatureError::validation("This record has no attachment"))?;
        *slot = Some(data_url);
        Ok(())
    }

    /// Validate the form locally, then create or update.
    ///
    /// A failed local check never reaches the API. On success the form is
    /// cleared and the list reloaded; on failure the form keeps its fields.
    pub async fn submit(&mut self) -> Result<Record<E>, NomenclatureError> {
        let state = std::mem::take(&mut self.state);
        let (state, submission) = state.submit(|draft| {
            E::validate(draft)
                .map(drop)
                .map_err(|e| e.user_message())
        });
        self.state = state;

        let Some(submission) = submission else {
            let message = self
                .state
                .error()
                .unwrap_or("A request is already in progress")
                .to_string();
            return Err(NomenclatureError::validation(message));
        };

        let result = match submission {
            Submission::Create(draft) => self.api.create::<E>(draft).await,
            Submission::Update(id, draft) => self.api.update::<E>(id, draft).await,
        };

        let state = std::mem::take(&mut self.state);
        match result {
            Ok(record) => {
                self.state = state.submit_succeeded();
                tracing::info!(collection = %E::KIND, id = %record.id, "record saved");
                self.reload().await;
                Ok(record)
            }
            Err(e) => {
                self.state = state.submit_failed(e.user_message());
                Err(e)
            }
        }
    }

    /// Delete a record regardless of the form state.
    ///
    /// A record that is already gone counts as deleted.
    pub async fn delete(&mut self, id: RecordId) -> Result<(), NomenclatureError> {
        match self.api.delete::<E>(id).await {
            Ok(()) | Err(NomenclatureError::NotFound { .. }) => {}
            Err(e) => {
                self.alert = Some(e.user_message());
                return Err(e);
            }
        }

        let state = std::mem::take(&mut self.state);
        self.state = state.record_deleted(id);
        tracing::info!(collection = %E::KIND, id = %id, "record deleted");
        self.reload().await;
        Ok(())
    }

    /// Reload after a confirmed mutation; a failure only raises the alert
    async fn reload(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!(collection = %E::KIND, error = %e, "reload after mutation failed");
        }
    }
}
