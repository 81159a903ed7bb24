//! Page orchestration over the in-process client

use async_trait::async_trait;
use nomenclature_service::contract::*;
use nomenclature_service::domain::UNKNOWN;
use nomenclature_service::orchestrator::{CrudPage, PageState};
use nomenclature_service::{Config, NativeClient};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod common;
use common::*;

/// Counts every request that reaches the API
struct CountingApi {
    inner: NativeClient,
    calls: AtomicUsize,
}

impl CountingApi {
    fn new(env: &TestEnv) -> Arc<Self> {
        Arc::new(Self {
            inner: NativeClient::new(env.service.clone()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl NomenclatureApi for CountingApi {
    async fn list<E: ApiEntity>(&self) -> Result<Vec<Record<E>>, NomenclatureError> {
        self.hit();
        self.inner.list::<E>().await
    }

    async fn create<E: ApiEntity>(&self, draft: E::Draft) -> Result<Record<E>, NomenclatureError> {
        self.hit();
        self.inner.create::<E>(draft).await
    }

    async fn update<E: ApiEntity>(
        &self,
        id: RecordId,
        draft: E::Draft,
    ) -> Result<Record<E>, NomenclatureError> {
        self.hit();
        self.inner.update::<E>(id, draft).await
    }

    async fn delete<E: ApiEntity>(&self, id: RecordId) -> Result<(), NomenclatureError> {
        self.hit();
        self.inner.delete::<E>(id).await
    }
}

fn open_page<E: ApiEntity + nomenclature_service::domain::Resolve>(
    env: &TestEnv,
) -> CrudPage<E, NativeClient> {
    CrudPage::new(Arc::new(NativeClient::new(env.service.clone())), &Config::default())
}

fn labels<E, A>(page: &CrudPage<E, A>) -> Vec<String>
where
    E: ApiEntity + nomenclature_service::domain::Resolve,
    A: NomenclatureApi,
{
    page.options().iter().map(|o| o.label.clone()).collect()
}

#[tokio::test]
async fn test_quantity_dropdown_follows_the_calibration_activity() {
    print_test_header(
        "test_quantity_dropdown_follows_the_calibration_activity",
        "Only objects under Калибриране are offered on the quantity page",
    );
    let env = mock_env();

    let mut activities = open_page::<Activity>(&env);
    *activities.draft_mut().unwrap() = activity("Калибриране", "Calibration");
    let calibration = activities.submit().await.unwrap();

    let mut objects = open_page::<PtSchemeObject>(&env);
    objects.load().await.unwrap();
    assert_eq!(labels(&objects), ["Калибриране"]);
    *objects.draft_mut().unwrap() = object("Везна", calibration.id);
    let scale = objects.submit().await.unwrap();

    let mut quantities = open_page::<Quantity>(&env);
    quantities.load().await.unwrap();
    assert_eq!(quantities.options().len(), 1);
    assert_eq!(quantities.options()[0].id, scale.id);
    assert_eq!(labels(&quantities), ["Везна – Калибриране"]);

    *activities.draft_mut().unwrap() = activity("Изпитване", "Testing");
    let testing = activities.submit().await.unwrap();
    *objects.draft_mut().unwrap() = object("Пещ", testing.id);
    objects.submit().await.unwrap();

    quantities.load().await.unwrap();
    assert_eq!(labels(&quantities), ["Везна – Калибриране"]);
}

#[tokio::test]
async fn test_standard_dropdown_walks_to_the_activity() {
    let env = mock_env();
    let sampling = env
        .service
        .create::<Activity>(activity("Вземане на проба", "Sampling"))
        .await
        .unwrap();
    let calibration = env
        .service
        .create::<Activity>(activity("Калибриране", "Calibration"))
        .await
        .unwrap();
    let water = env
        .service
        .create::<PtSchemeObject>(object("Вода", sampling.id))
        .await
        .unwrap();
    let scale = env
        .service
        .create::<PtSchemeObject>(object("Везна", calibration.id))
        .await
        .unwrap();
    env.service
        .create::<Characteristic>(characteristic("pH", "-", water.id))
        .await
        .unwrap();
    env.service
        .create::<Characteristic>(characteristic("Маса", "kg", scale.id))
        .await
        .unwrap();

    let mut standards = open_page::<Standard>(&env);
    standards.load().await.unwrap();

    assert_eq!(labels(&standards), ["pH (-)"]);
}

#[tokio::test]
async fn test_deleted_parent_renders_as_unknown() {
    print_test_header(
        "test_deleted_parent_renders_as_unknown",
        "A dangling activity reference degrades to the sentinel without failing the list",
    );
    let env = mock_env();
    let mut activities = open_page::<Activity>(&env);
    *activities.draft_mut().unwrap() = activity("Калибриране", "Calibration");
    let calibration = activities.submit().await.unwrap();

    let mut objects = open_page::<PtSchemeObject>(&env);
    *objects.draft_mut().unwrap() = object("Везна", calibration.id);
    objects.submit().await.unwrap();
    assert_eq!(objects.rows()[0].references, ["Калибриране"]);

    activities.delete(calibration.id).await.unwrap();
    objects.load().await.unwrap();

    let rows = objects.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].references, [UNKNOWN]);

    let mut quantities = open_page::<Quantity>(&env);
    quantities.load().await.unwrap();
    assert!(quantities.options().is_empty());
}

#[tokio::test]
async fn test_invalid_submit_makes_no_request() {
    let env = mock_env();
    let api = CountingApi::new(&env);
    let mut page: CrudPage<Characteristic, CountingApi> =
        CrudPage::new(api.clone(), &Config::default());

    *page.draft_mut().unwrap() = characteristic("Маса", "", RecordId::new());
    let err = page.submit().await.unwrap_err();

    assert_eq!(err, NomenclatureError::validation("Unit is required"));
    assert_eq!(page.state().error(), Some("Unit is required"));
    assert_eq!(page.state().draft().name_bg, "Маса");
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn test_successful_submit_clears_form_and_reloads() {
    let env = mock_env();
    let api = CountingApi::new(&env);
    let mut page: CrudPage<Activity, CountingApi> = CrudPage::new(api.clone(), &Config::default());

    *page.draft_mut().unwrap() = activity("Изпитване", "Testing");
    page.submit().await.unwrap();

    assert_eq!(page.state(), &PageState::default());
    assert_eq!(page.records().len(), 1);
    // create + reload of the page's own collection
    assert_eq!(api.calls(), 2);
}

#[tokio::test]
async fn test_edit_flow_updates_in_place() {
    let env = mock_env();
    let mut page = open_page::<Standard>(&env);
    let characteristic_id = RecordId::new();
    *page.draft_mut().unwrap() = standard("ISO 17025", characteristic_id);
    let created = page.submit().await.unwrap();

    page.start_edit(created.id).unwrap();
    assert_eq!(page.state().target(), Some(created.id));
    assert_eq!(page.state().draft().name_bg, "ISO 17025");

    page.draft_mut().unwrap().name_bg = "ISO 9001".to_string();
    let updated = page.submit().await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(page.records().len(), 1);
    assert_eq!(page.records()[0].data.name_bg, "ISO 9001");
    assert_eq!(page.state().target(), None);
}

#[tokio::test]
async fn test_start_edit_of_unknown_row_fails() {
    let env = mock_env();
    let mut page = open_page::<Activity>(&env);
    page.load().await.unwrap();

    assert!(matches!(
        page.start_edit(RecordId::new()),
        Err(NomenclatureError::NotFound { .. })
    ));
    assert_eq!(page.state(), &PageState::default());
}

#[tokio::test]
async fn test_cancel_discards_edit() {
    let env = mock_env();
    let mut page = open_page::<Activity>(&env);
    *page.draft_mut().unwrap() = activity("Изпитване", "Testing");
    let created = page.submit().await.unwrap();

    page.start_edit(created.id).unwrap();
    page.draft_mut().unwrap().name_en = "changed".to_string();
    page.cancel();

    assert_eq!(page.state(), &PageState::default());
    assert_eq!(
        env.service.get::<Activity>(created.id).await.unwrap().data.name_en,
        "Testing"
    );
}

#[tokio::test]
async fn test_deleting_the_edited_record_resets_the_form() {
    let env = mock_env();
    let mut page = open_page::<Activity>(&env);
    for name in ["A", "B"] {
        *page.draft_mut().unwrap() = activity(name, name);
        page.submit().await.unwrap();
    }
    let edited = page.records()[0].id;
    let other = page.records()[1].id;

    page.start_edit(edited).unwrap();
    page.delete(other).await.unwrap();
    assert_eq!(page.state().target(), Some(edited));

    page.delete(edited).await.unwrap();
    assert_eq!(page.state(), &PageState::default());
    assert!(page.records().is_empty());
}

#[tokio::test]
async fn test_failed_submit_keeps_the_form() {
    let env = mock_env();
    let mut page = open_page::<Activity>(&env);
    *page.draft_mut().unwrap() = activity("Изпитване", "Testing");
    env.repo.set_failing(true);

    let err = page.submit().await.unwrap_err();

    assert_eq!(err, NomenclatureError::Internal);
    assert_eq!(page.state().error(), Some("Unexpected server error"));
    assert_eq!(page.state().draft(), &activity("Изпитване", "Testing"));

    // Retry once the store is back
    env.repo.set_failing(false);
    page.submit().await.unwrap();
    assert_eq!(page.records().len(), 1);
}

#[tokio::test]
async fn test_failed_load_keeps_previous_rows() {
    let env = mock_env();
    let mut page = open_page::<PtSchemeObject>(&env);
    let activity_record = env
        .service
        .create::<Activity>(activity("Калибриране", "Calibration"))
        .await
        .unwrap();
    env.service
        .create::<PtSchemeObject>(object("Везна", activity_record.id))
        .await
        .unwrap();
    page.load().await.unwrap();

    env.repo.set_failing(true);
    assert!(page.load().await.is_err());

    assert_eq!(page.alert(), Some("Unexpected server error"));
    assert_eq!(page.records().len(), 1);
    assert_eq!(page.options().len(), 1);
}

#[tokio::test]
async fn test_attachment_is_encoded_into_the_form() {
    let env = mock_env();
    let mut page = open_page::<Subcontractor>(&env);

    page.attach("image/png", b"\x89PNG").unwrap();
    assert_eq!(
        page.state().draft().logo.as_deref(),
        Some("data:image/png;base64,iVBORw==")
    );

    let oversized = vec![0u8; 2 * 1024 * 1024 + 1];
    let err = page.attach("image/png", &oversized).unwrap_err();
    assert_eq!(err.user_message(), "Файлът е твърде голям (макс 2MB).");

    let mut activities = open_page::<Activity>(&env);
    assert!(activities.attach("image/png", b"x").is_err());
}
