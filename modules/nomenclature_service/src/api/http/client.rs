//! REST client - `NomenclatureApi` over the HTTP surface served by `api::rest`

use crate::api::rest::dto::ErrorMessage;
use crate::config::Config;
use crate::contract::{ApiEntity, NomenclatureApi, NomenclatureError, Record, RecordId};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// HTTP client for a remote nomenclature service.
///
/// Every request is bounded by the configured timeout; an expired request
/// surfaces as a transport error instead of hanging the caller.
#[derive(Clone, Debug)]
pub struct RestClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RestClient {
    /// `base_url` is the prefix the collections are mounted under,
    /// e.g. `http://localhost:5001/api`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Client bounded by `config.request_timeout`
    pub fn from_config(base_url: impl Into<String>, config: &Config) -> anyhow::Result<Self> {
        Self::new(base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn collection_url<E: ApiEntity>(&self) -> String {
        format!("{}/{}", self.base_url, E::KIND.collection())
    }

    fn record_url<E: ApiEntity>(&self, id: RecordId) -> String {
        format!("{}/{}/{}", self.base_url, E::KIND.collection(), id)
    }
}

fn transport(error: reqwest::Error) -> NomenclatureError {
    if error.is_timeout() {
        tracing::warn!(error = %error, "nomenclature request timed out");
        NomenclatureError::transport("Request timed out")
    } else {
        tracing::warn!(error = %error, "nomenclature request failed");
        NomenclatureError::transport(error.to_string())
    }
}

/// Turn a non-success response into the matching error
async fn failure<E: ApiEntity>(response: Response, id: Option<RecordId>) -> NomenclatureError {
    match response.status() {
        StatusCode::BAD_REQUEST => {
            let message = response
                .json::<ErrorMessage>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| "Invalid request".to_string());
            NomenclatureError::validation(message)
        }
        StatusCode::NOT_FOUND => match id {
            Some(id) => NomenclatureError::not_found(E::KIND, id),
            None => NomenclatureError::not_found(E::KIND, E::KIND.collection()),
        },
        status => NomenclatureError::transport(format!("server responded with {status}")),
    }
}

async fn decode<T>(response: Response) -> Result<T, NomenclatureError>
where
    T: serde::de::DeserializeOwned,
{
    response.json::<T>().await.map_err(transport)
}

#[async_trait]
impl NomenclatureApi for RestClient {
    async fn list<E: ApiEntity>(&self) -> Result<Vec<Record<E>>, NomenclatureError> {
        let response = self
            .client
            .get(self.collection_url::<E>())
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(failure::<E>(response, None).await);
        }

        let items: Vec<E::Dto> = decode(response).await?;
        Ok(items.into_iter().map(E::from_dto).collect())
    }

    async fn create<E: ApiEntity>(&self, draft: E::Draft) -> Result<Record<E>, NomenclatureError> {
        let response = self
            .client
            .post(self.collection_url::<E>())
            .json(&E::to_request(&draft))
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(failure::<E>(response, None).await);
        }

        let dto: E::Dto = decode(response).await?;
        Ok(E::from_dto(dto))
    }

    async fn update<E: ApiEntity>(
        &self,
        id: RecordId,
        draft: E::Draft,
    ) -> Result<Record<E>, NomenclatureError> {
        let response = self
            .client
            .put(self.record_url::<E>(id))
            .json(&E::to_request(&draft))
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(failure::<E>(response, Some(id)).await);
        }

        let dto: E::Dto = decode(response).await?;
        Ok(E::from_dto(dto))
    }

    /// The server answers 204 for absent ids, so this never reports NotFound
    async fn delete<E: ApiEntity>(&self, id: RecordId) -> Result<(), NomenclatureError> {
        let response = self
            .client
            .delete(self.record_url::<E>(id))
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(failure::<E>(response, Some(id)).await);
        }
        Ok(())
    }
}
