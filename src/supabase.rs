//! Client for the hosted review table, spoken to over its PostgREST interface.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::db::{ReviewStore, REVIEWS_TABLE};
use crate::error::StoreError;
use crate::models::review::{NewReview, ReviewRow};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SupabaseStore {
    client: Client,
    table_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct StarsRow {
    stars: Option<i64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl SupabaseStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("reviewbox/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            table_url: format!(
                "{}/rest/v1/{}",
                base_url.trim_end_matches('/'),
                REVIEWS_TABLE
            ),
            api_key: api_key.to_string(),
        })
    }

    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T, StoreError> {
        let response = self
            .authorized(self.client.get(&self.table_url))
            .query(query)
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Turns a non-2xx reply into [`StoreError::Status`], keeping the service's message.
async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|error| error.message)
        .unwrap_or(body);

    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ReviewStore for SupabaseStore {
    fn name(&self) -> &'static str {
        "supabase"
    }

    async fn fetch_ratings_only(&self) -> Result<Vec<i64>, StoreError> {
        let rows: Vec<StarsRow> = self.select(&[("select", "stars")]).await?;
        debug!(rows = rows.len(), "Fetched ratings from hosted store");
        // rows written without a rating are not counted
        Ok(rows.into_iter().filter_map(|row| row.stars).collect())
    }

    async fn fetch_all_reviews(&self) -> Result<Vec<ReviewRow>, StoreError> {
        let reviews: Vec<ReviewRow> = self
            .select(&[("select", "*"), ("order", "created_at.desc.nullslast")])
            .await?;
        debug!(rows = reviews.len(), "Fetched reviews from hosted store");
        Ok(reviews)
    }

    async fn insert_review(&self, review: &NewReview) -> Result<(), StoreError> {
        let response = self
            .authorized(self.client.post(&self.table_url))
            .header("Prefer", "return=minimal")
            .json(review)
            .send()
            .await?;
        check_status(response).await?;
        debug!(name = %review.name, "Inserted review into hosted store");
        Ok(())
    }
}
