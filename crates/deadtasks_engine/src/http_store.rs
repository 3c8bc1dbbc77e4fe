use std::time::Duration;

use chrono::{DateTime, Utc};
use console_logging::console_debug;
use deadtasks_core::{DeadTask, DeadTaskPage, PageRequest};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::{StoreError, TaskStore};

#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Root of the monitoring API, e.g. `http://localhost:8080/`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListDeadTasksResponse {
    tasks: Vec<WireDeadTask>,
    stats: WireQueueStats,
}

#[derive(Debug, Deserialize)]
struct WireQueueStats {
    dead: usize,
}

#[derive(Debug, Deserialize)]
struct WireDeadTask {
    id: String,
    key: String,
    #[serde(rename = "type")]
    task_type: String,
    #[serde(default)]
    payload: Value,
    last_failed_at: DateTime<Utc>,
    #[serde(default)]
    error_message: String,
}

impl From<WireDeadTask> for DeadTask {
    fn from(wire: WireDeadTask) -> Self {
        DeadTask {
            id: wire.id,
            key: wire.key,
            task_type: wire.task_type,
            payload: wire.payload,
            last_failed_at: wire.last_failed_at,
            error_message: wire.error_message,
            request_pending: false,
        }
    }
}

/// Task store backed by the queue monitor's REST API.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpTaskStore {
    pub fn new(settings: StoreSettings) -> Result<Self, StoreError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| StoreError::InvalidBaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl(settings.base_url));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| StoreError::Network(err.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// `{base}/api/queues/{queue}/dead_tasks[/{key}]`, with segments escaped.
    fn dead_tasks_url(&self, queue: &str, key: Option<&str>) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| StoreError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["api", "queues", queue, "dead_tasks"]);
            if let Some(key) = key {
                segments.push(key);
            }
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl TaskStore for HttpTaskStore {
    async fn list_dead_tasks(
        &self,
        queue: &str,
        page: PageRequest,
    ) -> Result<DeadTaskPage, StoreError> {
        let mut url = self.dead_tasks_url(queue, None)?;
        url.query_pairs_mut()
            .append_pair("page", &page.page.to_string())
            .append_pair("size", &page.size.to_string());
        console_debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        let decoded: ListDeadTasksResponse =
            serde_json::from_str(&body).map_err(|err| StoreError::Decode(err.to_string()))?;

        Ok(DeadTaskPage {
            tasks: decoded.tasks.into_iter().map(DeadTask::from).collect(),
            total_count: decoded.stats.dead,
        })
    }

    async fn delete_dead_task(&self, queue: &str, key: &str) -> Result<(), StoreError> {
        let url = self.dead_tasks_url(queue, Some(key))?;
        console_debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(StoreError::HttpStatus(status.as_u16()))
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        return StoreError::Timeout;
    }
    if err.is_decode() {
        return StoreError::Decode(err.to_string());
    }
    StoreError::Network(err.to_string())
}
