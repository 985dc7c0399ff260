// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! COROS Training Hub client for exporting the activity snapshot.
//!
//! Handles:
//! - Credentials from a raw token or a browser cookie export
//! - Paged activity listing with the team API access token
//! - Envelope error detection (expired tokens surface as `CorosApi`)
//! - Mapping COROS activities to snapshot records

use crate::error::AppError;
use crate::models::{ActivityRecord, DateKey};
use serde::Deserialize;
use std::time::Duration;

/// Activities per page requested from COROS.
pub const PAGE_SIZE: u32 = 20;

/// Session cookie holding the access token.
pub const TOKEN_COOKIE: &str = "CPL-coros-token";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const TRAINING_HUB_ORIGIN: &str = "https://t.coros.com";

/// Credentials for the team API.
#[derive(Debug, Clone, PartialEq)]
pub struct CorosAuth {
    pub access_token: String,
    /// `Cookie` header replayed from a logged-in browser session
    pub cookie_header: Option<String>,
}

/// One entry of a browser cookie export (`[{"name", "value", ...}]`).
#[derive(Debug, Deserialize)]
struct BrowserCookie {
    name: String,
    value: String,
}

impl CorosAuth {
    /// Bare access token, no cookies.
    pub fn from_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            cookie_header: None,
        }
    }

    /// Token and cookie jar from a browser cookie export such as `cookies.json`.
    pub fn from_cookies_json(json: &str) -> Result<Self, AppError> {
        let cookies: Vec<BrowserCookie> = serde_json::from_str(json)
            .map_err(|e| AppError::CorosApi(format!("Invalid cookies file: {}", e)))?;

        let access_token = cookies
            .iter()
            .find(|c| c.name == TOKEN_COOKIE)
            .map(|c| c.value.clone())
            .ok_or_else(|| {
                AppError::CorosApi(format!("No {} cookie in cookies file", TOKEN_COOKIE))
            })?;

        let cookie_header = cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");

        Ok(Self {
            access_token,
            cookie_header: Some(cookie_header),
        })
    }
}

/// COROS team API client.
#[derive(Clone)]
pub struct CorosClient {
    http: reqwest::Client,
    base_url: String,
}

impl CorosClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// List one page of activities, newest first.
    pub async fn list_activities(
        &self,
        auth: &CorosAuth,
        page: u32,
        size: u32,
    ) -> Result<Vec<CorosActivity>, AppError> {
        let url = format!("{}/activity/query", self.base_url);

        let mut request = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("accesstoken", &auth.access_token)
            .header(reqwest::header::ACCEPT, "application/json, text/plain, */*")
            .header(reqwest::header::ORIGIN, TRAINING_HUB_ORIGIN)
            .header(reqwest::header::REFERER, format!("{}/", TRAINING_HUB_ORIGIN))
            .query(&[
                ("size", size.to_string()),
                ("pageNumber", page.to_string()),
                ("modeList", String::new()),
            ]);
        if let Some(cookie) = &auth.cookie_header {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::CorosApi(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // 401 and 403 both mean the session must be renewed
            if matches!(status.as_u16(), 401 | 403) {
                return Err(AppError::CorosApi(format!(
                    "{} (HTTP {})",
                    AppError::COROS_TOKEN_ERROR,
                    status
                )));
            }
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::CorosApi(format!("HTTP {}: {}", status, body)));
        }

        let envelope: CorosEnvelope = response
            .json()
            .await
            .map_err(|e| AppError::CorosApi(format!("JSON parse error: {}", e)))?;

        envelope.into_activities()
    }

    /// Fetch up to `pages` pages, stopping early at the first empty page.
    ///
    /// A failure on the first page, or a rejected token on any page, is an
    /// error. Other failures on later pages end the export with the records
    /// fetched so far.
    pub async fn fetch_recent(
        &self,
        auth: &CorosAuth,
        pages: u32,
    ) -> Result<Vec<ActivityRecord>, AppError> {
        let mut records = Vec::new();

        for page in 1..=pages {
            let activities = match self.list_activities(auth, page, PAGE_SIZE).await {
                Ok(activities) => activities,
                Err(e) if page == 1 || e.is_coros_token_error() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        page,
                        error = %e,
                        kept = records.len(),
                        "Page fetch failed, keeping earlier pages"
                    );
                    break;
                }
            };
            if activities.is_empty() {
                tracing::info!(page, "No more activities, stopping");
                break;
            }

            tracing::info!(page, count = activities.len(), "Fetched activity page");
            records.extend(activities.into_iter().map(ActivityRecord::from));
        }

        Ok(records)
    }
}

/// First non-empty, non-comment line of a token file.
pub fn parse_token_file(contents: &str) -> Option<&str> {
    contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Response envelope of the team API.
#[derive(Debug, Deserialize)]
struct CorosEnvelope {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<CorosActivityPage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CorosActivityPage {
    #[serde(default)]
    data_list: Vec<CorosActivity>,
}

impl CorosEnvelope {
    fn is_success(&self) -> bool {
        self.code.as_deref() == Some("success") || self.result.as_deref() == Some("0000")
    }

    fn into_activities(self) -> Result<Vec<CorosActivity>, AppError> {
        if !self.is_success() {
            let message = self
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            tracing::warn!(message = %message, "COROS API returned an error");
            return Err(AppError::CorosApi(message));
        }
        Ok(self.data.unwrap_or_default().data_list)
    }
}

/// Activity as listed by COROS.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorosActivity {
    pub date: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
    /// Seconds
    #[serde(default)]
    pub total_time: Option<f64>,
    /// Seconds per km
    #[serde(default)]
    pub adjusted_pace: Option<f64>,
    #[serde(default)]
    pub avg_hr: Option<f64>,
    #[serde(default)]
    pub training_load: Option<f64>,
}

impl From<CorosActivity> for ActivityRecord {
    fn from(activity: CorosActivity) -> Self {
        Self {
            date: DateKey::new(activity.date),
            distance: activity.distance.unwrap_or_default(),
            duration: activity.total_time.unwrap_or_default(),
            training_load: activity.training_load.unwrap_or_default(),
            avg_hr: activity.avg_hr.unwrap_or_default(),
            name: activity.name,
            pace: activity.adjusted_pace,
        }
    }
}
