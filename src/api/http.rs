use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use super::LmsApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::*;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// reqwest-backed gateway to the LMS REST API.
#[derive(Clone, Debug)]
pub struct HttpLmsApi {
    client: Client,
    base_url: Url,
}

impl HttpLmsApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        let mut base_url = config.api_base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Config(format!("cannot build URL for {}: {}", path, e)))
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and returns the raw body of a 2xx response.
    async fn execute(&self, method: Method, url: Url, builder: RequestBuilder) -> Result<String> {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "lms_request",
            method = %method,
            path = url.path(),
            request_id = %request_id
        );

        async move {
            let response = builder
                .header(REQUEST_ID_HEADER, request_id.to_string())
                .send()
                .await
                .map_err(|e| {
                    warn!("transport failure: {}", e);
                    ClientError::Transport(e)
                })?;

            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                let message = extract_message(&body);
                warn!(
                    status = status.as_u16(),
                    "request rejected: {}",
                    message.as_deref().unwrap_or("<no message>")
                );
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            debug!(status = status.as_u16(), bytes = body.len(), "request completed");
            Ok(body)
        }
        .instrument(span)
        .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let url = self.url(path)?;
        self.get_json_at(url, token).await
    }

    async fn get_json_at<T: DeserializeOwned>(&self, url: Url, token: Option<&str>) -> Result<T> {
        let builder = self.request(Method::GET, url.clone(), token);
        let endpoint = url.path().to_string();
        let body = self.execute(Method::GET, url, builder).await?;
        decode(&endpoint, &body)
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        let builder = self.request(method.clone(), url.clone(), token).json(body);
        let raw = self.execute(method, url, builder).await?;
        decode(path, &raw)
    }

    /// Like `send_json` but ignores the response body.
    async fn send_json_discard<B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + Sync,
    {
        let url = self.url(path)?;
        let mut builder = self.request(method.clone(), url.clone(), token);
        builder = match body {
            Some(body) => builder.json(body),
            None => builder.header(reqwest::header::CONTENT_TYPE, "application/json"),
        };
        self.execute(method, url, builder).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| {
        warn!("unexpected response shape from {}: {}", endpoint, source);
        ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        }
    })
}

/// Pulls a human-readable message out of an error body: `error`, `message`
/// or `detail` when present, otherwise every string found in a field-error
/// map, one per line.
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match &value {
        Value::Object(map) => {
            for key in ["error", "message", "detail"] {
                if let Some(Value::String(message)) = map.get(key) {
                    return Some(message.clone());
                }
            }
            join_nonempty(collect_strings(&value))
        }
        Value::String(message) => Some(message.clone()),
        Value::Array(_) => join_nonempty(collect_strings(&value)),
        _ => None,
    }
}

fn collect_strings(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(collect_strings).collect(),
        Value::Object(map) => map.values().flat_map(collect_strings).collect(),
        _ => Vec::new(),
    }
}

fn join_nonempty(parts: Vec<String>) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

#[async_trait]
impl LmsApi for HttpLmsApi {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse> {
        self.send_json(Method::POST, "/api/user/login/", None, req).await
    }

    async fn signup(&self, req: &SignupRequest) -> Result<SignupResponse> {
        self.send_json(Method::POST, "/api/user/signup/", None, req).await
    }

    async fn request_password_reset(&self, req: &PasswordResetRequest) -> Result<MessageResponse> {
        self.send_json(Method::POST, "/api/user/password/reset/", None, req)
            .await
    }

    async fn fetch_profile(&self, token: &str) -> Result<UserProfile> {
        self.get_json("/api/user/me/", Some(token)).await
    }

    async fn update_profile(
        &self,
        token: &str,
        profile: &UserProfile,
    ) -> Result<ProfileUpdateResponse> {
        self.send_json(Method::PUT, "/api/user/me/", Some(token), profile)
            .await
    }

    async fn fetch_instructors(&self, token: &str) -> Result<Vec<Instructor>> {
        self.get_json("/api/user/instructors/", Some(token)).await
    }

    async fn fetch_lectures(&self, token: &str) -> Result<Vec<Lecture>> {
        self.get_json("/api/courses", Some(token)).await
    }

    async fn enroll(&self, token: &str, lecture_id: i64) -> Result<()> {
        let path = format!("/api/courses/{}/enroll", lecture_id);
        self.send_json_discard::<()>(Method::POST, &path, Some(token), None)
            .await
    }

    async fn fetch_consultations(&self, token: &str) -> Result<Vec<Consultation>> {
        self.get_json("/api/consult/list", Some(token)).await
    }

    async fn request_consultation(&self, token: &str, req: &ConsultationRequest) -> Result<()> {
        self.send_json_discard(Method::POST, "/api/consult/request", Some(token), Some(req))
            .await
    }

    async fn fetch_threads(
        &self,
        token: Option<&str>,
        lecture_id: Option<i64>,
    ) -> Result<Vec<Thread>> {
        let mut url = self.url("/api/community/")?;
        if let Some(lecture_id) = lecture_id {
            url.query_pairs_mut()
                .append_pair("lecture_id", &lecture_id.to_string());
        }
        self.get_json_at(url, token).await
    }

    async fn fetch_thread(&self, token: Option<&str>, thread_id: i64) -> Result<Thread> {
        self.get_json(&format!("/api/community/{}/", thread_id), token)
            .await
    }

    async fn create_thread(&self, token: &str, req: &NewThread) -> Result<()> {
        self.send_json_discard(Method::POST, "/api/community/", Some(token), Some(req))
            .await
    }

    async fn post_comment(&self, token: &str, thread_id: i64, req: &NewComment) -> Result<()> {
        let path = format!("/api/community/{}/comments/", thread_id);
        self.send_json_discard(Method::POST, &path, Some(token), Some(req))
            .await
    }

    async fn fetch_my_activity(&self, token: &str) -> Result<MyActivity> {
        self.get_json("/api/community/me/", Some(token)).await
    }

    async fn fetch_my_courses(&self, token: &str) -> Result<Vec<Enrollment>> {
        self.get_json("/api/dashboard/my-courses/", Some(token)).await
    }

    async fn fetch_notices(&self, token: &str) -> Result<Vec<Notice>> {
        self.get_json("/api/dashboard/notices/", Some(token)).await
    }

    async fn fetch_system_notice(&self, token: &str, notice_id: i64) -> Result<Notice> {
        self.get_json(&format!("/api/dashboard/notices/{}/", notice_id), Some(token))
            .await
    }

    async fn fetch_tasks(&self, token: &str) -> Result<Vec<Assignment>> {
        self.get_json("/api/dashboard/tasks/", Some(token)).await
    }

    async fn fetch_lecture_assignments(
        &self,
        token: &str,
        lecture_id: i64,
    ) -> Result<Vec<Assignment>> {
        self.get_json(&format!("/api/lecture/{}/assignments/", lecture_id), Some(token))
            .await
    }

    async fn fetch_lecture_notices(&self, token: &str, lecture_id: i64) -> Result<Vec<Notice>> {
        self.get_json(&format!("/api/lecture/{}/notices/", lecture_id), Some(token))
            .await
    }

    async fn fetch_lecture_notice(&self, token: &str, notice_id: i64) -> Result<Notice> {
        self.get_json(&format!("/api/lecture/notices/{}/", notice_id), Some(token))
            .await
    }

    async fn fetch_attendance(
        &self,
        token: &str,
        lecture_id: i64,
    ) -> Result<Vec<AttendanceRecord>> {
        self.get_json(&format!("/api/lecture/{}/attendance/", lecture_id), Some(token))
            .await
    }
}
