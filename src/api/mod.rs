pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

pub use http::HttpLmsApi;

/// Every backend endpoint the client consumes. Methods taking `token: &str`
/// send it as a bearer credential; `Option<&str>` marks endpoints that are
/// readable anonymously.
#[async_trait]
pub trait LmsApi: Send + Sync {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse>;
    async fn signup(&self, req: &SignupRequest) -> Result<SignupResponse>;
    async fn request_password_reset(&self, req: &PasswordResetRequest) -> Result<MessageResponse>;

    async fn fetch_profile(&self, token: &str) -> Result<UserProfile>;
    async fn update_profile(&self, token: &str, profile: &UserProfile)
    -> Result<ProfileUpdateResponse>;
    async fn fetch_instructors(&self, token: &str) -> Result<Vec<Instructor>>;

    async fn fetch_lectures(&self, token: &str) -> Result<Vec<Lecture>>;
    async fn enroll(&self, token: &str, lecture_id: i64) -> Result<()>;

    async fn fetch_consultations(&self, token: &str) -> Result<Vec<Consultation>>;
    async fn request_consultation(&self, token: &str, req: &ConsultationRequest) -> Result<()>;

    async fn fetch_threads(&self, token: Option<&str>, lecture_id: Option<i64>)
    -> Result<Vec<Thread>>;
    async fn fetch_thread(&self, token: Option<&str>, thread_id: i64) -> Result<Thread>;
    async fn create_thread(&self, token: &str, req: &NewThread) -> Result<()>;
    async fn post_comment(&self, token: &str, thread_id: i64, req: &NewComment) -> Result<()>;
    async fn fetch_my_activity(&self, token: &str) -> Result<MyActivity>;

    async fn fetch_my_courses(&self, token: &str) -> Result<Vec<Enrollment>>;
    async fn fetch_notices(&self, token: &str) -> Result<Vec<Notice>>;
    async fn fetch_system_notice(&self, token: &str, notice_id: i64) -> Result<Notice>;
    async fn fetch_tasks(&self, token: &str) -> Result<Vec<Assignment>>;

    async fn fetch_lecture_assignments(&self, token: &str, lecture_id: i64)
    -> Result<Vec<Assignment>>;
    async fn fetch_lecture_notices(&self, token: &str, lecture_id: i64) -> Result<Vec<Notice>>;
    async fn fetch_lecture_notice(&self, token: &str, notice_id: i64) -> Result<Notice>;
    async fn fetch_attendance(&self, token: &str, lecture_id: i64)
    -> Result<Vec<AttendanceRecord>>;
}
