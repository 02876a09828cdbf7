use std::sync::Arc;

use tracing::{info, warn};

use crate::models::{Enrollment, LectureStatus, MyActivity, UserProfile};
use crate::page::{Lifetime, LoadState, PageContext, RouteGuard, SERVER_ERROR};
use crate::routes::Route;

pub const PROFILE_SAVED: &str = "회원 정보가 수정되었습니다.";
pub const PROFILE_SAVE_FAILED: &str = "수정에 실패했습니다.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MyPageTab {
    #[default]
    Profile,
    Courses,
    Activity,
}

pub struct MyPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    pub tab: MyPageTab,
    pub profile: LoadState<UserProfile>,
    pub enrollments: LoadState<Vec<Enrollment>>,
    pub activity: LoadState<MyActivity>,
    /// Working copy while the profile form is in edit mode.
    pub edit: Option<UserProfile>,
}

impl MyPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            tab: MyPageTab::Profile,
            profile: LoadState::Idle,
            enrollments: LoadState::Idle,
            activity: LoadState::Idle,
            edit: None,
        }
    }

    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        let Some(token) = self.ctx.guard(RouteGuard::login()).await else {
            return;
        };
        self.profile = LoadState::Loading;
        self.enrollments = LoadState::Loading;
        self.activity = LoadState::Loading;

        let handle = self.lifetime.handle();
        let api = &self.ctx.api;
        let (profile, enrollments, activity) = tokio::join!(
            handle.load(api.fetch_profile(&token)),
            handle.load(api.fetch_my_courses(&token)),
            handle.load(api.fetch_my_activity(&token)),
        );
        self.profile = profile;
        self.enrollments = enrollments;
        self.activity = activity;
    }

    pub fn set_tab(&mut self, tab: MyPageTab) {
        self.tab = tab;
    }

    pub fn start_edit(&mut self) {
        self.edit = self.profile.value().cloned();
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn toggle_interest(&mut self, tag: &str) {
        if let Some(edit) = self.edit.as_mut() {
            let enabled = !edit.has_interest(tag);
            edit.set_interest(tag, enabled);
        }
    }

    /// Sends the whole edited profile. On success the page and the session
    /// both show what the server stored.
    pub async fn save(&mut self) -> bool {
        let Some(edit) = self.edit.clone() else {
            return false;
        };
        let Some(token) = self.ctx.require_token().await else {
            return false;
        };

        match self.ctx.api.update_profile(&token, &edit).await {
            Ok(resp) => {
                info!(username = %resp.user.username, "profile updated");
                if let Err(e) = self.ctx.session.update_user(&resp.user).await {
                    warn!("profile saved but session not refreshed: {}", e);
                }
                self.profile = LoadState::Success(resp.user);
                self.edit = None;
                self.ctx.ui.alert(PROFILE_SAVED);
                true
            }
            Err(e) if e.is_transport() => {
                self.ctx.ui.alert(SERVER_ERROR);
                false
            }
            Err(_) => {
                self.ctx.ui.alert(PROFILE_SAVE_FAILED);
                false
            }
        }
    }

    pub fn current_courses(&self) -> Vec<&Enrollment> {
        self.courses_where(|status| status != LectureStatus::Closed)
    }

    pub fn past_courses(&self) -> Vec<&Enrollment> {
        self.courses_where(|status| status == LectureStatus::Closed)
    }

    fn courses_where(&self, keep: impl Fn(LectureStatus) -> bool) -> Vec<&Enrollment> {
        self.enrollments
            .value()
            .map(|items| items.iter().filter(|e| keep(e.lecture.status)).collect())
            .unwrap_or_default()
    }

    pub fn open_course(&self, lecture_id: i64) {
        self.ctx.ui.navigate(Route::CourseManagement(lecture_id));
    }

    pub fn open_thread(&self, thread_id: i64) {
        self.ctx.ui.navigate(Route::CommunityThread(thread_id));
    }

    /// Opens the thread a comment was left on.
    pub fn open_comment(&self, comment_id: i64) {
        let thread = self
            .activity
            .value()
            .and_then(|a| a.comments.iter().find(|c| c.id == comment_id))
            .and_then(|c| c.thread_id);
        match thread {
            Some(thread_id) => self.open_thread(thread_id),
            None => warn!(comment_id, "comment has no thread to open"),
        }
    }
}
