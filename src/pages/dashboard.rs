use std::sync::Arc;

use crate::models::{Enrollment, LectureStatus, Notice};
use crate::page::{Lifetime, LoadState, PageContext, RouteGuard};
use crate::pages::notices::notice_route;
use crate::routes::Route;

pub const RECENT_NOTICES: usize = 5;

pub struct DashboardPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    pub courses: LoadState<Vec<Enrollment>>,
    pub notices: LoadState<Vec<Notice>>,
}

impl DashboardPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            courses: LoadState::Idle,
            notices: LoadState::Idle,
        }
    }

    /// Ending the returned lifetime unmounts the page.
    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        let Some(token) = self.ctx.guard(RouteGuard::login()).await else {
            return;
        };
        self.courses = LoadState::Loading;
        self.notices = LoadState::Loading;

        let handle = self.lifetime.handle();
        let api = &self.ctx.api;
        let (courses, notices) = tokio::join!(
            handle.load(api.fetch_my_courses(&token)),
            handle.load(api.fetch_notices(&token)),
        );

        self.courses = courses;
        self.notices = notices.map(|mut notices| {
            notices.truncate(RECENT_NOTICES);
            notices
        });
    }

    /// Enrolled courses that have not closed yet.
    pub fn active_courses(&self) -> Vec<&Enrollment> {
        self.courses
            .value()
            .map(|courses| {
                courses
                    .iter()
                    .filter(|e| e.lecture.status != LectureStatus::Closed)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn open_course(&self, lecture_id: i64) {
        self.ctx.ui.navigate(Route::CourseManagement(lecture_id));
    }

    pub fn open_notice(&self, notice: &Notice) {
        self.ctx.ui.navigate(notice_route(notice));
    }

    pub fn browse_catalog(&self) {
        self.ctx.ui.navigate(Route::CourseCatalog);
    }

    pub fn all_notices(&self) {
        self.ctx.ui.navigate(Route::Notices);
    }
}
