use std::sync::Arc;

use crate::models::Notice;
use crate::models::format::dot_date;
use crate::page::{AuthMode, Lifetime, LoadState, PageContext};
use crate::routes::Route;

/// Lecture notices open inside their course; everything else opens as a
/// system notice.
pub fn notice_route(notice: &Notice) -> Route {
    match notice.lecture_scope() {
        Some(lecture) => Route::CourseNoticeDetail {
            lecture,
            notice: notice.id,
        },
        None => Route::NoticeDetail(notice.id),
    }
}

/// Merged feed of system and lecture notices.
pub struct NoticesPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    pub notices: LoadState<Vec<Notice>>,
}

impl NoticesPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            notices: LoadState::Idle,
        }
    }

    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        self.notices = LoadState::Loading;
        let api = self.ctx.api.clone();
        self.notices = self
            .ctx
            .load(
                &AuthMode::login_required(),
                &self.lifetime.handle(),
                move |creds| async move { api.fetch_notices(creds.bearer()?).await },
            )
            .await;
    }

    /// `(scope, title, date)` per row.
    pub fn rows(&self) -> Vec<(&'static str, &str, String)> {
        self.notices
            .value()
            .map(|notices| {
                notices
                    .iter()
                    .map(|n| (n.scope_label(), n.title.as_str(), dot_date(&n.created_at)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn open(&self, notice_id: i64) {
        let route = self
            .notices
            .value()
            .and_then(|notices| notices.iter().find(|n| n.id == notice_id))
            .map(notice_route)
            .unwrap_or(Route::NoticeDetail(notice_id));
        self.ctx.ui.navigate(route);
    }

    pub fn back(&self) {
        self.ctx.ui.back();
    }
}
