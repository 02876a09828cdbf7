use std::sync::Arc;

use crate::models::Notice;
use crate::page::{AuthMode, Lifetime, LoadState, PageContext};
use crate::pages::notice_detail::NOTICE_NOT_FOUND;
use crate::routes::Route;

pub struct CourseNoticeDetailPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    lecture_id: i64,
    notice_id: i64,
    pub notice: LoadState<Notice>,
}

impl CourseNoticeDetailPage {
    pub fn new(ctx: PageContext, lecture_id: i64, notice_id: i64) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            lecture_id,
            notice_id,
            notice: LoadState::Idle,
        }
    }

    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        self.notice = LoadState::Loading;
        let api = self.ctx.api.clone();
        let notice_id = self.notice_id;
        self.notice = self
            .ctx
            .load(
                &AuthMode::login_required(),
                &self.lifetime.handle(),
                move |creds| async move { api.fetch_lecture_notice(creds.bearer()?, notice_id).await },
            )
            .await;

        if self.notice.error().is_some_and(|e| !e.is_cancelled()) {
            self.ctx.ui.alert(NOTICE_NOT_FOUND);
            self.ctx.ui.back();
        }
    }

    pub fn back_to_list(&self) {
        self.ctx.ui.navigate(Route::CourseNotices(self.lecture_id));
    }
}
