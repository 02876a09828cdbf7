use std::sync::Arc;

use crate::models::Notice;
use crate::page::{AuthMode, Lifetime, LoadState, PageContext};
use crate::routes::Route;

pub const NOTICE_NOT_FOUND: &str = "공지사항을 찾을 수 없습니다.";

/// A system-wide notice.
pub struct NoticeDetailPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    notice_id: i64,
    pub notice: LoadState<Notice>,
}

impl NoticeDetailPage {
    pub fn new(ctx: PageContext, notice_id: i64) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
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
                move |creds| async move { api.fetch_system_notice(creds.bearer()?, notice_id).await },
            )
            .await;

        if self.notice.error().is_some_and(|e| !e.is_cancelled()) {
            self.ctx.ui.alert(NOTICE_NOT_FOUND);
            self.ctx.ui.back();
        }
    }

    pub fn back_to_list(&self) {
        self.ctx.ui.navigate(Route::Notices);
    }
}
