use std::sync::Arc;

use crate::models::Notice;
use crate::models::format::dot_date;
use crate::page::{AuthMode, Lifetime, LoadState, PageContext};
use crate::routes::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeRow {
    /// Newest notice gets the highest number.
    pub number: usize,
    pub id: i64,
    pub title: String,
    pub author: String,
    pub date: String,
}

pub struct CourseNoticesPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    lecture_id: i64,
    pub notices: LoadState<Vec<Notice>>,
}

impl CourseNoticesPage {
    pub fn new(ctx: PageContext, lecture_id: i64) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            lecture_id,
            notices: LoadState::Idle,
        }
    }

    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        self.notices = LoadState::Loading;
        let api = self.ctx.api.clone();
        let lecture_id = self.lecture_id;
        self.notices = self
            .ctx
            .load(
                &AuthMode::login_required(),
                &self.lifetime.handle(),
                move |creds| async move {
                    api.fetch_lecture_notices(creds.bearer()?, lecture_id).await
                },
            )
            .await;
    }

    pub fn rows(&self) -> Vec<NoticeRow> {
        let Some(notices) = self.notices.value() else {
            return Vec::new();
        };
        let count = notices.len();
        notices
            .iter()
            .enumerate()
            .map(|(index, notice)| NoticeRow {
                number: count - index,
                id: notice.id,
                title: notice.title.clone(),
                author: notice.author_label().to_string(),
                date: dot_date(&notice.created_at),
            })
            .collect()
    }

    pub fn open(&self, notice_id: i64) {
        self.ctx.ui.navigate(Route::CourseNoticeDetail {
            lecture: self.lecture_id,
            notice: notice_id,
        });
    }
}
