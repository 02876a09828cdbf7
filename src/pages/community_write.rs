use tracing::info;

use crate::models::NewThread;
use crate::page::PageContext;
use crate::pages::login::SERVER_UNREACHABLE;

pub const TITLE_AND_CONTENT_REQUIRED: &str = "제목과 내용을 모두 입력해주세요.";
pub const POSTED: &str = "글이 등록되었습니다.";
pub const POST_FAILED: &str = "글 작성에 실패했습니다.";

pub struct CommunityWritePage {
    ctx: PageContext,
    /// Set when opened from a course board.
    lecture: Option<i64>,
    pub title: String,
    pub content: String,
    pub submitting: bool,
}

impl CommunityWritePage {
    pub fn new(ctx: PageContext, lecture: Option<i64>) -> Self {
        Self {
            ctx,
            lecture,
            title: String::new(),
            content: String::new(),
            submitting: false,
        }
    }

    pub fn lecture(&self) -> Option<i64> {
        self.lecture
    }

    pub async fn submit(&mut self) -> bool {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            self.ctx.ui.alert(TITLE_AND_CONTENT_REQUIRED);
            return false;
        }
        let Some(token) = self.ctx.require_token().await else {
            return false;
        };

        self.submitting = true;
        let req = NewThread {
            title: self.title.clone(),
            content: self.content.clone(),
            lecture: self.lecture,
        };
        let result = self.ctx.api.create_thread(&token, &req).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                info!(lecture = ?self.lecture, "thread created");
                self.ctx.ui.alert(POSTED);
                self.ctx.ui.back();
                true
            }
            Err(e) if e.is_transport() => {
                self.ctx.ui.alert(SERVER_UNREACHABLE);
                false
            }
            Err(_) => {
                self.ctx.ui.alert(POST_FAILED);
                false
            }
        }
    }

    pub fn cancel(&self) {
        self.ctx.ui.back();
    }
}
