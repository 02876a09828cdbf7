use std::sync::Arc;

use tracing::{info, warn};

use crate::error::ClientError;
use crate::models::{NewComment, Thread};
use crate::page::{AuthMode, LOGIN_REQUIRED, Lifetime, LoadState, PageContext};

pub const THREAD_UNAVAILABLE: &str = "게시글을 불러올 수 없습니다.";
pub const COMMENT_FAILED: &str = "댓글 작성 실패";

/// A single thread with its comments. Readable without signing in.
pub struct CommunityThreadPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    thread_id: i64,
    pub thread: LoadState<Thread>,
    pub comment: String,
    /// Username of the signed-in reader, if any.
    pub viewer: Option<String>,
}

impl CommunityThreadPage {
    pub fn new(ctx: PageContext, thread_id: i64) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            thread_id,
            thread: LoadState::Idle,
            comment: String::new(),
            viewer: None,
        }
    }

    /// Ending the returned lifetime unmounts the page.
    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        self.viewer = self
            .ctx
            .session
            .read()
            .await
            .map(|session| session.user.username);
        self.reload().await;
    }

    async fn reload(&mut self) {
        self.thread = LoadState::Loading;
        let api = self.ctx.api.clone();
        let thread_id = self.thread_id;
        self.thread = self
            .ctx
            .load(&AuthMode::Optional, &self.lifetime.handle(), move |creds| async move {
                api.fetch_thread(creds.optional(), thread_id).await
            })
            .await;

        // Only a server answer leaves the page; a dropped connection keeps the reader here.
        match self.thread.error() {
            Some(ClientError::Api { .. } | ClientError::Decode { .. }) => {
                self.ctx.ui.alert(THREAD_UNAVAILABLE);
                self.ctx.ui.back();
            }
            Some(e) if e.is_transport() => {
                warn!(thread_id = self.thread_id, "thread fetch failed to connect: {}", e);
            }
            _ => {}
        }
    }

    /// Posts the comment box and refetches the thread. Blank input is ignored.
    pub async fn submit_comment(&mut self) -> bool {
        let Some(token) = self.ctx.session.access_token().await else {
            self.ctx.ui.alert(LOGIN_REQUIRED);
            return false;
        };
        if self.comment.trim().is_empty() {
            return false;
        }

        let req = NewComment {
            content: self.comment.clone(),
        };
        match self.ctx.api.post_comment(&token, self.thread_id, &req).await {
            Ok(()) => {
                info!(thread_id = self.thread_id, "comment posted");
                self.comment.clear();
                self.reload().await;
                true
            }
            Err(_) => {
                self.ctx.ui.alert(COMMENT_FAILED);
                false
            }
        }
    }
}
