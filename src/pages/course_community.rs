use std::sync::Arc;

use tracing::{info, warn};

use crate::models::{NewComment, Thread};
use crate::page::{AuthMode, Lifetime, LoadState, PageContext};
use crate::pages::community_thread::COMMENT_FAILED;
use crate::routes::Route;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommunityTab {
    #[default]
    All,
    Course,
}

/// Board inside a course: list of threads on the left, one opened thread
/// with its comments on the right.
pub struct CourseCommunityPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    lecture_id: i64,
    pub tab: CommunityTab,
    pub threads: LoadState<Vec<Thread>>,
    /// `Some` while in detail view.
    pub selected: Option<Thread>,
    pub comment: String,
    pub viewer: Option<String>,
}

impl CourseCommunityPage {
    pub fn new(ctx: PageContext, lecture_id: i64) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            lecture_id,
            tab: CommunityTab::All,
            threads: LoadState::Idle,
            selected: None,
            comment: String::new(),
            viewer: None,
        }
    }

    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        self.selected = None;
        self.threads = LoadState::Loading;

        let api = self.ctx.api.clone();
        let lecture = match self.tab {
            CommunityTab::All => None,
            CommunityTab::Course => Some(self.lecture_id),
        };
        self.threads = self
            .ctx
            .load(&AuthMode::Optional, &self.lifetime.handle(), move |creds| async move {
                api.fetch_threads(creds.optional(), lecture).await
            })
            .await;

        self.viewer = self
            .ctx
            .session
            .read()
            .await
            .map(|session| session.user.username);
    }

    /// Switching tabs returns to the list view.
    pub async fn set_tab(&mut self, tab: CommunityTab) {
        if self.tab != tab {
            self.tab = tab;
            self.mount().await;
        }
    }

    pub async fn open_thread(&mut self, thread_id: i64) -> bool {
        let token = self.ctx.session.access_token().await;
        let handle = self.lifetime.handle();
        match handle
            .run(self.ctx.api.fetch_thread(token.as_deref(), thread_id))
            .await
        {
            Ok(thread) => {
                self.selected = Some(thread);
                true
            }
            Err(e) => {
                warn!(thread_id, "failed to open thread: {}", e);
                false
            }
        }
    }

    pub fn back_to_list(&mut self) {
        self.selected = None;
    }

    pub async fn submit_comment(&mut self) -> bool {
        let Some(token) = self.ctx.session.access_token().await else {
            return false;
        };
        let Some(thread_id) = self.selected.as_ref().map(|t| t.id) else {
            return false;
        };
        if self.comment.trim().is_empty() {
            return false;
        }

        let req = NewComment {
            content: self.comment.clone(),
        };
        match self.ctx.api.post_comment(&token, thread_id, &req).await {
            Ok(()) => {
                info!(thread_id, "comment posted");
                self.comment.clear();
                self.open_thread(thread_id).await;
                true
            }
            Err(_) => {
                self.ctx.ui.alert(COMMENT_FAILED);
                false
            }
        }
    }

    pub fn write(&self) {
        self.ctx.ui.navigate(Route::CommunityWrite {
            lecture: Some(self.lecture_id),
        });
    }
}
