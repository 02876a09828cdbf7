use std::sync::Arc;

use crate::models::Assignment;
use crate::page::{AuthMode, Lifetime, LoadState, PageContext};

/// Assignments across every enrolled course.
pub struct TasksPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    pub tasks: LoadState<Vec<Assignment>>,
}

impl TasksPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            tasks: LoadState::Idle,
        }
    }

    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        self.tasks = LoadState::Loading;
        let api = self.ctx.api.clone();
        self.tasks = self
            .ctx
            .load(
                &AuthMode::login_required(),
                &self.lifetime.handle(),
                move |creds| async move { api.fetch_tasks(creds.bearer()?).await },
            )
            .await;
    }
}
