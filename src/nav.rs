use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{info, warn};

use crate::error::Result;
use crate::page::PageContext;
use crate::routes::Route;
use crate::session::AuthChange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDisplay {
    /// Login and signup links.
    Anonymous,
    SignedIn { name: String },
}

/// Primary navigation links, in display order.
pub const NAV_LINKS: [(&str, Route); 4] = [
    ("수강신청", Route::CourseCatalog),
    ("상담신청", Route::Consultation),
    ("대시보드", Route::Dashboard),
    ("마이페이지", Route::MyPage),
];

/// Navigation bar. Re-reads the session whenever it is told the
/// authentication state changed.
pub struct NavBar {
    ctx: PageContext,
    changes: broadcast::Receiver<AuthChange>,
    display: NavDisplay,
}

impl NavBar {
    /// Subscribes before the first read so no change can slip between them.
    pub async fn mount(ctx: PageContext) -> Self {
        let changes = ctx.session.subscribe();
        let mut nav = Self {
            ctx,
            changes,
            display: NavDisplay::Anonymous,
        };
        nav.refresh().await;
        nav
    }

    pub fn display(&self) -> &NavDisplay {
        &self.display
    }

    pub async fn refresh(&mut self) {
        self.display = match self.ctx.session.read().await {
            Some(session) => NavDisplay::SignedIn {
                name: session.display_name(),
            },
            None => NavDisplay::Anonymous,
        };
    }

    /// Applies every change broadcast since the last call. Returns how many
    /// were seen.
    pub async fn sync(&mut self) -> usize {
        let mut seen = 0;
        loop {
            match self.changes.try_recv() {
                Ok(_) => seen += 1,
                Err(TryRecvError::Lagged(skipped)) => seen += skipped as usize,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if seen > 0 {
            self.refresh().await;
        }
        seen
    }

    /// Waits for the next change and re-renders.
    pub async fn next_change(&mut self) -> Option<AuthChange> {
        let change = match self.changes.recv().await {
            Ok(change) => Some(change),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "navigation bar fell behind auth changes");
                None
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        };
        self.refresh().await;
        change
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.ctx.session.clear().await?;
        info!("signed out");
        self.sync().await;
        self.ctx.ui.navigate(Route::Login);
        Ok(())
    }
}
