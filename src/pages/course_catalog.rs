use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::models::{EnrollButton, Lecture, LectureStatus};
use crate::page::{AuthMode, Lifetime, LoadState, PageContext, SERVER_ERROR};

pub const ENROLL_DONE: &str = "수강신청이 완료되었습니다!";
pub const ENROLL_FAILED: &str = "수강신청에 실패했습니다.";
pub const LECTURE_FULL: &str = "정원이 마감된 강의입니다.";
pub const ENROLL_CLOSED: &str = "수강신청 기간이 아닙니다.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogFilter {
    /// Everything that has not closed.
    #[default]
    All,
    Open,
    Recruiting,
}

impl CatalogFilter {
    pub fn matches(self, lecture: &Lecture) -> bool {
        match self {
            CatalogFilter::All => lecture.status != LectureStatus::Closed,
            CatalogFilter::Open => lecture.status == LectureStatus::Open,
            CatalogFilter::Recruiting => lecture.status == LectureStatus::Recruiting,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CatalogFilter::All => "전체",
            CatalogFilter::Open => "수강신청 가능",
            CatalogFilter::Recruiting => "강사 배정 중",
        }
    }
}

impl fmt::Display for CatalogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CatalogFilter::All => "ALL",
            CatalogFilter::Open => "OPEN",
            CatalogFilter::Recruiting => "RECRUITING",
        })
    }
}

impl FromStr for CatalogFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(CatalogFilter::All),
            "OPEN" => Ok(CatalogFilter::Open),
            "RECRUITING" => Ok(CatalogFilter::Recruiting),
            other => Err(format!("unknown catalog filter: {}", other)),
        }
    }
}

pub struct CourseCatalogPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    pub lectures: LoadState<Vec<Lecture>>,
    pub filter: CatalogFilter,
}

impl CourseCatalogPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            lectures: LoadState::Idle,
            filter: CatalogFilter::All,
        }
    }

    /// Ending the returned lifetime unmounts the page.
    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        self.lectures = LoadState::Loading;
        let api = self.ctx.api.clone();
        self.lectures = self
            .ctx
            .load(
                &AuthMode::login_required_with_alert(),
                &self.lifetime.handle(),
                move |creds| async move { api.fetch_lectures(creds.bearer()?).await },
            )
            .await;
    }

    /// Filtering never touches the network.
    pub fn set_filter(&mut self, filter: CatalogFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Lecture> {
        self.lectures
            .value()
            .map(|lectures| lectures.iter().filter(|l| self.filter.matches(l)).collect())
            .unwrap_or_default()
    }

    pub async fn enroll(&mut self, lecture_id: i64) -> bool {
        let button = self
            .lectures
            .value()
            .and_then(|lectures| lectures.iter().find(|l| l.id == lecture_id))
            .map(Lecture::enroll_button);
        match button {
            Some(EnrollButton::Full) => {
                self.ctx.ui.alert(LECTURE_FULL);
                return false;
            }
            Some(EnrollButton::Unavailable) => {
                self.ctx.ui.alert(ENROLL_CLOSED);
                return false;
            }
            Some(EnrollButton::Enroll) | None => {}
        }

        let Some(token) = self.ctx.require_token().await else {
            return false;
        };

        match self.ctx.api.enroll(&token, lecture_id).await {
            Ok(()) => {
                info!(lecture_id, "enrolled");
                self.ctx.ui.alert(ENROLL_DONE);
                self.mount().await;
                true
            }
            Err(e) if e.is_transport() => {
                self.ctx.ui.alert(SERVER_ERROR);
                false
            }
            Err(e) => {
                self.ctx.ui.alert(&e.user_message(ENROLL_FAILED));
                false
            }
        }
    }
}
