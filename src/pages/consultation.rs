use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::info;

use crate::error::{ClientError, Result};
use crate::models::{
    Consultation, ConsultationMethod, ConsultationRequest, ConsultationStatus, ConsultationType,
    Instructor,
};
use crate::page::{LOGIN_REQUIRED, Lifetime, LoadState, PageContext, RouteGuard, SERVER_ERROR};

pub const REQUEST_DONE: &str = "상담 신청이 완료되었습니다!";
pub const REQUEST_INVALID: &str = "신청 정보를 확인해주세요.";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsultationTab {
    #[default]
    List,
    Request,
}

/// Every set field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultationFilters {
    pub kind: Option<ConsultationType>,
    pub method: Option<ConsultationMethod>,
    pub status: Option<ConsultationStatus>,
    /// Substring of the instructor's name.
    pub instructor: String,
}

impl ConsultationFilters {
    pub fn matches(&self, item: &Consultation) -> bool {
        self.kind.is_none_or(|kind| item.kind == kind)
            && self.method.is_none_or(|method| item.method == method)
            && self.status.is_none_or(|status| item.status == status)
            && (self.instructor.is_empty() || item.instructor_name.contains(&self.instructor))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultationForm {
    pub instructor: Option<i64>,
    pub method: Option<ConsultationMethod>,
    /// `YYYY-MM-DDTHH:MM`
    pub date: String,
    pub kind: Option<ConsultationType>,
    pub topic: String,
    pub content: String,
}

impl ConsultationForm {
    pub fn to_request(&self) -> Result<ConsultationRequest> {
        let invalid = || ClientError::Validation(REQUEST_INVALID.to_string());
        let scheduled_at = DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(self.date.trim(), format).ok())
            .ok_or_else(invalid)?;

        Ok(ConsultationRequest {
            instructor: self.instructor.ok_or_else(invalid)?,
            method: self.method.ok_or_else(invalid)?,
            consultation_type: self.kind.ok_or_else(invalid)?,
            topic: self.topic.clone(),
            content: self.content.clone(),
            scheduled_at,
        })
    }
}

pub struct ConsultationPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    pub tab: ConsultationTab,
    pub instructors: LoadState<Vec<Instructor>>,
    pub consultations: LoadState<Vec<Consultation>>,
    pub form: ConsultationForm,
    pub filters: ConsultationFilters,
}

impl ConsultationPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            tab: ConsultationTab::List,
            instructors: LoadState::Idle,
            consultations: LoadState::Idle,
            form: ConsultationForm::default(),
            filters: ConsultationFilters::default(),
        }
    }

    /// Loads the instructor roster and, on the list tab, the history. The two
    /// fetches run concurrently and fill independent slices.
    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        let guard = RouteGuard::login().with_alert(LOGIN_REQUIRED);
        let Some(token) = self.ctx.guard(guard).await else {
            return;
        };

        let handle = self.lifetime.handle();
        let api = &self.ctx.api;
        let wants_list = self.tab == ConsultationTab::List;
        if wants_list {
            self.consultations = LoadState::Loading;
        }

        let (instructors, consultations) = tokio::join!(
            handle.load(api.fetch_instructors(&token)),
            async {
                if wants_list {
                    Some(handle.load(api.fetch_consultations(&token)).await)
                } else {
                    None
                }
            }
        );

        self.instructors = instructors;
        if let Some(consultations) = consultations {
            self.consultations = consultations;
        }
    }

    pub async fn set_tab(&mut self, tab: ConsultationTab) {
        if self.tab != tab {
            self.tab = tab;
            self.mount().await;
        }
    }

    pub fn filtered(&self) -> Vec<&Consultation> {
        self.consultations
            .value()
            .map(|items| items.iter().filter(|c| self.filters.matches(c)).collect())
            .unwrap_or_default()
    }

    pub async fn submit(&mut self) -> bool {
        let Some(token) = self.ctx.require_token().await else {
            return false;
        };
        let req = match self.form.to_request() {
            Ok(req) => req,
            Err(e) => {
                self.ctx.ui.alert(&e.user_message(REQUEST_INVALID));
                return false;
            }
        };

        match self.ctx.api.request_consultation(&token, &req).await {
            Ok(()) => {
                info!(instructor = req.instructor, "consultation requested");
                self.ctx.ui.alert(REQUEST_DONE);
                self.form = ConsultationForm::default();
                self.filters = ConsultationFilters::default();
                self.tab = ConsultationTab::List;
                self.mount().await;
                true
            }
            Err(e) if e.is_transport() => {
                self.ctx.ui.alert(SERVER_ERROR);
                false
            }
            Err(_) => {
                self.ctx.ui.alert(REQUEST_INVALID);
                false
            }
        }
    }
}
