use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::LmsApi;
use crate::error::{ClientError, Result};
use crate::routes::Route;
use crate::session::SessionContext;
use crate::ui::Ui;

pub const LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
pub const SERVER_ERROR: &str = "서버 오류가 발생했습니다.";

/// Everything a page controller talks to, injected at construction.
#[derive(Clone)]
pub struct PageContext {
    pub api: Arc<dyn LmsApi>,
    pub session: SessionContext,
    pub ui: Arc<dyn Ui>,
}

impl PageContext {
    pub fn new(api: Arc<dyn LmsApi>, session: SessionContext, ui: Arc<dyn Ui>) -> Self {
        Self { api, session, ui }
    }

    /// Guard, then fetch. A redirected page stays `Idle` and issues no request.
    pub async fn load<T, F, Fut>(
        &self,
        auth: &AuthMode,
        lifetime: &LifetimeHandle,
        fetch: F,
    ) -> LoadState<T>
    where
        F: FnOnce(Credentials) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let credentials = match auth {
            AuthMode::Required(guard) => match guard.check(self).await {
                GuardOutcome::Proceed(token) => Credentials(Some(token)),
                GuardOutcome::Redirected => return LoadState::Idle,
            },
            AuthMode::Optional => Credentials(self.session.access_token().await),
            AuthMode::Anonymous => Credentials(None),
        };

        lifetime.load(fetch(credentials)).await
    }

    /// The session token, or the page's redirect when there is none.
    pub async fn guard(&self, guard: RouteGuard) -> Option<String> {
        match guard.check(self).await {
            GuardOutcome::Proceed(token) => Some(token),
            GuardOutcome::Redirected => None,
        }
    }

    /// Bearer token for a write action, or the login alert and redirect.
    pub async fn require_token(&self) -> Option<String> {
        self.guard(RouteGuard::login().with_alert(LOGIN_REQUIRED))
            .await
    }
}

/// The token a fetch runs with. `Required` pages always get one.
#[derive(Debug, Clone)]
pub struct Credentials(Option<String>);

impl Credentials {
    pub fn bearer(&self) -> Result<&str> {
        self.0.as_deref().ok_or(ClientError::MissingSession)
    }

    pub fn optional(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    pub redirect: Route,
    pub alert: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed(String),
    Redirected,
}

impl GuardOutcome {
    pub fn may_proceed(&self) -> bool {
        matches!(self, GuardOutcome::Proceed(_))
    }
}

impl RouteGuard {
    pub const fn new(redirect: Route) -> Self {
        Self {
            redirect,
            alert: None,
        }
    }

    pub const fn login() -> Self {
        Self::new(Route::Login)
    }

    pub const fn with_alert(mut self, message: &'static str) -> Self {
        self.alert = Some(message);
        self
    }

    pub async fn check(&self, ctx: &PageContext) -> GuardOutcome {
        match ctx.session.access_token().await {
            Some(token) => GuardOutcome::Proceed(token),
            None => {
                info!(redirect = %self.redirect, "no session, leaving page");
                if let Some(message) = self.alert {
                    ctx.ui.alert(message);
                }
                ctx.ui.navigate(self.redirect);
                GuardOutcome::Redirected
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Required(RouteGuard),
    /// Sends the token when there is one.
    Optional,
    Anonymous,
}

impl AuthMode {
    pub const fn login_required() -> Self {
        AuthMode::Required(RouteGuard::login())
    }

    pub const fn login_required_with_alert() -> Self {
        AuthMode::Required(RouteGuard::login().with_alert(LOGIN_REQUIRED))
    }
}

#[derive(Debug)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Success(T),
    Error(ClientError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            LoadState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            LoadState::Idle => LoadState::Idle,
            LoadState::Loading => LoadState::Loading,
            LoadState::Success(value) => LoadState::Success(f(value)),
            LoadState::Error(e) => LoadState::Error(e),
        }
    }
}

/// Shared between a mounted page and its host. Ending it, or dropping the
/// last owner, cancels every fetch started through one of its handles.
#[derive(Debug)]
pub struct Lifetime {
    ended: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct LifetimeHandle {
    ended: watch::Receiver<bool>,
}

impl Lifetime {
    pub fn new() -> Self {
        let (ended, _) = watch::channel(false);
        Self { ended }
    }

    pub fn handle(&self) -> LifetimeHandle {
        LifetimeHandle {
            ended: self.ended.subscribe(),
        }
    }

    pub fn end(&self) {
        self.ended.send_replace(true);
    }

    pub fn is_ended(&self) -> bool {
        *self.ended.borrow()
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.ended.send_replace(true);
    }
}

impl LifetimeHandle {
    pub fn is_ended(&self) -> bool {
        *self.ended.borrow()
    }

    pub async fn ended(&self) {
        let mut ended = self.ended.clone();
        // A closed channel means the owner is gone.
        let _ = ended.wait_for(|ended| *ended).await;
    }

    /// Drives `fut` unless the lifetime ends first.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_ended() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.ended() => Err(ClientError::Cancelled),
            result = fut => result,
        }
    }

    /// Runs one fetch and folds its outcome into a `LoadState`.
    pub async fn load<T, F>(&self, fut: F) -> LoadState<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.run(fut).await {
            Ok(value) => LoadState::Success(value),
            Err(ClientError::Cancelled) => {
                debug!("page unmounted before fetch completed");
                LoadState::Error(ClientError::Cancelled)
            }
            Err(e) => {
                warn!("page fetch failed: {}", e);
                LoadState::Error(e)
            }
        }
    }
}
