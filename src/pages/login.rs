use tracing::{error, info};

use crate::models::LoginRequest;
use crate::page::PageContext;
use crate::routes::Route;
use crate::session::Session;

pub const LOGIN_FAILED: &str = "로그인 정보를 확인해주세요.";
pub const SERVER_UNREACHABLE: &str = "서버와 연결할 수 없습니다.";

pub struct LoginPage {
    ctx: PageContext,
    pub username: String,
    pub password: String,
    /// Shown inline under the form.
    pub error: Option<String>,
}

impl LoginPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            username: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub async fn submit(&mut self) -> bool {
        self.error = None;
        let req = LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        };

        let resp = match self.ctx.api.login(&req).await {
            Ok(resp) => resp,
            Err(e) if e.is_transport() => {
                self.error = Some(SERVER_UNREACHABLE.to_string());
                return false;
            }
            Err(e) => {
                self.error = Some(e.user_message(LOGIN_FAILED));
                return false;
            }
        };

        let session = Session::from(resp);
        if let Err(e) = self.ctx.session.save(&session).await {
            error!("failed to persist session: {}", e);
            self.error = Some(SERVER_UNREACHABLE.to_string());
            return false;
        }

        info!(username = %session.user.username, "signed in");
        self.ctx.ui.navigate(Route::Dashboard);
        true
    }
}
