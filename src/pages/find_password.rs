use crate::models::PasswordResetRequest;
use crate::page::{PageContext, SERVER_ERROR};
use crate::routes::Route;

pub const RESET_SENT: &str = "해당 이메일로 임시 비밀번호가 전송되었습니다.";
pub const NO_SUCH_MEMBER: &str = "일치하는 회원을 찾을 수 없습니다.";

pub struct FindPasswordPage {
    ctx: PageContext,
    pub email: String,
    pub message: Option<String>,
}

impl FindPasswordPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            email: String::new(),
            message: None,
        }
    }

    pub async fn submit(&mut self) -> bool {
        self.message = None;
        let req = PasswordResetRequest {
            email: self.email.trim().to_string(),
        };

        match self.ctx.api.request_password_reset(&req).await {
            Ok(_) => {
                self.ctx.ui.alert(RESET_SENT);
                self.ctx.ui.navigate(Route::Login);
                true
            }
            Err(e) if e.is_transport() => {
                self.message = Some(SERVER_ERROR.to_string());
                false
            }
            Err(e) => {
                self.message = Some(e.user_message(NO_SUCH_MEMBER));
                false
            }
        }
    }

    pub fn back(&self) {
        self.ctx.ui.back();
    }
}
