use chrono::NaiveDate;
use tracing::info;

use crate::error::{ClientError, Result};
use crate::models::SignupRequest;
use crate::page::{PageContext, SERVER_ERROR};
use crate::routes::Route;

pub const PASSWORD_MISMATCH: &str = "비밀번호가 일치하지 않습니다.";
pub const INVALID_BIRTH: &str = "생년월일은 YYYY-MM-DD 형식으로 입력해주세요.";
pub const SIGNUP_DONE: &str = "회원가입이 완료되었습니다! 로그인해주세요.";
pub const SIGNUP_FAILED: &str = "가입 실패";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    /// `YYYY-MM-DD`, or empty.
    pub birth: String,
}

impl SignupForm {
    pub fn to_request(&self) -> Result<SignupRequest> {
        if self.password != self.password_confirm {
            return Err(ClientError::Validation(PASSWORD_MISMATCH.to_string()));
        }
        let birth = match self.birth.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| ClientError::Validation(INVALID_BIRTH.to_string()))?,
            ),
        };
        Ok(SignupRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            email: self.email.clone(),
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            birth,
        })
    }
}

pub struct SignupPage {
    ctx: PageContext,
    pub form: SignupForm,
}

impl SignupPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            form: SignupForm::default(),
        }
    }

    pub async fn submit(&mut self) -> bool {
        let req = match self.form.to_request() {
            Ok(req) => req,
            Err(e) => {
                self.ctx.ui.alert(&e.user_message(SIGNUP_FAILED));
                return false;
            }
        };

        match self.ctx.api.signup(&req).await {
            Ok(_) => {
                info!(username = %req.username, "account created");
                self.ctx.ui.alert(SIGNUP_DONE);
                self.ctx.ui.navigate(Route::Login);
                true
            }
            Err(e) if e.is_transport() => {
                self.ctx.ui.alert(SERVER_ERROR);
                false
            }
            Err(e) => {
                self.ctx.ui.alert(&e.user_message(SIGNUP_FAILED));
                false
            }
        }
    }
}
