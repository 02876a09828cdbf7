use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Timestamp;

pub const INTEREST_OPTIONS: [&str; 6] = [
    "인공지능",
    "로봇공학",
    "코딩",
    "사물인터넷(IoT)",
    "3D프린팅",
    "드론",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub birth: Option<NaiveDate>,
    pub interests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<Timestamp>,
}

impl UserProfile {
    /// Family name followed by given name, or the username when both are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{}{}", self.last_name, self.first_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub fn interest_tags(&self) -> Vec<&str> {
        self.interests
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    pub fn has_interest(&self, tag: &str) -> bool {
        self.interest_tags().contains(&tag)
    }

    /// Adds or removes `tag`, keeping the stored comma-joined order.
    pub fn set_interest(&mut self, tag: &str, enabled: bool) {
        let mut tags: Vec<String> = self
            .interest_tags()
            .into_iter()
            .filter(|existing| *existing != tag)
            .map(str::to_string)
            .collect();
        if enabled {
            tags.push(tag.to_string());
        }
        self.interests = Some(tags.join(","));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub message: Option<String>,
    pub user: UserProfile,
    pub token: TokenPair,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub message: Option<String>,
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdateResponse {
    pub message: Option<String>,
    pub user: UserProfile,
}
