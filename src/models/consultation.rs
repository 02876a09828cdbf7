use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsultationMethod {
    Offline,
    Online,
}

impl ConsultationMethod {
    pub fn short_label(self) -> &'static str {
        match self {
            ConsultationMethod::Offline => "대면",
            ConsultationMethod::Online => "비대면",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsultationMethod::Offline => "대면상담",
            ConsultationMethod::Online => "비대면상담",
        }
    }
}

impl FromStr for ConsultationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OFFLINE" => Ok(ConsultationMethod::Offline),
            "ONLINE" => Ok(ConsultationMethod::Online),
            other => Err(format!("unknown consultation method: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsultationType {
    Career,
    Coding,
    Other,
}

impl ConsultationType {
    pub fn label(self) -> &'static str {
        match self {
            ConsultationType::Career => "진로상담",
            ConsultationType::Coding => "코딩질문",
            ConsultationType::Other => "기타",
        }
    }
}

impl FromStr for ConsultationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAREER" => Ok(ConsultationType::Career),
            "CODING" => Ok(ConsultationType::Coding),
            "OTHER" => Ok(ConsultationType::Other),
            other => Err(format!("unknown consultation type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsultationStatus {
    Pending,
    Approved,
    Completed,
    Canceled,
}

impl ConsultationStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConsultationStatus::Pending => "신청완료",
            ConsultationStatus::Approved => "상담예정",
            ConsultationStatus::Completed => "상담완료",
            ConsultationStatus::Canceled => "취소됨",
        }
    }
}

impl FromStr for ConsultationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ConsultationStatus::Pending),
            "APPROVED" => Ok(ConsultationStatus::Approved),
            "COMPLETED" => Ok(ConsultationStatus::Completed),
            "CANCELED" | "CANCELLED" => Ok(ConsultationStatus::Canceled),
            other => Err(format!("unknown consultation status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: i64,
    pub instructor_name: String,
    pub method: ConsultationMethod,
    #[serde(rename = "type", alias = "consultation_type")]
    pub kind: ConsultationType,
    pub topic: Option<String>,
    #[serde(alias = "scheduled_at")]
    pub preferred_date: Timestamp,
    pub status: ConsultationStatus,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl Instructor {
    /// `홍길동 (hong)`
    pub fn option_label(&self) -> String {
        format!("{}{} ({})", self.last_name, self.first_name, self.username)
    }
}

/// Body of `POST /api/consult/request`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultationRequest {
    pub instructor: i64,
    pub method: ConsultationMethod,
    pub consultation_type: ConsultationType,
    pub topic: String,
    pub content: String,
    pub scheduled_at: NaiveDateTime,
}
