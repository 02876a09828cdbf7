use serde::{Deserialize, Serialize};

use super::Timestamp;

pub const SYSTEM_CATEGORY: &str = "전체 공지";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    System,
    Lecture,
}

/// System notices and lecture notices share this shape. The merged dashboard
/// feed tags each entry with `type` and `category`; per-lecture lists carry
/// `lecture` and `lecture_name` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub author_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<NoticeKind>,
    pub lecture: Option<i64>,
    pub lecture_name: Option<String>,
    pub category: Option<String>,
}

impl Notice {
    pub fn author_label(&self) -> &str {
        match self.author_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "관리자",
        }
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("공지")
    }

    /// Short scope tag used in the full notice list.
    pub fn scope_label(&self) -> &'static str {
        if self.category.as_deref() == Some(SYSTEM_CATEGORY) {
            "전체"
        } else {
            "강의"
        }
    }

    /// The lecture this notice belongs to, when it is a lecture notice.
    pub fn lecture_scope(&self) -> Option<i64> {
        match self.kind {
            Some(NoticeKind::System) => None,
            _ => self.lecture,
        }
    }
}
