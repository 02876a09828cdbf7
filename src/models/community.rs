use serde::{Deserialize, Serialize};

use super::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub created_at: Timestamp,
    pub student_name: String,
}

/// A community thread. List responses omit `comments`; detail responses
/// always carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub student_name: String,
    pub lecture: Option<i64>,
    pub comments: Option<Vec<Comment>>,
}

impl Thread {
    pub fn comments(&self) -> &[Comment] {
        self.comments.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewThread {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecture: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityComment {
    pub id: i64,
    pub content: String,
    pub created_at: Timestamp,
    pub thread_id: Option<i64>,
    pub thread_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MyActivity {
    pub threads: Vec<Thread>,
    pub comments: Vec<ActivityComment>,
}
