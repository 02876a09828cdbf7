use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LectureStatus {
    Recruiting,
    Open,
    InProgress,
    Closed,
}

impl LectureStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LectureStatus::Recruiting => "RECRUITING",
            LectureStatus::Open => "OPEN",
            LectureStatus::InProgress => "IN_PROGRESS",
            LectureStatus::Closed => "CLOSED",
        }
    }

    /// Badge shown on the course catalog.
    pub fn catalog_label(self) -> &'static str {
        match self {
            LectureStatus::Open => "수강신청 가능",
            LectureStatus::Recruiting => "강사 배정 중",
            LectureStatus::InProgress => "진행 중",
            LectureStatus::Closed => "마감",
        }
    }

    /// Badge shown on the dashboard; closed lectures are never listed there.
    pub fn dashboard_label(self) -> Option<&'static str> {
        match self {
            LectureStatus::InProgress => Some("수업 진행 중"),
            LectureStatus::Open => Some("수강 신청 중"),
            LectureStatus::Recruiting => Some("강사 배정 중"),
            LectureStatus::Closed => None,
        }
    }
}

impl fmt::Display for LectureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LectureStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RECRUITING" => Ok(LectureStatus::Recruiting),
            "OPEN" => Ok(LectureStatus::Open),
            "IN_PROGRESS" => Ok(LectureStatus::InProgress),
            "CLOSED" => Ok(LectureStatus::Closed),
            other => Err(format!("unknown lecture status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecture {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub instructor_name: Option<String>,
    pub capacity: Option<u32>,
    pub enrolled_count: Option<u32>,
    pub day_time: Option<String>,
    pub room: Option<String>,
    pub status: LectureStatus,
}

impl Lecture {
    pub fn instructor_label(&self) -> String {
        match self.instructor_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("{} 강사님", name),
            _ => "강사 미정".to_string(),
        }
    }

    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => "강의 설명이 없습니다.",
        }
    }

    /// A lecture without a published capacity is never considered full.
    pub fn is_full(&self) -> bool {
        match (self.enrolled_count, self.capacity) {
            (Some(enrolled), Some(capacity)) => enrolled >= capacity,
            _ => false,
        }
    }

    pub fn seats_label(&self) -> Option<String> {
        match (self.enrolled_count, self.capacity) {
            (Some(enrolled), Some(capacity)) => Some(format!("{} / {}명", enrolled, capacity)),
            _ => None,
        }
    }

    pub fn enroll_button(&self) -> EnrollButton {
        match self.status {
            LectureStatus::Open if self.is_full() => EnrollButton::Full,
            LectureStatus::Open => EnrollButton::Enroll,
            _ => EnrollButton::Unavailable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollButton {
    Enroll,
    Full,
    Unavailable,
}

impl EnrollButton {
    pub fn label(self) -> &'static str {
        match self {
            EnrollButton::Enroll => "수강신청",
            EnrollButton::Full => "정원 마감",
            EnrollButton::Unavailable => "신청 불가",
        }
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, EnrollButton::Enroll)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Option<i64>,
    pub lecture: Lecture,
    pub joined_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub deadline: Timestamp,
    pub lecture_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "출석",
            AttendanceStatus::Late => "지각",
            AttendanceStatus::Absent => "결석",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub week: u32,
    pub attendance_date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
}

impl AttendanceSummary {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        records.iter().fold(
            AttendanceSummary {
                total: records.len(),
                ..Default::default()
            },
            |mut summary, record| {
                match record.status {
                    AttendanceStatus::Present => summary.present += 1,
                    AttendanceStatus::Late => summary.late += 1,
                    AttendanceStatus::Absent => summary.absent += 1,
                }
                summary
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lecture(status: LectureStatus, enrolled: Option<u32>, capacity: Option<u32>) -> Lecture {
        Lecture {
            id: 1,
            name: "로봇 기초".to_string(),
            description: None,
            instructor_name: None,
            capacity,
            enrolled_count: enrolled,
            day_time: None,
            room: None,
            status,
        }
    }

    #[test]
    fn open_and_full_lecture_shows_closed_seat_button() {
        let button = lecture(LectureStatus::Open, Some(20), Some(20)).enroll_button();
        assert_eq!(button, EnrollButton::Full);
        assert_eq!(button.label(), "정원 마감");
        assert!(!button.is_enabled());
    }

    #[test]
    fn open_lecture_with_seats_can_be_enrolled() {
        let button = lecture(LectureStatus::Open, Some(3), Some(20)).enroll_button();
        assert!(button.is_enabled());
        assert_eq!(button.label(), "수강신청");
    }

    #[test]
    fn non_open_lecture_is_unavailable() {
        for status in [LectureStatus::Recruiting, LectureStatus::InProgress, LectureStatus::Closed] {
            assert_eq!(lecture(status, Some(0), Some(10)).enroll_button(), EnrollButton::Unavailable);
        }
    }

    #[test]
    fn unknown_status_fails_to_decode() {
        let raw = r#"{"id":1,"name":"x","status":"ARCHIVED"}"#;
        assert!(serde_json::from_str::<Lecture>(raw).is_err());
    }

    #[test]
    fn attendance_summary_counts_each_status() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let records: Vec<AttendanceRecord> = [
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Late,
            AttendanceStatus::Absent,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, status)| AttendanceRecord {
            id: i as i64,
            week: i as u32 + 1,
            attendance_date: date,
            status,
        })
        .collect();

        let summary = AttendanceSummary::from_records(&records);
        assert_eq!(
            summary,
            AttendanceSummary {
                total: 4,
                present: 2,
                late: 1,
                absent: 1
            }
        );
    }
}
