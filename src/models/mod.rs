pub mod community;
pub mod consultation;
pub mod format;
pub mod lecture;
pub mod notice;
pub mod user;

use chrono::{DateTime, FixedOffset};

/// Server timestamps keep the offset they were sent with.
pub type Timestamp = DateTime<FixedOffset>;

pub use community::{ActivityComment, Comment, MyActivity, NewComment, NewThread, Thread};
pub use consultation::{
    Consultation, ConsultationMethod, ConsultationRequest, ConsultationStatus, ConsultationType,
    Instructor,
};
pub use lecture::{
    Assignment, AttendanceRecord, AttendanceStatus, AttendanceSummary, EnrollButton, Enrollment,
    Lecture, LectureStatus,
};
pub use notice::{Notice, NoticeKind};
pub use user::{
    INTEREST_OPTIONS, LoginRequest, LoginResponse, MessageResponse, PasswordResetRequest,
    ProfileUpdateResponse, SignupRequest, SignupResponse, TokenPair, UserProfile,
};
