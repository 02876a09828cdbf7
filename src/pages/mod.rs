//! One controller per screen. Each owns its view state and a shared
//! [`Lifetime`]; the host ends it through `unmount_handle` to cancel the
//! page's in-flight fetches.
//!
//! [`Lifetime`]: crate::page::Lifetime

pub mod community_thread;
pub mod community_write;
pub mod consultation;
pub mod course_catalog;
pub mod course_community;
pub mod course_management;
pub mod course_notice_detail;
pub mod course_notices;
pub mod dashboard;
pub mod find_password;
pub mod login;
pub mod mypage;
pub mod notice_detail;
pub mod notices;
pub mod signup;
pub mod tasks;

pub use community_thread::CommunityThreadPage;
pub use community_write::CommunityWritePage;
pub use consultation::{ConsultationFilters, ConsultationForm, ConsultationPage, ConsultationTab};
pub use course_catalog::{CatalogFilter, CourseCatalogPage};
pub use course_community::{CommunityTab, CourseCommunityPage};
pub use course_management::{CourseManagementPage, ManagementMenu};
pub use course_notice_detail::CourseNoticeDetailPage;
pub use course_notices::{CourseNoticesPage, NoticeRow};
pub use dashboard::DashboardPage;
pub use find_password::FindPasswordPage;
pub use login::LoginPage;
pub use mypage::{MyPage, MyPageTab};
pub use notice_detail::NoticeDetailPage;
pub use notices::{NoticesPage, notice_route};
pub use signup::{SignupForm, SignupPage};
pub use tasks::TasksPage;
