use std::fmt;
use std::str::FromStr;

use reqwest::Url;

/// Canonical client route set. The course catalog lives at `/course`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    FindPassword,
    CourseCatalog,
    Consultation,
    MyPage,
    Dashboard,
    Tasks,
    Notices,
    NoticeDetail(i64),
    CommunityThread(i64),
    CommunityWrite { lecture: Option<i64> },
    CourseManagement(i64),
    CourseNotices(i64),
    CourseNoticeDetail { lecture: i64, notice: i64 },
    CourseCommunity(i64),
    CourseAttendance(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::FindPassword => "/find-password".to_string(),
            Route::CourseCatalog => "/course".to_string(),
            Route::Consultation => "/consultation".to_string(),
            Route::MyPage => "/mypage".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Tasks => "/dashboard/tasks".to_string(),
            Route::Notices => "/dashboard/notices".to_string(),
            Route::NoticeDetail(id) => format!("/dashboard/notices/{}", id),
            Route::CommunityThread(id) => format!("/dashboard/community/{}", id),
            Route::CommunityWrite { lecture: None } => "/dashboard/community/write".to_string(),
            Route::CommunityWrite {
                lecture: Some(lecture),
            } => format!("/dashboard/community/write?lecture_id={}", lecture),
            Route::CourseManagement(id) => format!("/dashboard/courses/{}/management", id),
            Route::CourseNotices(id) => format!("/dashboard/courses/{}/notices", id),
            Route::CourseNoticeDetail { lecture, notice } => {
                format!("/dashboard/courses/{}/notices/{}", lecture, notice)
            }
            Route::CourseCommunity(id) => format!("/dashboard/courses/{}/community", id),
            Route::CourseAttendance(id) => format!("/dashboard/courses/{}/attendance", id),
        }
    }

    /// Whether the page behind this route refuses to load without a session.
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Route::Home
                | Route::Login
                | Route::Signup
                | Route::FindPassword
                | Route::CommunityThread(_)
                | Route::CourseCommunity(_)
        )
    }

    /// Tabs of the per-course layout, in display order.
    pub fn course_tabs(lecture: i64) -> [(&'static str, Route); 4] {
        [
            ("강의관리", Route::CourseManagement(lecture)),
            ("공지 확인", Route::CourseNotices(lecture)),
            ("학생 커뮤니티", Route::CourseCommunity(lecture)),
            ("출결 확인", Route::CourseAttendance(lecture)),
        ]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Routes are paths; they are resolved against a fixed origin to read them.
const ROUTE_BASE: &str = "http://doro.local/";

impl FromStr for Route {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(ROUTE_BASE)
            .and_then(|base| base.join(raw))
            .map_err(|e| format!("invalid route {}: {}", raw, e))?;
        let segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();
        let id = |s: &str| s.parse::<i64>().map_err(|_| format!("invalid id in route: {}", raw));

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["find-password"] => Route::FindPassword,
            ["course"] => Route::CourseCatalog,
            ["consultation"] => Route::Consultation,
            ["mypage"] => Route::MyPage,
            ["dashboard"] => Route::Dashboard,
            ["dashboard", "tasks"] => Route::Tasks,
            ["dashboard", "notices"] => Route::Notices,
            ["dashboard", "notices", n] => Route::NoticeDetail(id(*n)?),
            ["dashboard", "community", "write"] => {
                let lecture = url
                    .query_pairs()
                    .find(|(key, _)| key == "lecture_id")
                    .map(|(_, value)| id(value.as_ref()))
                    .transpose()?;
                Route::CommunityWrite { lecture }
            }
            ["dashboard", "community", n] => Route::CommunityThread(id(*n)?),
            ["dashboard", "courses", c, "management"] => Route::CourseManagement(id(*c)?),
            ["dashboard", "courses", c, "notices"] => Route::CourseNotices(id(*c)?),
            ["dashboard", "courses", c, "notices", n] => Route::CourseNoticeDetail {
                lecture: id(*c)?,
                notice: id(*n)?,
            },
            ["dashboard", "courses", c, "community"] => Route::CourseCommunity(id(*c)?),
            ["dashboard", "courses", c, "attendance"] => Route::CourseAttendance(id(*c)?),
            _ => return Err(format!("unknown route: {}", raw)),
        };
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_route_carries_lecture_query() {
        let route: Route = "/dashboard/community/write?lecture_id=12".parse().unwrap();
        assert_eq!(route, Route::CommunityWrite { lecture: Some(12) });
        assert_eq!(route.path(), "/dashboard/community/write?lecture_id=12");
    }

    #[test]
    fn write_route_ignores_other_query_pairs() {
        let route: Route = "/dashboard/community/write?tab=course&lecture_id=7#form"
            .parse()
            .unwrap();
        assert_eq!(route, Route::CommunityWrite { lecture: Some(7) });

        let route: Route = "/dashboard/community/write?from=board".parse().unwrap();
        assert_eq!(route, Route::CommunityWrite { lecture: None });
        assert!("/dashboard/community/write?lecture_id=abc".parse::<Route>().is_err());
    }

    #[test]
    fn nested_course_routes_parse() {
        let route: Route = "/dashboard/courses/3/notices/9".parse().unwrap();
        assert_eq!(route, Route::CourseNoticeDetail { lecture: 3, notice: 9 });
        assert!(route.requires_auth());
    }

    #[test]
    fn legacy_registration_path_is_not_canonical() {
        assert!("/course-registration".parse::<Route>().is_err());
        assert_eq!(Route::CourseCatalog.path(), "/course");
    }
}
