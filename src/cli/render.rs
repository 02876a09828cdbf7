use doro_client::error::ClientError;
use doro_client::models::format::{dot_date, dot_naive_date, long_datetime};
use doro_client::models::{Comment, INTEREST_OPTIONS, Lecture, Notice, Thread, UserProfile};
use doro_client::nav::{NAV_LINKS, NavDisplay};
use doro_client::page::LoadState;
use doro_client::pages::{
    CommunityTab, CommunityThreadPage, ConsultationPage, CourseCatalogPage, CourseCommunityPage,
    CourseManagementPage, CourseNoticeDetailPage, CourseNoticesPage, DashboardPage,
    ManagementMenu, MyPage, MyPageTab, NoticeDetailPage, NoticesPage, TasksPage,
};

/// Prints the body of a loaded slice, or what happened instead.
fn section<T>(state: &LoadState<T>, body: impl FnOnce(&T)) {
    match state {
        LoadState::Idle => {}
        LoadState::Loading => println!("로딩 중..."),
        LoadState::Success(value) => body(value),
        LoadState::Error(ClientError::Cancelled) => {}
        LoadState::Error(e) => println!("불러오지 못했습니다: {}", e),
    }
}

pub fn nav(display: &NavDisplay) {
    let links: Vec<&str> = NAV_LINKS.iter().map(|(label, _)| *label).collect();
    let account = match display {
        NavDisplay::Anonymous => "로그인 | 회원가입".to_string(),
        NavDisplay::SignedIn { name } => format!("{}님 | 로그아웃", name),
    };
    println!("DORO  {}  [{}]", links.join(" · "), account);
}

fn lecture_line(lecture: &Lecture) {
    let seats = lecture.seats_label().unwrap_or_default();
    println!(
        "  #{:<4} {} ({}) [{}] {}",
        lecture.id,
        lecture.name,
        lecture.instructor_label(),
        lecture.status.catalog_label(),
        seats
    );
}

pub fn dashboard(page: &DashboardPage) {
    println!("== 내 강의실 ==");
    section(&page.courses, |_| {
        let active = page.active_courses();
        if active.is_empty() {
            println!("  수강 중인 강의가 없습니다. (수강신청: /course)");
        }
        for enrollment in active {
            let status = enrollment.lecture.status.dashboard_label().unwrap_or("");
            println!(
                "  #{:<4} {} [{}] {}",
                enrollment.lecture.id,
                enrollment.lecture.name,
                status,
                enrollment.lecture.day_time.as_deref().unwrap_or("")
            );
        }
    });
    println!("== 최근 공지 ==");
    section(&page.notices, |notices| notice_lines(notices));
}

fn notice_lines(notices: &[Notice]) {
    if notices.is_empty() {
        println!("  등록된 공지가 없습니다.");
    }
    for notice in notices {
        println!(
            "  [{}] {} ({})",
            notice.category_label(),
            notice.title,
            dot_date(&notice.created_at)
        );
    }
}

pub fn catalog(page: &CourseCatalogPage) {
    println!("== 수강신청 ({}) ==", page.filter.label());
    section(&page.lectures, |_| {
        let visible = page.visible();
        if visible.is_empty() {
            println!("  조건에 맞는 강의가 없습니다.");
        }
        for lecture in visible {
            lecture_line(lecture);
            println!("        {}", lecture.description_or_default());
            println!("        -> {}", lecture.enroll_button().label());
        }
    });
}

pub fn consultations(page: &ConsultationPage) {
    println!("== 상담 내역 ==");
    section(&page.consultations, |_| {
        let items = page.filtered();
        if items.is_empty() {
            println!("  상담 내역이 없습니다.");
        }
        for item in items {
            println!(
                "  #{:<4} {} | {} | {} | {} | {}",
                item.id,
                item.instructor_name,
                item.method.short_label(),
                item.kind.label(),
                long_datetime(&item.preferred_date),
                item.status.label()
            );
        }
    });
}

pub fn instructors(page: &ConsultationPage) {
    println!("== 강사 목록 ==");
    section(&page.instructors, |instructors| {
        for instructor in instructors {
            println!("  #{:<4} {}", instructor.id, instructor.option_label());
        }
    });
}

fn comment_lines(comments: &[Comment]) {
    println!("  댓글 {}개", comments.len());
    for comment in comments {
        println!(
            "    - {}: {} ({})",
            comment.student_name,
            comment.content,
            long_datetime(&comment.created_at)
        );
    }
}

fn thread_body(thread: &Thread) {
    println!("== {} ==", thread.title);
    println!("  {} · {}", thread.student_name, long_datetime(&thread.created_at));
    println!();
    println!("{}", thread.content);
    println!();
    comment_lines(thread.comments());
}

pub fn thread(page: &CommunityThreadPage) {
    section(&page.thread, thread_body);
}

pub fn board(page: &CourseCommunityPage) {
    let tab = match page.tab {
        CommunityTab::All => "전체 게시판",
        CommunityTab::Course => "과목 게시판",
    };
    if let Some(selected) = &page.selected {
        thread_body(selected);
        return;
    }
    println!("== {} ==", tab);
    section(&page.threads, |threads| {
        if threads.is_empty() {
            println!("  게시글이 없습니다.");
        }
        for thread in threads {
            println!(
                "  #{:<4} {} - {} ({})",
                thread.id,
                thread.title,
                thread.student_name,
                dot_date(&thread.created_at)
            );
        }
    });
}

pub fn management(page: &CourseManagementPage) {
    match page.menu {
        ManagementMenu::Tasks => {
            println!("== 과제 ==");
            section(&page.tasks, |tasks| {
                if tasks.is_empty() {
                    println!("  등록된 과제가 없습니다.");
                }
                for task in tasks {
                    let marker = if page.selected_task == Some(task.id) { ">" } else { " " };
                    println!("{} #{:<4} {} (마감 {})", marker, task.id, task.title, long_datetime(&task.deadline));
                }
                if let Some(task) = page.selected() {
                    println!();
                    println!("{}", task.content);
                }
            });
        }
        ManagementMenu::Attendance => {
            println!("== 출결 ==");
            section(&page.attendance, |records| {
                let summary = page.summary();
                println!(
                    "  전체 {} · 출석 {} · 지각 {} · 결석 {}",
                    summary.total, summary.present, summary.late, summary.absent
                );
                for record in records {
                    println!(
                        "  {}주차 {} {}",
                        record.week,
                        dot_naive_date(&record.attendance_date),
                        record.status.label()
                    );
                }
            });
        }
    }
}

pub fn course_notices(page: &CourseNoticesPage) {
    println!("== 공지사항 ==");
    section(&page.notices, |_| {
        let rows = page.rows();
        if rows.is_empty() {
            println!("  등록된 공지가 없습니다.");
        }
        for row in rows {
            println!("  {:>3}  {} | {} | {} (#{})", row.number, row.title, row.author, row.date, row.id);
        }
    });
}

fn notice_body(notice: &Notice) {
    println!("== {} ==", notice.title);
    println!("  {} · {}", notice.author_label(), long_datetime(&notice.created_at));
    println!();
    println!("{}", notice.content);
}

pub fn notice(page: &NoticeDetailPage) {
    section(&page.notice, notice_body);
}

pub fn course_notice(page: &CourseNoticeDetailPage) {
    section(&page.notice, notice_body);
}

pub fn notices(page: &NoticesPage) {
    println!("== 전체 공지 ==");
    section(&page.notices, |_| {
        for (scope, title, date) in page.rows() {
            println!("  [{}] {} ({})", scope, title, date);
        }
    });
}

pub fn tasks(page: &TasksPage) {
    println!("== 과제 ==");
    section(&page.tasks, |tasks| {
        if tasks.is_empty() {
            println!("  제출할 과제가 없습니다.");
        }
        for task in tasks {
            println!(
                "  #{:<4} [{}] {} (마감 {})",
                task.id,
                task.lecture_name.as_deref().unwrap_or("-"),
                task.title,
                long_datetime(&task.deadline)
            );
        }
    });
}

fn profile_body(profile: &UserProfile) {
    println!("  아이디   {}", profile.username);
    println!("  이름     {}", profile.display_name());
    println!("  이메일   {}", profile.email);
    println!("  전화번호 {}", profile.phone.as_deref().unwrap_or("-"));
    println!(
        "  생년월일 {}",
        profile.birth.as_ref().map(dot_naive_date).unwrap_or_else(|| "-".to_string())
    );
    let interests: Vec<String> = INTEREST_OPTIONS
        .iter()
        .map(|tag| {
            let mark = if profile.has_interest(tag) { "x" } else { " " };
            format!("[{}] {}", mark, tag)
        })
        .collect();
    println!("  관심분야 {}", interests.join(" "));
}

pub fn mypage(page: &MyPage) {
    match page.tab {
        MyPageTab::Profile => {
            println!("== 회원 정보 ==");
            section(&page.profile, profile_body);
        }
        MyPageTab::Courses => {
            section(&page.enrollments, |_| {
                println!("== 수강 중인 강의 ==");
                for enrollment in page.current_courses() {
                    lecture_line(&enrollment.lecture);
                }
                println!("== 지난 강의 ==");
                for enrollment in page.past_courses() {
                    lecture_line(&enrollment.lecture);
                }
            });
        }
        MyPageTab::Activity => {
            section(&page.activity, |activity| {
                println!("== 내가 쓴 글 ==");
                for thread in &activity.threads {
                    println!("  #{:<4} {} ({})", thread.id, thread.title, dot_date(&thread.created_at));
                }
                println!("== 내가 쓴 댓글 ==");
                for comment in &activity.comments {
                    println!("  {} - {}", comment.content, comment.thread_title);
                }
            });
        }
    }
}
