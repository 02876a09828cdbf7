mod render;

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use doro_client::error::{ClientError, Result};
use doro_client::models::{ConsultationMethod, ConsultationStatus, ConsultationType};
use doro_client::nav::NavBar;
use doro_client::page::PageContext;
use doro_client::pages::*;
use doro_client::routes::Route;
use doro_client::session::{SessionContext, SqliteSessionStore};
use doro_client::ui::Ui;
use doro_client::{ClientConfig, HttpLmsApi};

#[derive(Parser)]
#[command(name = "doro")]
#[command(about = "Terminal client for the DORO learning platform")]
pub struct Cli {
    /// Overrides DORO_API_BASE_URL.
    #[arg(long, global = true)]
    api_base: Option<String>,
    /// Overrides DORO_SESSION_DB.
    #[arg(long, global = true)]
    session_db: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Login(LoginArgs),
    Signup(SignupArgs),
    FindPassword {
        email: String,
    },
    Logout,
    /// Shows the navigation bar for the stored session.
    Whoami,
    Dashboard,
    Courses {
        #[arg(long, default_value = "all")]
        filter: CatalogFilter,
    },
    Enroll {
        lecture_id: i64,
    },
    Consultations(ConsultationFilterArgs),
    Instructors,
    Consult(ConsultArgs),
    Thread {
        id: i64,
    },
    Comment {
        thread_id: i64,
        content: String,
    },
    Write(WriteArgs),
    Board {
        lecture_id: i64,
        /// Only threads of this course.
        #[arg(long)]
        course_only: bool,
        /// Opens one thread in the board's detail view.
        #[arg(long)]
        open: Option<i64>,
    },
    Course {
        lecture_id: i64,
        #[arg(long, value_enum, default_value_t = MenuArg::Tasks)]
        menu: MenuArg,
    },
    CourseNotices {
        lecture_id: i64,
    },
    CourseNotice {
        lecture_id: i64,
        notice_id: i64,
    },
    Notices,
    Notice {
        id: i64,
    },
    Tasks,
    Mypage {
        #[arg(long, value_enum, default_value_t = TabArg::Profile)]
        tab: TabArg,
    },
    EditProfile(EditProfileArgs),
    /// Mounts whatever page a client path points at.
    Open {
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MenuArg {
    Tasks,
    Attendance,
}

#[derive(Clone, Copy, ValueEnum)]
enum TabArg {
    Profile,
    Courses,
    Activity,
}

#[derive(Args)]
struct LoginArgs {
    username: String,
    #[arg(long)]
    password: String,
}

#[derive(Args)]
struct SignupArgs {
    username: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    password_confirm: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    first_name: String,
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    birth: String,
}

#[derive(Args)]
struct ConsultationFilterArgs {
    #[arg(long = "type")]
    kind: Option<ConsultationType>,
    #[arg(long)]
    method: Option<ConsultationMethod>,
    #[arg(long)]
    status: Option<ConsultationStatus>,
    #[arg(long, default_value = "")]
    instructor: String,
}

#[derive(Args)]
struct ConsultArgs {
    #[arg(long)]
    instructor: i64,
    #[arg(long)]
    method: ConsultationMethod,
    #[arg(long = "type")]
    kind: ConsultationType,
    /// YYYY-MM-DDTHH:MM
    #[arg(long)]
    date: String,
    #[arg(long, default_value = "")]
    topic: String,
    #[arg(long, default_value = "")]
    content: String,
}

#[derive(Args)]
struct WriteArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    content: String,
    #[arg(long)]
    lecture: Option<i64>,
}

#[derive(Args)]
struct EditProfileArgs {
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    birth: Option<NaiveDate>,
    /// Flips one interest tag; repeatable.
    #[arg(long = "toggle-interest")]
    toggle_interest: Vec<String>,
}

/// Prints alerts and follows navigation by logging it.
struct TerminalUi;

impl Ui for TerminalUi {
    fn alert(&self, message: &str) {
        println!("[알림] {}", message);
    }

    fn navigate(&self, route: Route) {
        info!(%route, "navigate");
        println!("-> {}", route);
    }

    fn back(&self) {
        info!("navigate back");
        println!("<- 뒤로");
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::new_from_env()?;
    if let Some(base) = cli.api_base.as_deref() {
        config = config.with_api_base_url(base)?;
    }
    if let Some(db) = cli.session_db {
        config = config.with_session_db(db);
    }

    let store = SqliteSessionStore::connect(&config.session_db_url).await?;
    let api = HttpLmsApi::new(&config)?;
    info!(api = %api.base_url(), session_db = %config.session_db_url, "client ready");

    let ctx = PageContext::new(
        Arc::new(api),
        SessionContext::new(Arc::new(store)),
        Arc::new(TerminalUi),
    );
    dispatch(ctx, cli.command).await
}

async fn dispatch(ctx: PageContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => {
            let mut page = LoginPage::new(ctx.clone());
            page.username = args.username;
            page.password = args.password;
            if !page.submit().await {
                println!("{}", page.error.as_deref().unwrap_or(login::LOGIN_FAILED));
            }
            render::nav(NavBar::mount(ctx).await.display());
        }
        Commands::Signup(args) => {
            let mut page = SignupPage::new(ctx);
            page.form = SignupForm {
                username: args.username,
                password: args.password,
                password_confirm: args.password_confirm,
                email: args.email,
                last_name: args.last_name,
                first_name: args.first_name,
                birth: args.birth,
            };
            page.submit().await;
        }
        Commands::FindPassword { email } => {
            let mut page = FindPasswordPage::new(ctx);
            page.email = email;
            if !page.submit().await {
                if let Some(message) = &page.message {
                    println!("{}", message);
                }
            }
        }
        Commands::Logout => {
            let mut nav = NavBar::mount(ctx).await;
            nav.logout().await?;
            render::nav(nav.display());
        }
        Commands::Whoami => {
            render::nav(NavBar::mount(ctx).await.display());
        }
        Commands::Open { path } => {
            let route: Route = path.parse().map_err(ClientError::Validation)?;
            return open(ctx, route).await;
        }
        Commands::Courses { filter } => {
            let mut page = CourseCatalogPage::new(ctx);
            page.mount().await;
            page.set_filter(filter);
            render::catalog(&page);
        }
        Commands::Enroll { lecture_id } => {
            let mut page = CourseCatalogPage::new(ctx);
            page.mount().await;
            if page.lectures.value().is_some() {
                page.enroll(lecture_id).await;
            }
        }
        Commands::Consultations(args) => {
            let mut page = ConsultationPage::new(ctx);
            page.mount().await;
            page.filters = ConsultationFilters {
                kind: args.kind,
                method: args.method,
                status: args.status,
                instructor: args.instructor,
            };
            render::consultations(&page);
        }
        Commands::Instructors => {
            let mut page = ConsultationPage::new(ctx);
            page.set_tab(ConsultationTab::Request).await;
            render::instructors(&page);
        }
        Commands::Consult(args) => {
            let mut page = ConsultationPage::new(ctx);
            page.tab = ConsultationTab::Request;
            page.form = ConsultationForm {
                instructor: Some(args.instructor),
                method: Some(args.method),
                date: args.date,
                kind: Some(args.kind),
                topic: args.topic,
                content: args.content,
            };
            if page.submit().await {
                render::consultations(&page);
            }
        }
        Commands::Comment { thread_id, content } => {
            let mut page = CommunityThreadPage::new(ctx, thread_id);
            page.mount().await;
            if page.thread.value().is_some() {
                page.comment = content;
                page.submit_comment().await;
                render::thread(&page);
            }
        }
        Commands::Write(args) => {
            let mut page = CommunityWritePage::new(ctx, args.lecture);
            page.title = args.title;
            page.content = args.content;
            page.submit().await;
        }
        Commands::Board {
            lecture_id,
            course_only,
            open,
        } => {
            let mut page = CourseCommunityPage::new(ctx, lecture_id);
            if course_only {
                page.set_tab(CommunityTab::Course).await;
            } else {
                page.mount().await;
            }
            if let Some(thread_id) = open {
                page.open_thread(thread_id).await;
            }
            render::board(&page);
        }
        Commands::Course { lecture_id, menu } => {
            let menu = match menu {
                MenuArg::Tasks => ManagementMenu::Tasks,
                MenuArg::Attendance => ManagementMenu::Attendance,
            };
            return open(ctx, route_for_menu(lecture_id, menu)).await;
        }
        Commands::Mypage { tab } => {
            let mut page = MyPage::new(ctx);
            page.mount().await;
            page.set_tab(match tab {
                TabArg::Profile => MyPageTab::Profile,
                TabArg::Courses => MyPageTab::Courses,
                TabArg::Activity => MyPageTab::Activity,
            });
            render::mypage(&page);
        }
        Commands::EditProfile(args) => {
            let mut page = MyPage::new(ctx);
            page.mount().await;
            page.start_edit();
            let Some(edit) = page.edit.as_mut() else {
                return Ok(());
            };
            if let Some(email) = args.email {
                edit.email = email;
            }
            if let Some(last_name) = args.last_name {
                edit.last_name = last_name;
            }
            if let Some(first_name) = args.first_name {
                edit.first_name = first_name;
            }
            if let Some(phone) = args.phone {
                edit.phone = Some(phone);
            }
            if let Some(birth) = args.birth {
                edit.birth = Some(birth);
            }
            for tag in &args.toggle_interest {
                page.toggle_interest(tag);
            }
            if page.save().await {
                render::mypage(&page);
            }
        }
        Commands::Thread { id } => return open(ctx, Route::CommunityThread(id)).await,
        Commands::CourseNotices { lecture_id } => {
            return open(ctx, Route::CourseNotices(lecture_id)).await;
        }
        Commands::CourseNotice {
            lecture_id,
            notice_id,
        } => {
            return open(
                ctx,
                Route::CourseNoticeDetail {
                    lecture: lecture_id,
                    notice: notice_id,
                },
            )
            .await;
        }
        Commands::Dashboard => return open(ctx, Route::Dashboard).await,
        Commands::Notices => return open(ctx, Route::Notices).await,
        Commands::Notice { id } => return open(ctx, Route::NoticeDetail(id)).await,
        Commands::Tasks => return open(ctx, Route::Tasks).await,
    }
    Ok(())
}

fn route_for_menu(lecture_id: i64, menu: ManagementMenu) -> Route {
    match menu {
        ManagementMenu::Tasks => Route::CourseManagement(lecture_id),
        ManagementMenu::Attendance => Route::CourseAttendance(lecture_id),
    }
}

/// Mounts the page behind `route` and prints it.
async fn open(ctx: PageContext, route: Route) -> Result<()> {
    match route {
        Route::Home | Route::Dashboard => {
            let mut page = DashboardPage::new(ctx);
            page.mount().await;
            render::dashboard(&page);
        }
        Route::Login | Route::Signup | Route::FindPassword => {
            println!("{} 는 입력이 필요한 화면입니다. 해당 명령을 사용하세요.", route);
        }
        Route::CommunityWrite { .. } => {
            println!("글쓰기는 `doro write` 명령을 사용하세요.");
        }
        Route::CourseCatalog => {
            let mut page = CourseCatalogPage::new(ctx);
            page.mount().await;
            render::catalog(&page);
        }
        Route::Consultation => {
            let mut page = ConsultationPage::new(ctx);
            page.mount().await;
            render::consultations(&page);
        }
        Route::MyPage => {
            let mut page = MyPage::new(ctx);
            page.mount().await;
            render::mypage(&page);
        }
        Route::Tasks => {
            let mut page = TasksPage::new(ctx);
            page.mount().await;
            render::tasks(&page);
        }
        Route::Notices => {
            let mut page = NoticesPage::new(ctx);
            page.mount().await;
            render::notices(&page);
        }
        Route::NoticeDetail(id) => {
            let mut page = NoticeDetailPage::new(ctx, id);
            page.mount().await;
            render::notice(&page);
        }
        Route::CommunityThread(id) => {
            let mut page = CommunityThreadPage::new(ctx, id);
            page.mount().await;
            render::thread(&page);
        }
        Route::CourseManagement(lecture) => {
            let mut page = CourseManagementPage::new(ctx, lecture, ManagementMenu::Tasks);
            page.mount().await;
            render::management(&page);
        }
        Route::CourseAttendance(lecture) => {
            let mut page = CourseManagementPage::new(ctx, lecture, ManagementMenu::Attendance);
            page.mount().await;
            render::management(&page);
        }
        Route::CourseNotices(lecture) => {
            let mut page = CourseNoticesPage::new(ctx, lecture);
            page.mount().await;
            render::course_notices(&page);
        }
        Route::CourseNoticeDetail { lecture, notice } => {
            let mut page = CourseNoticeDetailPage::new(ctx, lecture, notice);
            page.mount().await;
            render::course_notice(&page);
        }
        Route::CourseCommunity(lecture) => {
            let mut page = CourseCommunityPage::new(ctx, lecture);
            page.mount().await;
            render::board(&page);
        }
    }
    Ok(())
}
