use std::sync::Arc;

use crate::models::{Assignment, AttendanceRecord, AttendanceSummary};
use crate::page::{AuthMode, Lifetime, LoadState, PageContext};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManagementMenu {
    #[default]
    Tasks,
    Attendance,
}

/// Per-course assignments and attendance. Only the active menu is fetched.
pub struct CourseManagementPage {
    ctx: PageContext,
    lifetime: Arc<Lifetime>,
    lecture_id: i64,
    pub menu: ManagementMenu,
    pub tasks: LoadState<Vec<Assignment>>,
    pub selected_task: Option<i64>,
    pub attendance: LoadState<Vec<AttendanceRecord>>,
}

impl CourseManagementPage {
    pub fn new(ctx: PageContext, lecture_id: i64, menu: ManagementMenu) -> Self {
        Self {
            ctx,
            lifetime: Arc::new(Lifetime::new()),
            lecture_id,
            menu,
            tasks: LoadState::Idle,
            selected_task: None,
            attendance: LoadState::Idle,
        }
    }

    pub fn lecture_id(&self) -> i64 {
        self.lecture_id
    }

    pub fn unmount_handle(&self) -> Arc<Lifetime> {
        self.lifetime.clone()
    }

    pub async fn mount(&mut self) {
        let api = self.ctx.api.clone();
        let lecture_id = self.lecture_id;
        let handle = self.lifetime.handle();
        let auth = AuthMode::login_required();

        match self.menu {
            ManagementMenu::Tasks => {
                self.tasks = LoadState::Loading;
                self.tasks = self
                    .ctx
                    .load(&auth, &handle, move |creds| async move {
                        api.fetch_lecture_assignments(creds.bearer()?, lecture_id)
                            .await
                    })
                    .await;
                self.selected_task = self
                    .tasks
                    .value()
                    .and_then(|tasks| tasks.first())
                    .map(|task| task.id);
            }
            ManagementMenu::Attendance => {
                self.attendance = LoadState::Loading;
                self.attendance = self
                    .ctx
                    .load(&auth, &handle, move |creds| async move {
                        api.fetch_attendance(creds.bearer()?, lecture_id).await
                    })
                    .await;
            }
        }
    }

    pub async fn select_menu(&mut self, menu: ManagementMenu) {
        if self.menu != menu {
            self.menu = menu;
            self.mount().await;
        }
    }

    pub fn select_task(&mut self, task_id: i64) {
        self.selected_task = Some(task_id);
    }

    pub fn selected(&self) -> Option<&Assignment> {
        let id = self.selected_task?;
        self.tasks.value()?.iter().find(|task| task.id == id)
    }

    pub fn summary(&self) -> AttendanceSummary {
        self.attendance
            .value()
            .map(|records| AttendanceSummary::from_records(records))
            .unwrap_or_default()
    }
}
