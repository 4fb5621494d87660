//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::models::Organization;
use crate::query::gate_scope;
use crate::store::ShellState;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    shell: RwSignal<ShellState>,
    config: StoredValue<AppConfig>,
    /// Set once the anti-forgery cookie has been requested
    session_ready: RwSignal<bool>,
    /// Selected organization slug (scope of project views)
    pub selected_org_slug: Memo<Option<String>>,
    /// Selected project id (scope of task views)
    pub selected_project_id: Memo<Option<u32>>,
    pub organizations_version: Memo<u32>,
    pub projects_version: Memo<u32>,
    pub tasks_version: Memo<u32>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let shell = RwSignal::new(ShellState::new());
        Self {
            shell,
            config: StoredValue::new(config),
            session_ready: RwSignal::new(false),
            selected_org_slug: Memo::new(move |_| shell.with(|s| s.selected_org_slug())),
            selected_project_id: Memo::new(move |_| shell.with(|s| s.selected_project_id)),
            organizations_version: Memo::new(move |_| shell.with(|s| s.organizations_version)),
            projects_version: Memo::new(move |_| shell.with(|s| s.projects_version)),
            tasks_version: Memo::new(move |_| shell.with(|s| s.tasks_version)),
        }
    }

    /// Client for the configured endpoint
    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.config.get_value())
    }

    pub fn session_primed(&self) {
        self.session_ready.try_set(true);
    }

    /// `scope` held at `None` until the session is primed, so read views
    /// send nothing before the anti-forgery cookie exists.
    pub fn ready_scope<K>(&self, scope: impl Into<Signal<Option<K>>>) -> Signal<Option<K>>
    where
        K: Clone + Send + Sync + 'static,
    {
        let scope = scope.into();
        let ready = self.session_ready;
        Signal::derive(move || gate_scope(ready.get(), scope.get()))
    }

    pub fn select_organization(&self, organization: Organization) {
        log::info!("selected organization {}", organization.slug);
        self.shell.update(|s| s.select_organization(organization));
    }

    pub fn organization_created(&self) {
        self.shell.update(|s| s.organization_created());
    }

    pub fn select_project(&self, project_id: u32) {
        log::info!("selected project #{}", project_id);
        self.shell.update(|s| s.select_project(project_id));
    }

    pub fn project_changed(&self) {
        self.shell.update(|s| s.project_changed());
    }

    pub fn task_created(&self) {
        self.shell.update(|s| s.task_created());
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
