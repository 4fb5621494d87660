//! Project Board App
//!
//! Top-level layout: organizations, then the projects of the selected
//! organization, then the tasks of the selected project.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{
    CreateOrganizationForm, CreateProjectForm, CreateTaskForm, OrganizationList, ProjectList, ProjectStatsSummary,
    TaskList,
};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::models::Organization;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let ctx = AppContext::new(config);
    provide_context(ctx);

    // Mutations need the CSRF cookie the server hands out on this request
    let api = ctx.api();
    spawn_local(async move {
        if let Err(e) = api.ensure_csrf_cookie().await {
            log::warn!("could not prime CSRF cookie: {}", e);
        }
        // Release the read views either way; a missing cookie then shows as a list error
        ctx.session_primed();
    });

    let has_organization = move || ctx.selected_org_slug.with(Option::is_some);
    let has_project = move || ctx.selected_project_id.with(Option::is_some);

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Mini Project Management"</h1>
            </header>

            <main class="main-content">
                <section class="board-section organizations">
                    <CreateOrganizationForm on_created=move |()| ctx.organization_created() />
                    <h2>"Organizations"</h2>
                    <ErrorBoundary fallback=section_error>
                        <OrganizationList on_select=move |org: Organization| ctx.select_organization(org) />
                    </ErrorBoundary>
                </section>

                <Show when=has_organization>
                    <section class="board-section projects">
                        <CreateProjectForm
                            org_slug=ctx.selected_org_slug
                            on_created=move |()| ctx.project_changed()
                        />
                        <h2>"Projects"</h2>
                        <ProjectStatsSummary />
                        <ErrorBoundary fallback=section_error>
                            <ProjectList on_select=move |id: u32| ctx.select_project(id) />
                        </ErrorBoundary>
                    </section>
                </Show>

                <Show when=has_project>
                    <section class="board-section tasks">
                        <CreateTaskForm
                            project_id=ctx.selected_project_id
                            on_created=move |()| ctx.task_created()
                        />
                        <h2>"Tasks"</h2>
                        <ErrorBoundary fallback=section_error>
                            <TaskList />
                        </ErrorBoundary>
                    </section>
                </Show>
            </main>
        </div>
    }
}

/// Inline failure of one read view; the forms next to it keep rendering.
fn section_error(errors: ArcRwSignal<Errors>) -> impl IntoView {
    view! {
        <div class="section-error">
            {move || {
                errors
                    .get()
                    .into_iter()
                    .map(|(_, e)| view! { <p class="list-error">{e.to_string()}</p> })
                    .collect_view()
            }}
        </div>
    }
}
