//! Project List Component
//!
//! Projects of the selected organization. Held rows stay visible while the
//! list revalidates; switching organizations never shows another
//! organization's projects.

use leptos::prelude::*;

use crate::api;
use crate::components::list_notices::ListNotices;
use crate::components::project_form::UpdateProjectForm;
use crate::context::use_app_context;
use crate::models::{or_na, Project, StatusOption};
use crate::query::{use_query, FetchPolicy, ListPhase, LoadError, QueryState};

#[component]
pub fn ProjectList(#[prop(into)] on_select: Callback<u32>) -> impl IntoView {
    let ctx = use_app_context();
    let api = ctx.api();

    let projects = use_query(
        FetchPolicy::CacheAndNetwork,
        ctx.ready_scope(ctx.selected_org_slug),
        ctx.projects_version.into(),
        move |org_slug: String| {
            let api = api.clone();
            async move { api::list_projects(&api, &org_slug).await }
        },
    );

    let phase = Memo::new(move |_| projects.with(|s| s.phase()));

    let body = move || -> Result<AnyView, LoadError> {
        match phase.get() {
            ListPhase::Loading => Ok(view! { <p class="list-status">"Loading projects..."</p> }.into_any()),
            ListPhase::Failed(source) => Err(LoadError { what: "projects", source }),
            ListPhase::Empty => Ok(view! { <p class="list-empty">"No projects found."</p> }.into_any()),
            ListPhase::Ready => Ok(view! {
                <ul class="project-list">
                    <For
                        each=move || projects.with(|s| s.items().iter().map(|p| p.id).collect::<Vec<_>>())
                        key=|id| *id
                        children=move |id| view! { <ProjectRow projects=projects id=id on_select=on_select /> }
                    />
                </ul>
            }
            .into_any()),
        }
    };

    view! {
        <div class="project-list-view">
            <ListNotices state=projects what="projects" />
            {body}
        </div>
    }
}

#[component]
fn ProjectRow(
    projects: RwSignal<QueryState<String, Vec<Project>>>,
    id: u32,
    on_select: Callback<u32>,
) -> impl IntoView {
    let ctx = use_app_context();
    let editing = RwSignal::new(false);

    // Row data follows refetches; the last seen value covers the frame in
    // which the row is being removed.
    let row = Memo::new(move |prev: Option<&Project>| {
        projects
            .with(|s| s.items().iter().find(|p| p.id == id).cloned())
            .or_else(|| prev.cloned())
            .unwrap_or_else(|| placeholder(id))
    });

    let is_selected = move || ctx.selected_project_id.get() == Some(id);

    view! {
        <li class="project-row" class:selected=is_selected on:click=move |_| on_select.run(id)>
            <div class="row-header">
                <strong>{move || row.with(|p| p.name.clone())}</strong>
                <button
                    type="button"
                    class="edit-toggle"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        editing.update(|e| *e = !*e);
                    }
                >
                    {move || if editing.get() { "Close" } else { "Edit" }}
                </button>
            </div>
            <p class="description">{move || row.with(|p| p.description.clone())}</p>
            <p class="meta">
                {move || row.with(|p| {
                    format!("Status: {} | Due: {}", p.status.label(), or_na(p.due_date.as_deref()))
                })}
            </p>
            <p class="meta">
                {move || row.with(|p| format!("Tasks: {} / {} completed", p.completed_tasks, p.task_count))}
            </p>
            <Show when=move || editing.get()>
                <div class="row-editor" on:click=|ev| ev.stop_propagation()>
                    <UpdateProjectForm
                        project=row
                        on_updated=move |()| {
                            editing.set(false);
                            ctx.project_changed();
                        }
                        on_cancel=move |()| editing.set(false)
                    />
                </div>
            </Show>
        </li>
    }
}

fn placeholder(id: u32) -> Project {
    Project {
        id,
        name: String::new(),
        description: String::new(),
        status: Default::default(),
        due_date: None,
        task_count: 0,
        completed_tasks: 0,
    }
}
