//! Task List Component
//!
//! Tasks of the selected project with their comments. Editing a task or
//! adding a comment refreshes only this list.

use leptos::prelude::*;

use crate::api;
use crate::components::comment_form::AddCommentForm;
use crate::components::list_notices::ListNotices;
use crate::components::task_form::UpdateTaskForm;
use crate::context::use_app_context;
use crate::models::{or_na, Comment, StatusOption, Task};
use crate::query::{combined_refresh, use_query, FetchPolicy, ListPhase, LoadError, QueryState};

#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_app_context();
    let api = ctx.api();
    let local_refresh = RwSignal::new(0u32);

    let refresh = Signal::derive(move || combined_refresh(ctx.tasks_version.get(), local_refresh.get()));

    let tasks = use_query(
        FetchPolicy::CacheAndNetwork,
        ctx.ready_scope(ctx.selected_project_id),
        refresh,
        move |project_id: u32| {
            let api = api.clone();
            async move { api::list_tasks(&api, project_id).await }
        },
    );

    let refetch = Callback::new(move |()| local_refresh.update(|n| *n = n.wrapping_add(1)));
    let phase = Memo::new(move |_| tasks.with(|s| s.phase()));

    let body = move || -> Result<AnyView, LoadError> {
        match phase.get() {
            ListPhase::Loading => Ok(view! { <p class="list-status">"Loading tasks..."</p> }.into_any()),
            ListPhase::Failed(source) => Err(LoadError { what: "tasks", source }),
            ListPhase::Empty => Ok(view! { <p class="list-empty">"No tasks found."</p> }.into_any()),
            ListPhase::Ready => Ok(view! {
                <ul class="task-list">
                    <For
                        each=move || tasks.with(|s| s.items().iter().map(|t| t.id).collect::<Vec<_>>())
                        key=|id| *id
                        children=move |id| view! { <TaskRow tasks=tasks id=id on_changed=refetch /> }
                    />
                </ul>
            }
            .into_any()),
        }
    };

    view! {
        <div class="task-list-view">
            <ListNotices state=tasks what="tasks" />
            {body}
        </div>
    }
}

#[component]
fn TaskRow(
    tasks: RwSignal<QueryState<u32, Vec<Task>>>,
    id: u32,
    on_changed: Callback<()>,
) -> impl IntoView {
    let editing = RwSignal::new(false);

    let row = Memo::new(move |prev: Option<&Task>| {
        tasks
            .with(|s| s.items().iter().find(|t| t.id == id).cloned())
            .or_else(|| prev.cloned())
            .unwrap_or_else(|| placeholder(id))
    });
    let comments = Memo::new(move |_| row.with(|t| t.comments.clone()));

    view! {
        <li class="task-row">
            <div class="row-header">
                <strong>{move || row.with(|t| t.title.clone())}</strong>
                <button type="button" class="edit-toggle" on:click=move |_| editing.update(|e| *e = !*e)>
                    {move || if editing.get() { "Close" } else { "Edit" }}
                </button>
            </div>
            <p class="description">{move || row.with(|t| t.description.clone())}</p>
            <p class="meta">
                {move || row.with(|t| {
                    format!(
                        "Status: {} | Assignee: {} | Due: {}",
                        t.status.label(),
                        or_na(t.assignee_email.as_deref()),
                        or_na(t.due_date.as_deref()),
                    )
                })}
            </p>
            <Show when=move || editing.get()>
                <UpdateTaskForm
                    task=row
                    on_updated=move |()| {
                        editing.set(false);
                        on_changed.run(());
                    }
                    on_cancel=move |()| editing.set(false)
                />
            </Show>
            <div class="comments">
                <h4>"Comments"</h4>
                <Show
                    when=move || comments.with(|c| !c.is_empty())
                    fallback=|| view! { <p class="list-empty">"No comments yet."</p> }
                >
                    <ul class="comment-list">
                        <For each=move || comments.get() key=|c| c.id let:comment>
                            <CommentItem comment=comment />
                        </For>
                    </ul>
                </Show>
                <AddCommentForm task_id=id on_added=on_changed />
            </div>
        </li>
    }
}

#[component]
fn CommentItem(comment: Comment) -> impl IntoView {
    view! {
        <li class="comment">
            <p>{comment.content}</p>
            <small>{format!("{} · {}", comment.author_email, local_timestamp(&comment.timestamp))}</small>
        </li>
    }
}

/// Render a server timestamp in the browser's locale, or as received when it
/// does not parse.
fn local_timestamp(raw: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(raw));
        if !date.get_time().is_nan() {
            return String::from(date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED));
        }
    }
    raw.to_string()
}

fn placeholder(id: u32) -> Task {
    Task {
        id,
        title: String::new(),
        description: String::new(),
        status: Default::default(),
        assignee_email: None,
        due_date: None,
        comments: Vec::new(),
    }
}
