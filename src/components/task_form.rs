//! Task Form Components

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::form_feedback::{finish_submit, FormFeedback};
use crate::components::status_select::StatusSelect;
use crate::context::use_app_context;
use crate::forms::{SeededDraft, SubmitStatus, TaskDraft};
use crate::models::{Task, TaskStatus};

/// Shared inputs of the create and edit forms
#[component]
fn TaskFields(
    #[prop(into)] draft: Signal<TaskDraft>,
    #[prop(into)] on_edit: Callback<TaskDraft>,
    busy: Signal<bool>,
) -> impl IntoView {
    let edit = move |apply: fn(&mut TaskDraft, String)| {
        move |ev: web_sys::Event| {
            let mut next = draft.get_untracked();
            apply(&mut next, event_target_value(&ev));
            on_edit.run(next);
        }
    };

    view! {
        <input
            type="text"
            placeholder="Task Title"
            required=true
            prop:value=move || draft.with(|d| d.title.clone())
            on:input=edit(|d, v| d.title = v)
        />
        <textarea
            placeholder="Description"
            prop:value=move || draft.with(|d| d.description.clone())
            on:input=edit(|d, v| d.description = v)
        ></textarea>
        <StatusSelect
            value=Signal::derive(move || draft.with(|d| d.status))
            on_change=move |s: TaskStatus| {
                let mut next = draft.get_untracked();
                next.status = s;
                on_edit.run(next);
            }
            disabled=busy
        />
        <input
            type="email"
            placeholder="Assignee Email"
            prop:value=move || draft.with(|d| d.assignee_email.clone())
            on:input=edit(|d, v| d.assignee_email = v)
        />
        <input
            type="date"
            prop:value=move || draft.with(|d| d.due_date.clone())
            on:input=edit(|d, v| d.due_date = v)
        />
    }
}

#[component]
pub fn CreateTaskForm(
    #[prop(into)] project_id: Signal<Option<u32>>,
    #[prop(into)] on_created: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let draft = RwSignal::new(TaskDraft::default());
    let status = RwSignal::new(SubmitStatus::Idle);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(project_id) = project_id.get_untracked() else {
            return;
        };
        let validated = draft.with_untracked(|d| d.validate_create(project_id));
        let Some(vars) = status.try_update(|s| s.begin(validated)).flatten() else {
            return;
        };

        let api = ctx.api();
        spawn_local(async move {
            let outcome = api::create_task(&api, &vars).await;
            if let Ok(task) = &outcome {
                log::info!("created task {} in project #{}", task.title, vars.project_id);
                draft.try_set(TaskDraft::default());
            }
            finish_submit(status, &outcome);
            if outcome.is_ok() {
                on_created.run(());
            }
        });
    };

    let busy = move || status.with(|s| s.is_in_flight());

    view! {
        <form class="entity-form task-form" on:submit=on_submit>
            <h2>"Create Task"</h2>
            <TaskFields draft=draft on_edit=move |next: TaskDraft| draft.set(next) busy=Signal::derive(busy) />
            <FormFeedback status=status saved_text="Task created." />
            <button type="submit" prop:disabled=busy>
                {move || if busy() { "Creating..." } else { "Create Task" }}
            </button>
        </form>
    }
}

/// Edit form for an existing task. Re-seeds when another task or new field
/// values arrive; a refetch carrying only new comments keeps the edits.
#[component]
pub fn UpdateTaskForm(
    #[prop(into)] task: Signal<Task>,
    #[prop(into)] on_updated: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(task.with_untracked(SeededDraft::<Task, TaskDraft>::new));
    let status = RwSignal::new(SubmitStatus::Idle);

    Effect::new(move |_| {
        task.with(|t| {
            form.maybe_update(|f| {
                let reseeded = f.reseed(t);
                if reseeded {
                    log::debug!("re-seeding edit form for task #{}", t.id);
                }
                reseeded
            });
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let validated = form.with_untracked(|f| f.draft.validate_update(f.source().id));
        let Some(vars) = status.try_update(|s| s.begin(validated)).flatten() else {
            return;
        };

        let api = ctx.api();
        spawn_local(async move {
            let outcome = api::update_task(&api, &vars).await;
            if let Ok(updated) = &outcome {
                log::info!("updated task {} (#{})", updated.title, updated.id);
            }
            finish_submit(status, &outcome);
            if outcome.is_ok() {
                on_updated.run(());
            }
        });
    };

    let on_cancel_click = move |_| {
        form.update(|f| f.revert());
        status.set(SubmitStatus::Idle);
        on_cancel.run(());
    };

    let busy = move || status.with(|s| s.is_in_flight());
    let draft = Signal::derive(move || form.with(|f| f.draft.clone()));

    view! {
        <form class="entity-form task-form edit" on:submit=on_submit>
            <TaskFields draft=draft on_edit=move |next: TaskDraft| form.update(|f| f.draft = next) busy=Signal::derive(busy) />
            <FormFeedback status=status saved_text="Task updated." />
            <div class="form-actions">
                <button type="submit" prop:disabled=busy>
                    {move || if busy() { "Saving..." } else { "Save" }}
                </button>
                <button type="button" prop:disabled=busy on:click=on_cancel_click>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
