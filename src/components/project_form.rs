//! Project Form Components
//!
//! Create form scoped to the selected organization, and an edit form seeded
//! from an existing project.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::form_feedback::{finish_submit, FormFeedback};
use crate::components::status_select::StatusSelect;
use crate::context::use_app_context;
use crate::forms::{ProjectDraft, SeededDraft, SubmitStatus};
use crate::models::{Project, ProjectStatus};

#[component]
pub fn CreateProjectForm(
    #[prop(into)] org_slug: Signal<Option<String>>,
    #[prop(into)] on_created: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let draft = RwSignal::new(ProjectDraft::default());
    let status = RwSignal::new(SubmitStatus::Idle);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(org_slug) = org_slug.get_untracked() else {
            return;
        };
        let validated = draft.with_untracked(|d| d.validate_create(&org_slug));
        let Some(vars) = status.try_update(|s| s.begin(validated)).flatten() else {
            return;
        };

        let api = ctx.api();
        spawn_local(async move {
            let outcome = api::create_project(&api, &vars).await;
            if let Ok(project) = &outcome {
                log::info!("created project {} in {}", project.name, vars.org_slug);
                draft.try_set(ProjectDraft::default());
            }
            finish_submit(status, &outcome);
            if outcome.is_ok() {
                on_created.run(());
            }
        });
    };

    let busy = move || status.with(|s| s.is_in_flight());

    view! {
        <form class="entity-form project-form" on:submit=on_submit>
            <h2>"Create Project"</h2>
            <input
                type="text"
                placeholder="Project Name"
                required=true
                prop:value=move || draft.with(|d| d.name.clone())
                on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
            />
            <textarea
                placeholder="Description"
                prop:value=move || draft.with(|d| d.description.clone())
                on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
            ></textarea>
            <StatusSelect
                value=Signal::derive(move || draft.with(|d| d.status))
                on_change=move |s: ProjectStatus| draft.update(|d| d.status = s)
                disabled=Signal::derive(busy)
            />
            <input
                type="date"
                prop:value=move || draft.with(|d| d.due_date.clone())
                on:input=move |ev| draft.update(|d| d.due_date = event_target_value(&ev))
            />
            <FormFeedback status=status saved_text="Project created." />
            <button type="submit" prop:disabled=busy>
                {move || if busy() { "Creating..." } else { "Create Project" }}
            </button>
        </form>
    }
}

/// Edit form for an existing project.
///
/// A refetch that delivers another project or new field values re-seeds the
/// inputs; one that only changes the task counts leaves unsaved edits in place.
#[component]
pub fn UpdateProjectForm(
    #[prop(into)] project: Signal<Project>,
    #[prop(into)] on_updated: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(project.with_untracked(SeededDraft::<Project, ProjectDraft>::new));
    let status = RwSignal::new(SubmitStatus::Idle);

    Effect::new(move |_| {
        project.with(|p| {
            form.maybe_update(|f| {
                let reseeded = f.reseed(p);
                if reseeded {
                    log::debug!("re-seeding edit form for project #{}", p.id);
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
            let outcome = api::update_project(&api, &vars).await;
            if let Ok(updated) = &outcome {
                log::info!("updated project {} (#{})", updated.name, updated.id);
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

    view! {
        <form class="entity-form project-form edit" on:submit=on_submit>
            <input
                type="text"
                placeholder="Project Name"
                required=true
                prop:value=move || form.with(|f| f.draft.name.clone())
                on:input=move |ev| form.update(|f| f.draft.name = event_target_value(&ev))
            />
            <textarea
                placeholder="Description"
                prop:value=move || form.with(|f| f.draft.description.clone())
                on:input=move |ev| form.update(|f| f.draft.description = event_target_value(&ev))
            ></textarea>
            <StatusSelect
                value=Signal::derive(move || form.with(|f| f.draft.status))
                on_change=move |s: ProjectStatus| form.update(|f| f.draft.status = s)
                disabled=Signal::derive(busy)
            />
            <input
                type="date"
                prop:value=move || form.with(|f| f.draft.due_date.clone())
                on:input=move |ev| form.update(|f| f.draft.due_date = event_target_value(&ev))
            />
            <FormFeedback status=status saved_text="Project updated." />
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
