//! Create Organization Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::form_feedback::{finish_submit, FormFeedback};
use crate::context::use_app_context;
use crate::forms::{OrganizationDraft, SubmitStatus};

/// Form for creating organizations
#[component]
pub fn CreateOrganizationForm(#[prop(into)] on_created: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let draft = RwSignal::new(OrganizationDraft::default());
    let status = RwSignal::new(SubmitStatus::Idle);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let validated = draft.with_untracked(|d| d.validate());
        let Some(vars) = status.try_update(|s| s.begin(validated)).flatten() else {
            return;
        };

        let api = ctx.api();
        spawn_local(async move {
            let outcome = api::create_organization(&api, &vars).await;
            if let Ok(org) = &outcome {
                log::info!("created organization {} (#{})", org.slug, org.id);
                draft.try_set(OrganizationDraft::default());
            }
            finish_submit(status, &outcome);
            if outcome.is_ok() {
                on_created.run(());
            }
        });
    };

    let busy = move || status.with(|s| s.is_in_flight());

    view! {
        <form class="entity-form organization-form" on:submit=on_submit>
            <h2>"Create Organization"</h2>
            <input
                type="text"
                placeholder="Name"
                required=true
                prop:value=move || draft.with(|d| d.name.clone())
                on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Slug (lowercase, numbers, hyphens)"
                pattern="^[a-z0-9\\-]+$"
                title="Lowercase letters, numbers and hyphens only"
                required=true
                prop:value=move || draft.with(|d| d.slug.clone())
                on:input=move |ev| draft.update(|d| d.slug = event_target_value(&ev))
            />
            <input
                type="email"
                placeholder="Contact Email"
                required=true
                prop:value=move || draft.with(|d| d.contact_email.clone())
                on:input=move |ev| draft.update(|d| d.contact_email = event_target_value(&ev))
            />
            <FormFeedback status=status saved_text="Organization created." />
            <button type="submit" prop:disabled=busy>
                {move || if busy() { "Creating..." } else { "Create Organization" }}
            </button>
        </form>
    }
}
