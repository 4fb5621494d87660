//! Add Comment Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::form_feedback::{finish_submit, FormFeedback};
use crate::context::use_app_context;
use crate::forms::{CommentDraft, SubmitStatus};

#[component]
pub fn AddCommentForm(task_id: u32, #[prop(into)] on_added: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let draft = RwSignal::new(CommentDraft::default());
    let status = RwSignal::new(SubmitStatus::Idle);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let validated = draft.with_untracked(|d| d.validate(task_id));
        let Some(vars) = status.try_update(|s| s.begin(validated)).flatten() else {
            return;
        };

        let api = ctx.api();
        spawn_local(async move {
            let outcome = api::add_comment(&api, &vars).await;
            if let Ok(comment) = &outcome {
                log::info!("added comment #{} to task #{}", comment.id, task_id);
                draft.try_set(CommentDraft::default());
            }
            finish_submit(status, &outcome);
            if outcome.is_ok() {
                on_added.run(());
            }
        });
    };

    let busy = move || status.with(|s| s.is_in_flight());

    view! {
        <form class="entity-form comment-form" on:submit=on_submit>
            <textarea
                placeholder="Add a comment"
                required=true
                prop:value=move || draft.with(|d| d.content.clone())
                on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
            ></textarea>
            <input
                type="email"
                placeholder="Your email"
                required=true
                prop:value=move || draft.with(|d| d.author_email.clone())
                on:input=move |ev| draft.update(|d| d.author_email = event_target_value(&ev))
            />
            <FormFeedback status=status saved_text="Comment added." />
            <button type="submit" prop:disabled=busy>
                {move || if busy() { "Adding..." } else { "Add Comment" }}
            </button>
        </form>
    }
}
