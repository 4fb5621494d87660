//! Form Feedback Component
//!
//! Inline failure message or transient "saved" notice under a form.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::forms::SubmitStatus;

/// How long the "saved" notice stays up
const NOTICE_MS: u32 = 3_000;

#[component]
pub fn FormFeedback(
    status: RwSignal<SubmitStatus>,
    #[prop(into)] saved_text: String,
) -> impl IntoView {
    view! {
        {move || status.with(|s| match s {
            SubmitStatus::Failed(message) => {
                view! { <p class="form-error">{message.clone()}</p> }.into_any()
            }
            SubmitStatus::Saved => {
                view! { <p class="form-notice">{saved_text.clone()}</p> }.into_any()
            }
            _ => ().into_any(),
        })}
    }
}

/// Record the outcome of a submission; a success notice clears itself.
pub fn finish_submit<T, E: std::fmt::Display>(status: RwSignal<SubmitStatus>, outcome: &Result<T, E>) {
    status.try_update(|s| s.finish(outcome));
    if outcome.is_ok() {
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_MS).await;
            status.try_update(|s| s.dismiss_notice());
        });
    }
}
