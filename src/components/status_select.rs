//! Status Select Component
//!
//! `<select>` over a closed status enumeration. Only listed values can be
//! chosen, so forms never submit a status outside the set.

use leptos::prelude::*;

use crate::models::StatusOption;

#[component]
pub fn StatusSelect<S>(
    value: Signal<S>,
    #[prop(into)] on_change: Callback<S>,
    /// Locks the choice while the owning form is submitting
    disabled: Signal<bool>,
) -> impl IntoView
where
    S: StatusOption,
{
    view! {
        <select
            class="status-select"
            required=true
            prop:value=move || value.get().wire()
            prop:disabled=move || disabled.get()
            on:change=move |ev| {
                if let Some(status) = S::from_wire(&event_target_value(&ev)) {
                    on_change.run(status);
                }
            }
        >
            {S::ALL.iter().map(|status| {
                let status = *status;
                view! {
                    <option value=status.wire() selected=move || value.get() == status>
                        {status.label()}
                    </option>
                }
            }).collect_view()}
        </select>
    }
}
