//! List Notices Component
//!
//! "Refreshing..." and stale-error lines shown above items that are still on
//! screen while a refetch runs or after it failed.

use leptos::prelude::*;

use crate::query::QueryState;

#[component]
pub fn ListNotices<K, X>(state: RwSignal<QueryState<K, Vec<X>>>, what: &'static str) -> impl IntoView
where
    K: Send + Sync + 'static,
    X: Send + Sync + 'static,
{
    let refreshing = Memo::new(move |_| state.with(|s| s.is_refreshing()));
    let stale_error = Memo::new(move |_| state.with(|s| s.stale_error().map(|e| e.to_string())));

    view! {
        <Show when=move || refreshing.get()>
            <p class="list-status refreshing">"Refreshing..."</p>
        </Show>
        {move || stale_error.get().map(|message| view! {
            <p class="list-error">{format!("Error loading {}: {}", what, message)}</p>
        })}
    }
}
