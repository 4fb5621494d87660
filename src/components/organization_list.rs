//! Organization List Component
//!
//! Always refetches from the network; the selected organization is highlighted.

use leptos::prelude::*;

use crate::api;
use crate::context::use_app_context;
use crate::models::Organization;
use crate::query::{use_query, FetchPolicy, ListPhase, LoadError};

#[component]
pub fn OrganizationList(#[prop(into)] on_select: Callback<Organization>) -> impl IntoView {
    let ctx = use_app_context();
    let api = ctx.api();

    let organizations = use_query(
        FetchPolicy::NetworkOnly,
        ctx.ready_scope(Signal::derive(|| Some(()))),
        ctx.organizations_version.into(),
        move |()| {
            let api = api.clone();
            async move { api::list_organizations(&api).await }
        },
    );

    let phase = Memo::new(move |_| organizations.with(|s| s.phase()));

    let body = move || -> Result<AnyView, LoadError> {
        match phase.get() {
            ListPhase::Loading => Ok(view! { <p class="list-status">"Loading organizations..."</p> }.into_any()),
            ListPhase::Failed(source) => Err(LoadError { what: "organizations", source }),
            ListPhase::Empty => Ok(view! { <p class="list-empty">"No organizations found."</p> }.into_any()),
            ListPhase::Ready => Ok(view! {
                <ul class="organization-list">
                    <For
                        each=move || organizations.with(|s| s.items().to_vec())
                        key=|org| (org.id, org.slug.clone(), org.name.clone(), org.contact_email.clone())
                        children=move |org| {
                            let slug = org.slug.clone();
                            let is_selected = move || ctx.selected_org_slug.with(|s| s.as_deref() == Some(slug.as_str()));
                            let label = format!("({}) — {}", org.slug, org.contact_email);
                            let name = org.name.clone();
                            view! {
                                <li
                                    class="organization-row"
                                    class:selected=is_selected
                                    on:click=move |_| on_select.run(org.clone())
                                >
                                    <strong>{name}</strong>
                                    " "
                                    {label}
                                </li>
                            }
                        }
                    />
                </ul>
            }
            .into_any()),
        }
    };

    view! { <div class="organization-list-view">{body}</div> }
}
