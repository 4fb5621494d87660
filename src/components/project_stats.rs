//! Project Stats Component
//!
//! One-line summary of the selected organization's project counters.

use leptos::prelude::*;

use crate::api;
use crate::context::use_app_context;
use crate::models::ProjectStats;
use crate::query::{use_query, FetchPolicy};

/// "N projects · c / t tasks completed"
pub fn summary_line(stats: &ProjectStats) -> String {
    let noun = if stats.num_projects == 1 { "project" } else { "projects" };
    format!(
        "{} {} · {} / {} tasks completed",
        stats.num_projects, noun, stats.completed_tasks, stats.total_tasks
    )
}

#[component]
pub fn ProjectStatsSummary() -> impl IntoView {
    let ctx = use_app_context();
    let api = ctx.api();

    let stats = use_query(
        FetchPolicy::CacheAndNetwork,
        ctx.ready_scope(ctx.selected_org_slug),
        ctx.projects_version.into(),
        move |org_slug: String| {
            let api = api.clone();
            async move { api::project_stats(&api, &org_slug).await }
        },
    );

    let line = move || {
        stats.with(|s| match (s.data(), s.error()) {
            (Some(stats), _) => view! { <p class="project-stats">{summary_line(stats)}</p> }.into_any(),
            (None, Some(e)) => {
                view! { <p class="project-stats list-error">{format!("Error loading project stats: {}", e)}</p> }
                    .into_any()
            }
            (None, None) => ().into_any(),
        })
    };

    view! { <div class="project-stats-view">{line}</div> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_line() {
        let stats = ProjectStats { num_projects: 3, total_tasks: 10, completed_tasks: 4 };
        assert_eq!(summary_line(&stats), "3 projects · 4 / 10 tasks completed");
    }

    #[test]
    fn test_summary_line_singular() {
        let stats = ProjectStats { num_projects: 1, total_tasks: 0, completed_tasks: 0 };
        assert_eq!(summary_line(&stats), "1 project · 0 / 0 tasks completed");
    }
}
