//! Shell State
//!
//! Selection and refresh signals of the top-level view. Versions are
//! counters: bumping one makes every view scoped to it re-fetch.

use crate::models::Organization;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShellState {
    pub selected_organization: Option<Organization>,
    pub selected_project_id: Option<u32>,
    /// Refresh signal of the organization list
    pub organizations_version: u32,
    /// Refresh signal of the project list and project stats
    pub projects_version: u32,
    /// Refresh signal of the task list
    pub tasks_version: u32,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting an organization drops the project selection.
    pub fn select_organization(&mut self, organization: Organization) {
        self.selected_organization = Some(organization);
        self.selected_project_id = None;
        self.projects_version = self.projects_version.wrapping_add(1);
    }

    pub fn organization_created(&mut self) {
        self.selected_organization = None;
        self.selected_project_id = None;
        self.organizations_version = self.organizations_version.wrapping_add(1);
    }

    pub fn select_project(&mut self, project_id: u32) {
        self.selected_project_id = Some(project_id);
    }

    /// Creating or updating a project keeps the selection.
    pub fn project_changed(&mut self) {
        self.projects_version = self.projects_version.wrapping_add(1);
    }

    pub fn task_created(&mut self) {
        self.tasks_version = self.tasks_version.wrapping_add(1);
    }

    pub fn selected_org_slug(&self) -> Option<String> {
        self.selected_organization.as_ref().map(|o| o.slug.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn org(id: u32, slug: &str) -> Organization {
        Organization {
            id,
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            contact_email: format!("team@{}.com", slug),
        }
    }

    #[test]
    fn test_initially_nothing_selected() {
        let state = ShellState::new();
        assert_eq!(state.selected_org_slug(), None);
        assert_eq!(state.selected_project_id, None);
    }

    #[test]
    fn test_select_organization_clears_project() {
        let mut state = ShellState::new();
        state.select_organization(org(1, "acme"));
        state.select_project(7);

        state.select_organization(org(2, "globex"));
        assert_eq!(state.selected_org_slug().as_deref(), Some("globex"));
        assert_eq!(state.selected_project_id, None);
        assert_eq!(state.projects_version, 2);
        assert_eq!(state.organizations_version, 0);
    }

    #[test]
    fn test_organization_created_clears_both() {
        let mut state = ShellState::new();
        state.select_organization(org(1, "acme"));
        state.select_project(7);

        state.organization_created();
        assert_eq!(state.selected_organization, None);
        assert_eq!(state.selected_project_id, None);
        assert_eq!(state.organizations_version, 1);
    }

    #[test]
    fn test_select_project_keeps_organization_and_versions() {
        let mut state = ShellState::new();
        state.select_organization(org(1, "acme"));
        let before = state.clone();

        state.select_project(7);
        assert_eq!(state.selected_project_id, Some(7));
        assert_eq!(state.selected_organization, before.selected_organization);
        assert_eq!(state.projects_version, before.projects_version);
        assert_eq!(state.tasks_version, before.tasks_version);
    }

    #[test]
    fn test_project_changed_only_refreshes_projects() {
        let mut state = ShellState::new();
        state.select_organization(org(1, "acme"));
        state.select_project(7);

        state.project_changed();
        assert_eq!(state.projects_version, 2);
        assert_eq!(state.selected_project_id, Some(7));
        assert_eq!(state.organizations_version, 0);
    }

    #[test]
    fn test_task_created_refreshes_tasks() {
        let mut state = ShellState::new();
        state.task_created();
        assert_eq!(state.tasks_version, 1);
        assert_eq!(state.projects_version, 0);
    }
}
