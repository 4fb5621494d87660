//! Project Operations

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Operation};
use crate::models::{Project, ProjectStats, ProjectStatus};

// ========================
// Documents
// ========================

pub const LIST_PROJECTS: Operation = Operation {
    name: "OrganizationProjects",
    document: r#"
query OrganizationProjects($orgSlug: String!) {
  organizationProjects(orgSlug: $orgSlug) {
    id
    name
    description
    status
    dueDate
    taskCount
    completedTasks
  }
}"#,
};

pub const PROJECT_STATS: Operation = Operation {
    name: "ProjectStats",
    document: r#"
query ProjectStats($orgSlug: String!) {
  projectStats(orgSlug: $orgSlug)
}"#,
};

pub const CREATE_PROJECT: Operation = Operation {
    name: "CreateProject",
    document: r#"
mutation CreateProject($orgSlug: String!, $name: String!, $description: String, $status: String!, $dueDate: Date) {
  createProject(orgSlug: $orgSlug, name: $name, description: $description, status: $status, dueDate: $dueDate) {
    project {
      id
      name
      status
    }
  }
}"#,
};

pub const UPDATE_PROJECT: Operation = Operation {
    name: "UpdateProject",
    document: r#"
mutation UpdateProject($projectId: Int!, $name: String!, $description: String, $status: String!, $dueDate: Date) {
  updateProject(projectId: $projectId, name: $name, description: $description, status: $status, dueDate: $dueDate) {
    project {
      id
      name
      status
      description
      dueDate
    }
  }
}"#,
};

// ========================
// Variables & Payloads
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrgSlugArgs<'a> {
    org_slug: &'a str,
}

/// Optional fields serialize as `null` when absent, never as `""`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectVars {
    pub org_slug: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectVars {
    pub project_id: u32,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub due_date: Option<String>,
}

/// Selection returned by `createProject`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedProject {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
}

/// Selection returned by `updateProject`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProject {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectsData {
    organization_projects: Option<Vec<Project>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectStatsData {
    project_stats: Option<StatsValue>,
}

/// `JSONString` scalars arrive JSON-encoded inside a string; accept both forms.
#[derive(Deserialize)]
#[serde(untagged)]
enum StatsValue {
    Object(ProjectStats),
    Encoded(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectData {
    create_project: Option<ProjectPayload<CreatedProject>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProjectData {
    update_project: Option<ProjectPayload<UpdatedProject>>,
}

#[derive(Deserialize)]
struct ProjectPayload<P> {
    project: Option<P>,
}

// ========================
// Operations
// ========================

pub async fn list_projects(api: &ApiClient, org_slug: &str) -> Result<Vec<Project>, ApiError> {
    let data: ProjectsData = api.execute(&LIST_PROJECTS, &OrgSlugArgs { org_slug }).await?;
    Ok(data.organization_projects.unwrap_or_default())
}

pub async fn project_stats(api: &ApiClient, org_slug: &str) -> Result<ProjectStats, ApiError> {
    let data: ProjectStatsData = api.execute(&PROJECT_STATS, &OrgSlugArgs { org_slug }).await?;
    decode_stats(data.project_stats)
}

pub async fn create_project(api: &ApiClient, vars: &CreateProjectVars) -> Result<CreatedProject, ApiError> {
    let data: CreateProjectData = api.execute(&CREATE_PROJECT, vars).await?;
    data.create_project
        .and_then(|p| p.project)
        .ok_or(ApiError::MissingData(CREATE_PROJECT.name))
}

pub async fn update_project(api: &ApiClient, vars: &UpdateProjectVars) -> Result<UpdatedProject, ApiError> {
    let data: UpdateProjectData = api.execute(&UPDATE_PROJECT, vars).await?;
    data.update_project
        .and_then(|p| p.project)
        .ok_or(ApiError::MissingData(UPDATE_PROJECT.name))
}

fn decode_stats(value: Option<StatsValue>) -> Result<ProjectStats, ApiError> {
    match value {
        Some(StatsValue::Object(stats)) => Ok(stats),
        Some(StatsValue::Encoded(json)) => serde_json::from_str(&json).map_err(|e| ApiError::Decode(e.to_string())),
        None => Err(ApiError::MissingData(PROJECT_STATS.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_absent_optionals_are_null() {
        let vars = UpdateProjectVars {
            project_id: 4,
            name: "Launch".into(),
            description: None,
            status: ProjectStatus::OnHold,
            due_date: None,
        };
        assert_eq!(
            serde_json::to_value(&vars).unwrap(),
            json!({
                "projectId": 4,
                "name": "Launch",
                "description": null,
                "status": "ON_HOLD",
                "dueDate": null
            })
        );
    }

    #[test]
    fn test_stats_encoded_string() {
        let data: ProjectStatsData = serde_json::from_value(json!({
            "projectStats": "{\"num_projects\": 2, \"total_tasks\": 5, \"completed_tasks\": 3}"
        }))
        .unwrap();
        assert_eq!(
            decode_stats(data.project_stats).unwrap(),
            ProjectStats { num_projects: 2, total_tasks: 5, completed_tasks: 3 }
        );
    }

    #[test]
    fn test_stats_object() {
        let data: ProjectStatsData = serde_json::from_value(json!({
            "projectStats": { "num_projects": 0, "total_tasks": 0, "completed_tasks": 0 }
        }))
        .unwrap();
        assert_eq!(decode_stats(data.project_stats).unwrap(), ProjectStats::default());
    }

    #[test]
    fn test_stats_missing() {
        let data: ProjectStatsData = serde_json::from_value(json!({ "projectStats": null })).unwrap();
        assert_eq!(decode_stats(data.project_stats).unwrap_err(), ApiError::MissingData("ProjectStats"));
    }

    #[test]
    fn test_update_payload_with_cleared_due_date() {
        let data: UpdateProjectData = serde_json::from_value(json!({
            "updateProject": { "project": {
                "id": "4", "name": "Launch", "status": "ACTIVE", "description": "", "dueDate": null
            }}
        }))
        .unwrap();
        let project = data.update_project.and_then(|p| p.project).unwrap();
        assert_eq!(project.due_date, None);
    }
}
