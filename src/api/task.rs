//! Task Operations

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Operation};
use crate::models::{Task, TaskStatus};

// ========================
// Documents
// ========================

pub const LIST_TASKS: Operation = Operation {
    name: "ProjectTasks",
    document: r#"
query ProjectTasks($projectId: Int!) {
  projectTasks(projectId: $projectId) {
    id
    title
    description
    status
    assigneeEmail
    dueDate
    comments {
      id
      content
      authorEmail
      timestamp
    }
  }
}"#,
};

pub const CREATE_TASK: Operation = Operation {
    name: "CreateTask",
    document: r#"
mutation CreateTask($projectId: Int!, $title: String!, $description: String, $status: String!, $assigneeEmail: String, $dueDate: DateTime) {
  createTask(projectId: $projectId, title: $title, description: $description, status: $status, assigneeEmail: $assigneeEmail, dueDate: $dueDate) {
    task {
      id
      title
      status
    }
  }
}"#,
};

pub const UPDATE_TASK: Operation = Operation {
    name: "UpdateTask",
    document: r#"
mutation UpdateTask($taskId: Int!, $title: String!, $description: String, $status: String!, $assigneeEmail: String, $dueDate: DateTime) {
  updateTask(taskId: $taskId, title: $title, description: $description, status: $status, assigneeEmail: $assigneeEmail, dueDate: $dueDate) {
    task {
      id
      title
      status
      description
      assigneeEmail
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
struct ProjectIdArgs {
    project_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskVars {
    pub project_id: u32,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assignee_email: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskVars {
    pub task_id: u32,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assignee_email: Option<String>,
    pub due_date: Option<String>,
}

/// Selection returned by `createTask`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedTask {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
}

/// Selection returned by `updateTask`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedTask {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee_email: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TasksData {
    project_tasks: Option<Vec<Task>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskData {
    create_task: Option<TaskPayload<CreatedTask>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTaskData {
    update_task: Option<TaskPayload<UpdatedTask>>,
}

#[derive(Deserialize)]
struct TaskPayload<P> {
    task: Option<P>,
}

// ========================
// Operations
// ========================

/// Tasks of one project, each with its comments in append order.
pub async fn list_tasks(api: &ApiClient, project_id: u32) -> Result<Vec<Task>, ApiError> {
    let data: TasksData = api.execute(&LIST_TASKS, &ProjectIdArgs { project_id }).await?;
    Ok(in_append_order(data.project_tasks.unwrap_or_default()))
}

pub async fn create_task(api: &ApiClient, vars: &CreateTaskVars) -> Result<CreatedTask, ApiError> {
    let data: CreateTaskData = api.execute(&CREATE_TASK, vars).await?;
    data.create_task
        .and_then(|p| p.task)
        .ok_or(ApiError::MissingData(CREATE_TASK.name))
}

pub async fn update_task(api: &ApiClient, vars: &UpdateTaskVars) -> Result<UpdatedTask, ApiError> {
    let data: UpdateTaskData = api.execute(&UPDATE_TASK, vars).await?;
    data.update_task
        .and_then(|p| p.task)
        .ok_or(ApiError::MissingData(UPDATE_TASK.name))
}

/// Comments are append-only, so ascending id is creation order.
fn in_append_order(mut tasks: Vec<Task>) -> Vec<Task> {
    for task in &mut tasks {
        task.comments.sort_by_key(|c| c.id);
    }
    tasks
}
