//! Frontend Models
//!
//! Data structures matching the GraphQL types of the remote server.

use serde::{Deserialize, Deserializer, Serialize};

/// Organization data structure (matches `OrganizationType`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(deserialize_with = "de_id")]
    pub id: u32,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub contact_email: String,
}

/// Project data structure (matches `ProjectType`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "de_id")]
    pub id: u32,
    pub name: String,
    #[serde(default, deserialize_with = "de_text")]
    pub description: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub due_date: Option<String>,
    /// Supplied by the server, never computed locally
    #[serde(default)]
    pub task_count: u32,
    #[serde(default)]
    pub completed_tasks: u32,
}

/// Task data structure (matches `TaskType`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(deserialize_with = "de_id")]
    pub id: u32,
    pub title: String,
    #[serde(default, deserialize_with = "de_text")]
    pub description: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee_email: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Comment data structure (matches `TaskCommentType`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(deserialize_with = "de_id")]
    pub id: u32,
    pub content: String,
    pub author_email: String,
    pub timestamp: String,
}

/// Per-organization counters from the `projectStats` query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectStats {
    pub num_projects: u32,
    pub total_tasks: u32,
    pub completed_tasks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

/// Server-assigned identity of an editable entity
pub trait Entity {
    fn id(&self) -> u32;
}

impl Entity for Project {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Entity for Task {
    fn id(&self) -> u32 {
        self.id
    }
}

/// A closed set of status values rendered as a `<select>`.
pub trait StatusOption: Copy + PartialEq + Send + Sync + 'static {
    /// All values, the first one being the create-mode default.
    const ALL: &'static [Self];

    /// Value sent over the wire
    fn wire(self) -> &'static str;

    /// Human readable label
    fn label(self) -> &'static str;

    fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.wire() == value)
    }
}

impl StatusOption for ProjectStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Completed, Self::OnHold];

    fn wire(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::OnHold => "ON_HOLD",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

impl StatusOption for TaskStatus {
    const ALL: &'static [Self] = &[Self::Todo, Self::InProgress, Self::Done];

    fn wire(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::ALL[0]
    }
}

/// Text for an optional field, "N/A" when absent or blank.
pub fn or_na(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}

/// Date part of a `YYYY-MM-DD[THH:MM:SS...]` value, for `<input type="date">`.
pub fn date_part(value: Option<&str>) -> String {
    value
        .map(|v| v.split('T').next().unwrap_or_default().trim().to_string())
        .unwrap_or_default()
}

/// GraphQL `ID`s arrive as strings; project and task ids are sent back as integers.
fn de_id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u32),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid id: {:?}", s))),
    }
}

fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
