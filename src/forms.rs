//! Form State
//!
//! Editable drafts behind the write forms. A draft holds exactly what the
//! inputs show; `validate` turns it into mutation variables or refuses, so
//! no request is sent for an invalid draft.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::api::{
    AddCommentVars, CreateOrganizationVars, CreateProjectVars, CreateTaskVars, UpdateProjectVars, UpdateTaskVars,
};
use crate::models::{date_part, Entity, Project, ProjectStatus, Task, TaskStatus};

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid slug regex"));

/// The `type=email` grammar browsers enforce
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid email regex")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Slug may only contain lowercase letters, numbers and hyphens")]
    InvalidSlug,
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    #[error("{0} must be a date (YYYY-MM-DD)")]
    InvalidDate(&'static str),
}

// ========================
// Field helpers
// ========================

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(value.to_string())
    }
}

/// Blank optional fields are absent, not `""`.
fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn email(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = required(value, field)?;
    if EMAIL_RE.is_match(&value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidEmail(field))
    }
}

fn optional_email(value: &str, field: &'static str) -> Result<Option<String>, ValidationError> {
    optional(value).map(|v| email(&v, field)).transpose()
}

fn optional_date(value: &str, field: &'static str) -> Result<Option<String>, ValidationError> {
    optional(value)
        .map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                .map(|d| d.format("%Y-%m-%d").to_string())
                .map_err(|_| ValidationError::InvalidDate(field))
        })
        .transpose()
}

// ========================
// Drafts
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationDraft {
    pub name: String,
    pub slug: String,
    pub contact_email: String,
}

impl OrganizationDraft {
    pub fn validate(&self) -> Result<CreateOrganizationVars, ValidationError> {
        let name = required(&self.name, "Name")?;
        let slug = required(&self.slug, "Slug")?;
        if !SLUG_RE.is_match(&slug) {
            return Err(ValidationError::InvalidSlug);
        }
        let contact_email = email(&self.contact_email, "Contact email")?;
        Ok(CreateOrganizationVars { name, slug, contact_email })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    /// `YYYY-MM-DD` as shown by the date input, empty for none
    pub due_date: String,
}

impl ProjectDraft {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
            due_date: date_part(project.due_date.as_deref()),
        }
    }

    pub fn validate_create(&self, org_slug: &str) -> Result<CreateProjectVars, ValidationError> {
        Ok(CreateProjectVars {
            org_slug: org_slug.to_string(),
            name: required(&self.name, "Name")?,
            description: optional(&self.description),
            status: self.status,
            due_date: optional_date(&self.due_date, "Due date")?,
        })
    }

    pub fn validate_update(&self, project_id: u32) -> Result<UpdateProjectVars, ValidationError> {
        Ok(UpdateProjectVars {
            project_id,
            name: required(&self.name, "Name")?,
            description: optional(&self.description),
            status: self.status,
            due_date: optional_date(&self.due_date, "Due date")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assignee_email: String,
    pub due_date: String,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            assignee_email: task.assignee_email.clone().unwrap_or_default(),
            due_date: date_part(task.due_date.as_deref()),
        }
    }

    pub fn validate_create(&self, project_id: u32) -> Result<CreateTaskVars, ValidationError> {
        Ok(CreateTaskVars {
            project_id,
            title: required(&self.title, "Title")?,
            description: optional(&self.description),
            status: self.status,
            assignee_email: optional_email(&self.assignee_email, "Assignee email")?,
            due_date: optional_date(&self.due_date, "Due date")?,
        })
    }

    pub fn validate_update(&self, task_id: u32) -> Result<UpdateTaskVars, ValidationError> {
        Ok(UpdateTaskVars {
            task_id,
            title: required(&self.title, "Title")?,
            description: optional(&self.description),
            status: self.status,
            assignee_email: optional_email(&self.assignee_email, "Assignee email")?,
            due_date: optional_date(&self.due_date, "Due date")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentDraft {
    pub content: String,
    pub author_email: String,
}

impl CommentDraft {
    pub fn validate(&self, task_id: u32) -> Result<AddCommentVars, ValidationError> {
        Ok(AddCommentVars {
            task_id,
            content: required(&self.content, "Comment")?,
            author_email: email(&self.author_email, "Your email")?,
        })
    }
}

// ========================
// Submission
// ========================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    InFlight,
    Failed(String),
    /// Last submission succeeded; shown briefly as a notice
    Saved,
}

impl SubmitStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Gate a submission on its validation result. Yields the variables to
    /// send and moves to `InFlight`; yields nothing while a submission is
    /// already running or when validation failed (the failure is shown).
    pub fn begin<V, E: std::fmt::Display>(&mut self, validated: Result<V, E>) -> Option<V> {
        if self.is_in_flight() {
            return None;
        }
        match validated {
            Ok(vars) => {
                *self = Self::InFlight;
                Some(vars)
            }
            Err(e) => {
                *self = Self::Failed(e.to_string());
                None
            }
        }
    }

    pub fn finish<T, E: std::fmt::Display>(&mut self, outcome: &Result<T, E>) {
        *self = match outcome {
            Ok(_) => Self::Saved,
            Err(e) => Self::Failed(e.to_string()),
        };
    }

    /// Drop the "saved" notice, leaving errors and running submissions alone.
    pub fn dismiss_notice(&mut self) {
        if *self == Self::Saved {
            *self = Self::Idle;
        }
    }
}

// ========================
// Edit-mode seeding
// ========================

/// A draft seeded from an entity. Supplying another entity, or new values for
/// the edited fields, re-seeds the draft and discards unsaved edits. Changes
/// outside the edited fields (e.g. new comments) keep them.
#[derive(Debug, Clone, PartialEq)]
pub struct SeededDraft<E, D> {
    source: E,
    pub draft: D,
}

impl<E, D> SeededDraft<E, D>
where
    E: Clone + PartialEq + Entity,
    D: PartialEq,
    for<'a> D: From<&'a E>,
{
    pub fn new(source: &E) -> Self {
        Self {
            source: source.clone(),
            draft: D::from(source),
        }
    }

    /// Returns `true` if the draft was replaced.
    pub fn reseed(&mut self, source: &E) -> bool {
        if &self.source == source {
            return false;
        }
        if source.id() == self.source.id() && D::from(source) == D::from(&self.source) {
            self.source = source.clone();
            return false;
        }
        *self = Self::new(source);
        true
    }

    /// Cancel: throw edits away and return to the seeded values.
    pub fn revert(&mut self) {
        self.draft = D::from(&self.source);
    }

    pub fn source(&self) -> &E {
        &self.source
    }
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        Self::from_project(project)
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self::from_task(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::Comment;
    use pretty_assertions::assert_eq;

    fn task(id: u32, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: format!("about {}", title),
            status: TaskStatus::InProgress,
            assignee_email: Some(format!("{}@acme.com", id)),
            due_date: Some("2025-09-01T00:00:00+00:00".to_string()),
            comments: vec![],
        }
    }

    #[test]
    fn test_blank_required_fields_are_refused() {
        assert_eq!(OrganizationDraft::default().validate(), Err(ValidationError::Required("Name")));
        assert_eq!(ProjectDraft::default().validate_create("acme"), Err(ValidationError::Required("Name")));
        assert_eq!(TaskDraft::default().validate_create(1), Err(ValidationError::Required("Title")));
        assert_eq!(CommentDraft::default().validate(1), Err(ValidationError::Required("Comment")));

        let whitespace = CommentDraft { content: "  ".into(), author_email: "a@acme.com".into() };
        assert_eq!(whitespace.validate(1), Err(ValidationError::Required("Comment")));

        let no_author = CommentDraft { content: "hi".into(), author_email: "".into() };
        assert_eq!(no_author.validate(1), Err(ValidationError::Required("Your email")));
    }

    #[test]
    fn test_organization_draft() {
        let draft = OrganizationDraft {
            name: " Acme ".into(),
            slug: "acme".into(),
            contact_email: "a@acme.com".into(),
        };
        let vars = draft.validate().unwrap();
        assert_eq!(vars.name, "Acme");
        assert_eq!(vars.slug, "acme");
        assert_eq!(vars.contact_email, "a@acme.com");
    }

    #[test]
    fn test_slug_pattern() {
        let mut draft = OrganizationDraft {
            name: "Acme".into(),
            slug: "Acme Inc".into(),
            contact_email: "a@acme.com".into(),
        };
        assert_eq!(draft.validate(), Err(ValidationError::InvalidSlug));
        draft.slug = "acme-2".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_email_grammar() {
        assert!(email("a@acme.com", "Email").is_ok());
        assert!(email("first.last+pm@sub.acme.io", "Email").is_ok());
        assert!(email("localhost@host", "Email").is_ok());
        assert_eq!(email("a@", "Email"), Err(ValidationError::InvalidEmail("Email")));
        assert_eq!(email("acme.com", "Email"), Err(ValidationError::InvalidEmail("Email")));
        assert_eq!(email("a b@acme.com", "Email"), Err(ValidationError::InvalidEmail("Email")));
    }

    #[test]
    fn test_optional_fields_are_absent_not_empty() {
        let draft = TaskDraft { title: "Write spec".into(), ..Default::default() };
        let vars = draft.validate_create(3).unwrap();
        assert_eq!(vars.description, None);
        assert_eq!(vars.assignee_email, None);
        assert_eq!(vars.due_date, None);
        assert_eq!(vars.status, TaskStatus::Todo);
    }

    #[test]
    fn test_optional_email_is_checked_when_given() {
        let draft = TaskDraft {
            title: "Write spec".into(),
            assignee_email: "not-an-email".into(),
            ..Default::default()
        };
        assert_eq!(draft.validate_create(3), Err(ValidationError::InvalidEmail("Assignee email")));
    }

    #[test]
    fn test_due_date() {
        let mut draft = ProjectDraft { name: "Launch".into(), due_date: "2025-9-1".into(), ..Default::default() };
        assert_eq!(draft.validate_create("acme").unwrap().due_date.as_deref(), Some("2025-09-01"));

        draft.due_date = "next week".into();
        assert_eq!(draft.validate_create("acme"), Err(ValidationError::InvalidDate("Due date")));
    }

    #[test]
    fn test_cleared_due_date_round_trips_as_absent() {
        let project = Project {
            id: 4,
            name: "Launch".into(),
            description: String::new(),
            status: ProjectStatus::Active,
            due_date: Some("2025-09-01".into()),
            task_count: 0,
            completed_tasks: 0,
        };
        let mut draft = ProjectDraft::from_project(&project);
        assert_eq!(draft.due_date, "2025-09-01");

        draft.due_date.clear();
        let vars = draft.validate_update(project.id).unwrap();
        assert_eq!(vars.due_date, None);
        assert_eq!(serde_json::to_value(&vars).unwrap()["dueDate"], serde_json::Value::Null);
    }

    #[test]
    fn test_task_seed_cuts_time() {
        let draft = TaskDraft::from_task(&task(1, "Write spec"));
        assert_eq!(draft.due_date, "2025-09-01");
        assert_eq!(draft.assignee_email, "1@acme.com");
        assert_eq!(draft.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_reseed_with_other_task_discards_edits() {
        let first = task(1, "Write spec");
        let second = task(2, "Review spec");
        let mut form = SeededDraft::<Task, TaskDraft>::new(&first);
        form.draft.title = "Write the spec today".into();
        form.draft.assignee_email = "me@acme.com".into();

        assert!(form.reseed(&second));
        assert_eq!(form.draft, TaskDraft::from_task(&second));
        assert_eq!(form.source().id, 2);
    }

    #[test]
    fn test_reseed_with_same_task_keeps_edits() {
        let first = task(1, "Write spec");
        let mut form = SeededDraft::<Task, TaskDraft>::new(&first);
        form.draft.title = "edited".into();

        assert!(!form.reseed(&first.clone()));
        assert_eq!(form.draft.title, "edited");
    }

    #[test]
    fn test_comment_refetch_keeps_edits() {
        let first = task(1, "Write spec");
        let mut form = SeededDraft::<Task, TaskDraft>::new(&first);
        form.draft.title = "Write the spec today".into();

        let mut commented = first.clone();
        commented.comments.push(Comment {
            id: 9,
            content: "draft ready".into(),
            author_email: "a@acme.com".into(),
            timestamp: "2025-08-20T10:00:00+00:00".into(),
        });
        assert!(!form.reseed(&commented));
        assert_eq!(form.draft.title, "Write the spec today");
        assert_eq!(form.source().comments.len(), 1);
    }

    #[test]
    fn test_server_side_field_change_reseeds() {
        let first = task(1, "Write spec");
        let mut form = SeededDraft::<Task, TaskDraft>::new(&first);
        form.draft.title = "edited".into();

        let renamed = Task { title: "Write final spec".into(), ..first.clone() };
        assert!(form.reseed(&renamed));
        assert_eq!(form.draft.title, "Write final spec");
    }

    #[test]
    fn test_other_task_with_same_fields_reseeds() {
        let first = task(1, "Write spec");
        let twin = Task { id: 2, ..first.clone() };
        let mut form = SeededDraft::<Task, TaskDraft>::new(&first);
        form.draft.title = "edited".into();

        assert!(form.reseed(&twin));
        assert_eq!(form.draft.title, "Write spec");
        assert_eq!(form.source().id, 2);
    }

    #[test]
    fn test_revert() {
        let first = task(1, "Write spec");
        let mut form = SeededDraft::<Task, TaskDraft>::new(&first);
        form.draft.status = TaskStatus::Done;
        form.revert();
        assert_eq!(form.draft.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_submit_status() {
        let mut status = SubmitStatus::default();
        assert_eq!(status.begin(Ok::<_, ValidationError>(1)), Some(1));
        assert!(status.is_in_flight());
        // second click while the first request runs
        assert_eq!(status.begin(Ok::<_, ValidationError>(2)), None);

        status.finish(&Err::<(), _>(ApiError::Remote(vec!["Slug already exists".into()])));
        assert_eq!(status.error(), Some("Slug already exists"));
        status.dismiss_notice();
        assert_eq!(status.error(), Some("Slug already exists"));

        assert_eq!(status.begin(Ok::<_, ValidationError>(3)), Some(3));
        status.finish(&Ok::<(), ApiError>(()));
        assert_eq!(status, SubmitStatus::Saved);
        status.dismiss_notice();
        assert_eq!(status, SubmitStatus::Idle);
    }

    #[test]
    fn test_invalid_draft_sends_nothing() {
        let mut status = SubmitStatus::default();
        let sent = status.begin(OrganizationDraft::default().validate());
        assert_eq!(sent, None);
        assert_eq!(status.error(), Some("Name is required"));
    }

    #[test]
    fn test_validation_does_not_interrupt_running_submission() {
        let mut status = SubmitStatus::InFlight;
        assert_eq!(status.begin(CommentDraft::default().validate(1)), None);
        assert!(status.is_in_flight());
    }
}
