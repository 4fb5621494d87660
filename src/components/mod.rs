//! UI Components
//!
//! Read views and write forms of the project board.

mod comment_form;
mod form_feedback;
mod list_notices;
mod organization_form;
mod organization_list;
mod project_form;
mod project_list;
mod project_stats;
mod status_select;
mod task_form;
mod task_list;

pub use comment_form::AddCommentForm;
pub use organization_form::CreateOrganizationForm;
pub use organization_list::OrganizationList;
pub use project_form::{CreateProjectForm, UpdateProjectForm};
pub use project_list::ProjectList;
pub use project_stats::{summary_line, ProjectStatsSummary};
pub use status_select::StatusSelect;
pub use task_form::{CreateTaskForm, UpdateTaskForm};
pub use task_list::TaskList;
