//! Organization Operations

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError, Operation};
use crate::models::Organization;

// ========================
// Documents
// ========================

pub const LIST_ORGANIZATIONS: Operation = Operation {
    name: "Organizations",
    document: r#"
query Organizations {
  organizations {
    id
    name
    slug
    contactEmail
  }
}"#,
};

pub const CREATE_ORGANIZATION: Operation = Operation {
    name: "CreateOrganization",
    document: r#"
mutation CreateOrganization($name: String!, $slug: String!, $contactEmail: String!) {
  createOrganization(name: $name, slug: $slug, contactEmail: $contactEmail) {
    organization {
      id
      name
      slug
    }
  }
}"#,
};

// ========================
// Variables & Payloads
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationVars {
    pub name: String,
    pub slug: String,
    pub contact_email: String,
}

/// Selection returned by `createOrganization`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedOrganization {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Deserialize)]
struct OrganizationsData {
    #[serde(default)]
    organizations: Option<Vec<Organization>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrganizationData {
    create_organization: Option<CreateOrganizationPayload>,
}

#[derive(Deserialize)]
struct CreateOrganizationPayload {
    organization: Option<CreatedOrganization>,
}

// ========================
// Operations
// ========================

pub async fn list_organizations(api: &ApiClient) -> Result<Vec<Organization>, ApiError> {
    let data: OrganizationsData = api.execute(&LIST_ORGANIZATIONS, &serde_json::json!({})).await?;
    Ok(data.organizations.unwrap_or_default())
}

pub async fn create_organization(
    api: &ApiClient,
    vars: &CreateOrganizationVars,
) -> Result<CreatedOrganization, ApiError> {
    let data: CreateOrganizationData = api.execute(&CREATE_ORGANIZATION, vars).await?;
    data.create_organization
        .and_then(|p| p.organization)
        .ok_or(ApiError::MissingData(CREATE_ORGANIZATION.name))
}
