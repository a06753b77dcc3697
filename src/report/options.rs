use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::debug;
use utoipa::ToSchema;

use crate::model::filter::{EntityFilter, FilterDimension};
use crate::model::option::{FilterOption, find_label};
use crate::model::organization::{Branch, Organization};

/// Everything the report forms need to populate their filter controls.
///
/// Key names are the wire contract, including the historic `cutom_field`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DropdownOptions {
    #[serde(default)]
    pub organization: Vec<Organization>,
    #[serde(default)]
    pub departments: Vec<FilterOption>,
    #[serde(default)]
    pub titles: Vec<FilterOption>,
    #[serde(default)]
    pub employment_statuses: Vec<FilterOption>,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub pay_grades: Vec<FilterOption>,
    #[serde(rename = "cutom_field", default)]
    pub custom_fields: Vec<FilterOption>,
}

impl DropdownOptions {
    /// Display name for a selected filter; `None` for "All" or an unknown id.
    pub fn label(&self, dimension: FilterDimension, filter: EntityFilter) -> Option<&str> {
        let id = filter.id()?;
        match dimension {
            FilterDimension::Organization => find_label(&self.organization, id),
            FilterDimension::Department => find_label(&self.departments, id),
            FilterDimension::Title => find_label(&self.titles, id),
            FilterDimension::Status => find_label(&self.employment_statuses, id),
            FilterDimension::Branch => find_label(&self.branches, id),
            FilterDimension::PayGrade => find_label(&self.pay_grades, id),
            FilterDimension::CustomField => find_label(&self.custom_fields, id),
        }
    }
}

async fn named(pool: &MySqlPool, table: &'static str) -> Result<Vec<FilterOption>, sqlx::Error> {
    let sql = format!("SELECT id, name FROM {table} ORDER BY name, id");
    sqlx::query_as::<_, FilterOption>(&sql).fetch_all(pool).await
}

/// Loads every option list concurrently. Any failing list fails the whole load.
pub async fn load(pool: &MySqlPool) -> Result<DropdownOptions, sqlx::Error> {
    let organizations = sqlx::query_as::<_, Organization>(
        r#"
        SELECT id, name, registration_no, head_office
        FROM organization
        ORDER BY name, id
        "#,
    )
    .fetch_all(pool);

    let branches = sqlx::query_as::<_, Branch>(
        r#"
        SELECT id, name, organization_id
        FROM branch
        ORDER BY name, id
        "#,
    )
    .fetch_all(pool);

    let (organization, departments, titles, employment_statuses, branches, pay_grades, custom_fields) =
        futures::try_join!(
            organizations,
            named(pool, "department"),
            named(pool, "job_title"),
            named(pool, "employment_status"),
            branches,
            named(pool, "pay_grade"),
            named(pool, "custom_attribute"),
        )?;

    debug!(
        organizations = organization.len(),
        departments = departments.len(),
        branches = branches.len(),
        "Dropdown options loaded"
    );

    Ok(DropdownOptions {
        organization,
        departments,
        titles,
        employment_statuses,
        branches,
        pay_grades,
        custom_fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_keys_are_preserved() {
        let options = DropdownOptions {
            custom_fields: vec![FilterOption { id: 1, name: "Blood Group".into() }],
            ..Default::default()
        };
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["cutom_field"][0]["name"], json!("Blood Group"));
        assert!(value.get("custom_fields").is_none());
        for key in ["organization", "departments", "titles", "employment_statuses", "branches", "pay_grades"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn missing_lists_decode_empty() {
        let options: DropdownOptions =
            serde_json::from_value(json!({ "departments": [{ "id": 3, "name": "Finance" }] })).unwrap();
        assert_eq!(options.departments.len(), 1);
        assert!(options.branches.is_empty());
        assert!(options.custom_fields.is_empty());
    }

    #[test]
    fn labels_resolve_by_id() {
        let options = DropdownOptions {
            departments: vec![FilterOption { id: 3, name: "Finance".into() }],
            branches: vec![Branch { id: 7, name: "Galle".into(), organization_id: Some(1) }],
            ..Default::default()
        };
        assert_eq!(options.label(FilterDimension::Department, EntityFilter::only(3)), Some("Finance"));
        assert_eq!(options.label(FilterDimension::Branch, EntityFilter::only(7)), Some("Galle"));
        assert_eq!(options.label(FilterDimension::Department, EntityFilter::only(4)), None);
        assert_eq!(options.label(FilterDimension::Department, EntityFilter::ALL), None);
    }
}
