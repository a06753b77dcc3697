use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::option::Labelled;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Organization {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Jupiter Apparels")]
    pub name: String,
    #[serde(rename = "registrationNo", default)]
    #[schema(example = "PV-00421")]
    pub registration_no: Option<String>,
    #[serde(rename = "headOffice", default)]
    #[schema(example = "Colombo")]
    pub head_office: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Branch {
    #[schema(example = 2)]
    pub id: u64,
    #[schema(example = "Kandy")]
    pub name: String,
    #[serde(default)]
    #[schema(example = 1)]
    pub organization_id: Option<u64>,
}

impl Labelled for Organization {
    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Labelled for Branch {
    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}
