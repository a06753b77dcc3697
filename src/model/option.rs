use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A selectable value for one filter control: departments, job titles,
/// employment statuses, pay grades and custom fields all share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct FilterOption {
    #[schema(example = 3)]
    pub id: u64,
    #[schema(example = "Engineering")]
    pub name: String,
}

/// Anything that can be looked up by id to produce a filter label.
pub trait Labelled {
    fn id(&self) -> u64;
    fn label(&self) -> &str;
}

impl Labelled for FilterOption {
    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Finds the display name for `id` in a list of options.
pub fn find_label<T: Labelled>(options: &[T], id: u64) -> Option<&str> {
    options.iter().find(|o| o.id() == id).map(|o| o.label())
}
