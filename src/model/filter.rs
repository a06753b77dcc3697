use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumIter};
use utoipa::ToSchema;

/// Filter on one entity dimension. `None` matches every entity.
///
/// The web forms post `0` (or the select's string value `"0"`) for "All";
/// both decode to [`EntityFilter::ALL`] so nothing past the request boundary
/// ever compares against the sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EntityFilter(Option<u64>);

impl EntityFilter {
    pub const ALL: EntityFilter = EntityFilter(None);

    pub fn only(id: u64) -> Self {
        if id == 0 { Self::ALL } else { EntityFilter(Some(id)) }
    }

    pub fn id(&self) -> Option<u64> {
        self.0
    }

    pub fn is_all(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<u64>> for EntityFilter {
    fn from(value: Option<u64>) -> Self {
        value.map(EntityFilter::only).unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for EntityFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawId>::deserialize(deserializer)? {
            None => Ok(EntityFilter::ALL),
            Some(RawId::Number(n)) if n < 0 => {
                Err(D::Error::custom(format!("invalid filter id `{n}`")))
            }
            Some(RawId::Number(n)) => Ok(EntityFilter::only(n as u64)),
            Some(RawId::Text(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(EntityFilter::ALL);
                }
                s.parse::<u64>()
                    .map(EntityFilter::only)
                    .map_err(|_| D::Error::custom(format!("invalid filter id `{s}`")))
            }
        }
    }
}

// "All" goes back out as 0, which is what the existing forms send.
impl Serialize for EntityFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0.unwrap_or(0))
    }
}

/// The entity dimensions a report can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FilterDimension {
    Organization,
    Department,
    Title,
    Status,
    Branch,
    PayGrade,
    CustomField,
}

/// Every filter value a report form can carry. Each report reads only the
/// dimensions it declares; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterSelection {
    #[serde(default)]
    #[schema(value_type = u64, example = 0)]
    pub organization: EntityFilter,
    #[serde(default)]
    #[schema(value_type = u64, example = 3)]
    pub department: EntityFilter,
    #[serde(default)]
    #[schema(value_type = u64, example = 0)]
    pub title: EntityFilter,
    #[serde(default)]
    #[schema(value_type = u64, example = 0)]
    pub status: EntityFilter,
    #[serde(default)]
    #[schema(value_type = u64, example = 0)]
    pub branch: EntityFilter,
    #[serde(default)]
    #[schema(value_type = u64, example = 0)]
    pub pay_grade: EntityFilter,
    #[serde(default)]
    #[schema(value_type = u64, example = 0)]
    pub custom_field: EntityFilter,
    #[serde(
        rename = "fromDate",
        default,
        deserialize_with = "blank_date",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = "date", example = "2024-03-01")]
    pub from_date: Option<NaiveDate>,
    #[serde(
        rename = "toDate",
        default,
        deserialize_with = "blank_date",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = "date", example = "2024-03-31")]
    pub to_date: Option<NaiveDate>,
}

impl FilterSelection {
    pub fn get(&self, dimension: FilterDimension) -> EntityFilter {
        match dimension {
            FilterDimension::Organization => self.organization,
            FilterDimension::Department => self.department,
            FilterDimension::Title => self.title,
            FilterDimension::Status => self.status,
            FilterDimension::Branch => self.branch,
            FilterDimension::PayGrade => self.pay_grade,
            FilterDimension::CustomField => self.custom_field,
        }
    }

    pub fn set(&mut self, dimension: FilterDimension, filter: EntityFilter) {
        let slot = match dimension {
            FilterDimension::Organization => &mut self.organization,
            FilterDimension::Department => &mut self.department,
            FilterDimension::Title => &mut self.title,
            FilterDimension::Status => &mut self.status,
            FilterDimension::Branch => &mut self.branch,
            FilterDimension::PayGrade => &mut self.pay_grade,
            FilterDimension::CustomField => &mut self.custom_field,
        };
        *slot = filter;
    }

    pub fn with(mut self, dimension: FilterDimension, id: u64) -> Self {
        self.set(dimension, EntityFilter::only(id));
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from_date = Some(from);
        self.to_date = Some(to);
        self
    }
}

fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid date `{s}`, expected YYYY-MM-DD"))),
    }
}
