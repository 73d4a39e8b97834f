use super::{Entity, Validate};
use crate::config::{tables, TableDef};
use crate::error::AppError;
use crate::service::validation::check_range;
use serde::{Deserialize, Serialize};

/// Bean ratings are bounded; bag and brew ratings are not.
pub const RATING_RANGE: (i64, i64) = (0, 5);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoastLevel {
    #[serde(rename = "Dark")]
    Dark,
    #[serde(rename = "Medium Dark")]
    MediumDark,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "Medium Light")]
    MediumLight,
    #[serde(rename = "Light")]
    Light,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bean {
    pub id: i64,
    pub name: String,
    pub roaster_id: i64,
    pub roast_level: RoastLevel,
    pub country_of_origin: Option<String>,
    pub tasting_notes: Option<String>,
    pub rating: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeanCreate {
    pub name: String,
    pub roaster_id: i64,
    pub roast_level: RoastLevel,
    #[serde(default)]
    pub country_of_origin: Option<String>,
    #[serde(default)]
    pub tasting_notes: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
}

impl Validate for Bean {
    fn validate(&self) -> Result<(), AppError> {
        check_range("rating", self.rating, RATING_RANGE.0, RATING_RANGE.1)
    }
}

impl Validate for BeanCreate {
    fn validate(&self) -> Result<(), AppError> {
        check_range("rating", self.rating, RATING_RANGE.0, RATING_RANGE.1)
    }
}

impl Entity for Bean {
    type Create = BeanCreate;

    fn table() -> &'static TableDef {
        &tables::BEAN
    }

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(rating: Option<i64>) -> BeanCreate {
        BeanCreate {
            name: "Kochere".into(),
            roaster_id: 1,
            roast_level: RoastLevel::Light,
            country_of_origin: Some("Ethiopia".into()),
            tasting_notes: None,
            rating,
        }
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(create(Some(0)).validate().is_ok());
        assert!(create(Some(5)).validate().is_ok());
        assert!(create(None).validate().is_ok());
        assert!(create(Some(6)).validate().is_err());
        assert!(create(Some(-1)).validate().is_err());
    }

    #[test]
    fn roast_level_uses_display_names() {
        let v = serde_json::to_value(RoastLevel::MediumDark).unwrap();
        assert_eq!(v, json!("Medium Dark"));
        let parsed: RoastLevel = serde_json::from_value(json!("Medium Light")).unwrap();
        assert_eq!(parsed, RoastLevel::MediumLight);
        assert!(serde_json::from_value::<RoastLevel>(json!("medium")).is_err());
    }
}
