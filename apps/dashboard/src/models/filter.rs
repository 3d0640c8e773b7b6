use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Facets narrowing a job's resume list. Every flag defaults to off.
///
/// Flags are independent: the backend ORs the class years together and
/// treats `passed` + `failed` as "no outcome filter". Flags missing from a
/// stored value read as off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub freshman: bool,
    pub sophomore: bool,
    pub junior: bool,
    pub senior: bool,
    pub passed: bool,
    pub failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Passed,
    Failed,
}

impl FilterField {
    /// Declaration order; also the order query parameters are emitted in.
    pub const ALL: [FilterField; 6] = [
        FilterField::Freshman,
        FilterField::Sophomore,
        FilterField::Junior,
        FilterField::Senior,
        FilterField::Passed,
        FilterField::Failed,
    ];

    pub const SCHOOL_YEARS: [FilterField; 4] = [
        FilterField::Freshman,
        FilterField::Sophomore,
        FilterField::Junior,
        FilterField::Senior,
    ];

    pub const OUTCOMES: [FilterField; 2] = [FilterField::Passed, FilterField::Failed];

    /// Wire name, used both as query parameter and JSON key.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::Freshman => "freshman",
            FilterField::Sophomore => "sophomore",
            FilterField::Junior => "junior",
            FilterField::Senior => "senior",
            FilterField::Passed => "passed",
            FilterField::Failed => "failed",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        FilterField::ALL
            .into_iter()
            .find(|field| field.as_str() == needle)
            .ok_or_else(|| {
                format!(
                    "unknown filter '{s}' (expected one of: freshman, sophomore, junior, senior, passed, failed)"
                )
            })
    }
}

impl Filter {
    pub fn get(&self, field: FilterField) -> bool {
        match field {
            FilterField::Freshman => self.freshman,
            FilterField::Sophomore => self.sophomore,
            FilterField::Junior => self.junior,
            FilterField::Senior => self.senior,
            FilterField::Passed => self.passed,
            FilterField::Failed => self.failed,
        }
    }

    fn slot(&mut self, field: FilterField) -> &mut bool {
        match field {
            FilterField::Freshman => &mut self.freshman,
            FilterField::Sophomore => &mut self.sophomore,
            FilterField::Junior => &mut self.junior,
            FilterField::Senior => &mut self.senior,
            FilterField::Passed => &mut self.passed,
            FilterField::Failed => &mut self.failed,
        }
    }

    pub fn with(mut self, field: FilterField, value: bool) -> Self {
        *self.slot(field) = value;
        self
    }

    pub fn toggled(self, field: FilterField) -> Self {
        let current = self.get(field);
        self.with(field, !current)
    }

    pub fn active_count(&self) -> usize {
        FilterField::ALL.iter().filter(|f| self.get(**f)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// `(flag, "true")` for every set flag, in declaration order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        FilterField::ALL
            .into_iter()
            .filter(|f| self.get(*f))
            .map(|f| (f.as_str(), "true"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_active_flags() {
        let filter = Filter::default();
        assert!(filter.is_empty());
        assert!(filter.query_pairs().is_empty());
    }

    #[test]
    fn test_query_pairs_only_set_flags() {
        let filter = Filter::default()
            .with(FilterField::Senior, true)
            .with(FilterField::Freshman, true);
        assert_eq!(
            filter.query_pairs(),
            vec![("freshman", "true"), ("senior", "true")]
        );
    }

    #[test]
    fn test_toggle_flips_one_flag() {
        let filter = Filter::default().toggled(FilterField::Passed);
        assert!(filter.passed);
        assert_eq!(filter.active_count(), 1);
        assert!(filter.toggled(FilterField::Passed).is_empty());
    }

    #[test]
    fn test_field_parses_case_insensitively() {
        assert_eq!("Junior".parse::<FilterField>(), Ok(FilterField::Junior));
        assert!("graduate".parse::<FilterField>().is_err());
    }

    #[test]
    fn test_json_shape_matches_storage_format() {
        let filter = Filter::default().with(FilterField::Failed, true);
        let json = serde_json::to_value(filter).unwrap();
        assert_eq!(json["failed"], true);
        assert_eq!(json["freshman"], false);
        assert_eq!(json.as_object().unwrap().len(), 6);
    }
}
