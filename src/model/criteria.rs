use serde::Serialize;

use crate::model::error::{PipelineError, PipelineResult};
use crate::model::record::Record;
use crate::model::schema::AbilitySchema;

/// Conjunction of filter predicates. `None` / empty means the predicate is
/// unset and matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    /// Selected departments, compared case-insensitively. `Some(empty)`
    /// matches nothing.
    pub departments: Option<Vec<String>>,
    /// Inclusive composite range.
    pub score_range: Option<(f64, f64)>,
    /// Per-dimension inclusive minimums as (dimension index, min).
    pub dimension_min: Vec<(usize, f64)>,
    /// Unanchored, case-insensitive substring of the name.
    pub name_contains: Option<String>,
    /// Inclusive age minimum; records without an age fail it.
    pub min_age: Option<f64>,
}

impl FilterCriteria {
    pub fn with_departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = Some(departments.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_score_range(mut self, low: f64, high: f64) -> Self {
        self.score_range = Some((low, high));
        self
    }

    pub fn with_dimension_min(
        mut self,
        schema: &AbilitySchema,
        dimension: &str,
        min: f64,
    ) -> PipelineResult<Self> {
        let idx = schema
            .dimension_index(dimension)
            .ok_or_else(|| PipelineError::UnknownField(dimension.to_string()))?;
        self.dimension_min.push((idx, min));
        Ok(self)
    }

    pub fn with_name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    pub fn with_min_age(mut self, min_age: f64) -> Self {
        self.min_age = Some(min_age);
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(departments) = &self.departments {
            let dept = fold(&record.department);
            if !departments.iter().any(|d| fold(d) == dept) {
                return false;
            }
        }
        if let Some((low, high)) = self.score_range {
            if record.composite < low || record.composite > high {
                return false;
            }
        }
        for &(dim, min) in &self.dimension_min {
            if record.score(dim) < min {
                return false;
            }
        }
        if let Some(needle) = &self.name_contains {
            if !fold(&record.name).contains(&fold(needle)) {
                return false;
            }
        }
        if let Some(min_age) = self.min_age {
            match record.attributes.age {
                Some(age) if age >= min_age => {}
                _ => return false,
            }
        }
        true
    }
}

/// Identity used for department and group matching: trimmed, lowercase.
pub fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Composite,
    Dimension(usize),
}

impl SortKey {
    /// `composite` or an ability dimension name.
    pub fn parse(name: &str, schema: &AbilitySchema) -> PipelineResult<Self> {
        if name == "composite" || name == schema.composite_column {
            return Ok(SortKey::Composite);
        }
        schema
            .dimension_index(name)
            .map(SortKey::Dimension)
            .ok_or_else(|| PipelineError::UnknownField(name.to_string()))
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            SortKey::Composite => record.composite,
            SortKey::Dimension(dim) => record.score(dim),
        }
    }

    pub fn label(self, schema: &AbilitySchema) -> String {
        match self {
            SortKey::Composite => schema.composite_column.clone(),
            SortKey::Dimension(dim) => schema
                .dimensions
                .get(dim)
                .cloned()
                .unwrap_or_else(|| format!("dimension_{dim}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Descending,
    Ascending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    #[default]
    Department,
    PoliticalAffiliation,
    Role,
}

impl GroupKey {
    /// Records without a value for the key are left out of grouping.
    pub fn value<'a>(self, record: &'a Record) -> Option<&'a str> {
        match self {
            GroupKey::Department => Some(record.department.as_str()),
            GroupKey::PoliticalAffiliation => record.attributes.political_affiliation.as_deref(),
            GroupKey::Role => record.attributes.role.as_deref(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/criteria.rs"]
mod tests;
