use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::error::{PipelineError, PipelineResult};

pub const DIMENSION_COUNT: usize = 6;
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// Column layout of an evaluation table plus the ability dimensions that
/// feed the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilitySchema {
    pub name_column: String,
    pub department_column: String,
    #[serde(default)]
    pub political_affiliation_column: Option<String>,
    #[serde(default)]
    pub role_column: Option<String>,
    #[serde(default)]
    pub age_column: Option<String>,
    #[serde(default)]
    pub remarks_column: Option<String>,
    pub dimensions: Vec<String>,
    #[serde(default = "default_composite_column")]
    pub composite_column: String,
    #[serde(default)]
    pub spotlight_dimension: Option<String>,
    #[serde(default = "default_spotlight_min")]
    pub spotlight_min: f64,
}

fn default_spotlight_min() -> f64 {
    9.0
}

fn default_composite_column() -> String {
    "综合得分".to_string()
}

impl AbilitySchema {
    pub fn procuratorial() -> Self {
        Self {
            name_column: "姓名".to_string(),
            department_column: "部门".to_string(),
            political_affiliation_column: Some("政治面貌".to_string()),
            role_column: Some("身份".to_string()),
            age_column: Some("年龄".to_string()),
            remarks_column: Some("备注".to_string()),
            dimensions: [
                "业务能力",
                "信调宣能力",
                "创新能力",
                "学习能力",
                "综合能力",
                "政治素养",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            composite_column: default_composite_column(),
            spotlight_dimension: Some("创新能力".to_string()),
            spotlight_min: default_spotlight_min(),
        }
    }

    pub fn preset(name: &str) -> PipelineResult<Self> {
        match name {
            "procuratorial" => Ok(Self::procuratorial()),
            other => Err(PipelineError::Config(format!(
                "unknown preset {other} (use procuratorial)"
            ))),
        }
    }

    pub fn from_json(text: &str) -> PipelineResult<Self> {
        let schema: Self =
            serde_json::from_str(text).map_err(|e| PipelineError::Config(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn load(path: &Path) -> PipelineResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.dimensions.len() != DIMENSION_COUNT {
            return Err(PipelineError::Config(format!(
                "expected {DIMENSION_COUNT} ability dimensions, got {}",
                self.dimensions.len()
            )));
        }
        let mut seen = HashSet::new();
        for dim in &self.dimensions {
            if dim.trim().is_empty() {
                return Err(PipelineError::Config("empty dimension name".to_string()));
            }
            if !seen.insert(dim.as_str()) {
                return Err(PipelineError::Config(format!("duplicate dimension {dim}")));
            }
        }
        if let Some(spot) = &self.spotlight_dimension {
            if self.dimension_index(spot).is_none() {
                return Err(PipelineError::Config(format!(
                    "spotlight dimension {spot} is not an ability dimension"
                )));
            }
        }
        Ok(())
    }

    pub fn dimension_index(&self, name: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d == name)
    }

    pub fn spotlight_index(&self) -> Option<usize> {
        self.spotlight_dimension
            .as_deref()
            .and_then(|name| self.dimension_index(name))
    }

    /// Columns mapped onto typed record fields; anything else in the source is
    /// carried through as an extra attribute. A composite column already in the
    /// source is dropped since the score is always recomputed.
    pub fn known_columns(&self) -> Vec<&str> {
        let mut cols = vec![self.name_column.as_str(), self.department_column.as_str()];
        for col in [
            &self.political_affiliation_column,
            &self.role_column,
            &self.age_column,
            &self.remarks_column,
        ]
        .into_iter()
        .flatten()
        {
            cols.push(col.as_str());
        }
        cols.extend(self.dimensions.iter().map(|d| d.as_str()));
        cols.push(self.composite_column.as_str());
        cols
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/schema.rs"]
mod tests;
