//! Explicit per-user context around the pipeline.
//!
//! The pipeline stages are pure functions of (dataset, criteria). A `Session`
//! holds what a user has selected so far and turns each request into one
//! fresh evaluation; loading is memoized by the `DataSource`.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info_span};

use crate::input::DataSource;
use crate::model::criteria::{Direction, FilterCriteria, GroupKey, SortKey};
use crate::model::error::PipelineResult;
use crate::model::record::Dataset;
use crate::pipeline::stage2_filter::filter;
use crate::pipeline::stage6_views::{
    DashboardView, PersonProfile, ViewOptions, build_dashboard, person_profile,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Refresh,
    FilterChanged(FilterCriteria),
    SortChanged {
        key: SortKey,
        direction: Direction,
        limit: Option<usize>,
    },
    GroupChanged(GroupKey),
    SelectionChanged(Option<String>),
}

#[derive(Debug)]
pub struct View {
    pub filtered: Dataset,
    pub dashboard: DashboardView,
    /// Profile of the selected person if they are in the filtered set.
    pub profile: Option<PersonProfile>,
}

#[derive(Debug)]
pub struct Session {
    /// Who the session belongs to; used only to tag log output.
    pub operator: Option<String>,
    source: DataSource,
    criteria: FilterCriteria,
    options: ViewOptions,
    selected: Option<String>,
}

impl Session {
    pub fn new(source: DataSource) -> Self {
        Self {
            operator: None,
            source,
            criteria: FilterCriteria::default(),
            options: ViewOptions::default(),
            selected: None,
        }
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    pub fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_selection(mut self, selected: Option<String>) -> Self {
        self.selected = selected;
        self
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn options(&self) -> ViewOptions {
        self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Applies the request to the session state and evaluates a new view.
    /// Only a failed load is an error; view-level failures live in the view.
    pub fn handle(&mut self, request: Request) -> PipelineResult<View> {
        let span = info_span!("request", operator = self.operator.as_deref().unwrap_or("-"));
        let _guard = span.enter();
        debug!(?request, "handling request");

        match request {
            Request::Refresh => {}
            Request::FilterChanged(criteria) => self.criteria = criteria,
            Request::SortChanged {
                key,
                direction,
                limit,
            } => {
                self.options.sort = key;
                self.options.direction = direction;
                self.options.limit = limit;
            }
            Request::GroupChanged(key) => self.options.group_key = key,
            Request::SelectionChanged(name) => self.selected = name,
        }
        self.evaluate()
    }

    /// Administrative whole-table swap; the next request reloads from scratch.
    pub fn replace_source(&mut self, replacement: &Path) -> PipelineResult<usize> {
        self.source.replace(replacement)
    }

    fn evaluate(&mut self) -> PipelineResult<View> {
        let full: Arc<Dataset> = self.source.load()?;
        let filtered = filter(&full, &self.criteria);
        let dashboard = build_dashboard(&full, &filtered, self.options);
        let profile = self
            .selected
            .as_deref()
            .and_then(|name| person_profile(&filtered, name));
        Ok(View {
            filtered,
            dashboard,
            profile,
        })
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/session.rs"]
mod tests;
