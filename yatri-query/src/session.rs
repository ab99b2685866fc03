use crate::criteria::SearchCriteria;
use crate::engine::{run_query, sort_records, QueryError, Queryable, SortDirection, SortKey};
use crate::state::SearchState;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 1-based page window over a result list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1))
    }

    /// The visible window; an out-of-range page is an empty slice.
    /// Pages are 1-based, so page 0 is out of range by definition.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if self.page == 0 {
            return &[];
        }
        let start = (self.page - 1) * self.page_size;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One listing page's view over an injected catalog collection: criteria,
/// sort order, and pagination, recomputed on demand.
///
/// Changing any criterion resets to page 1; changing the sort order keeps
/// the current page.
#[derive(Debug, Clone)]
pub struct QuerySession<T> {
    records: Vec<T>,
    criteria: SearchCriteria,
    sort_key: SortKey,
    direction: SortDirection,
    pager: Pager,
    state: SearchState<T>,
}

impl<T: Queryable + Clone> QuerySession<T> {
    pub fn new(records: Vec<T>, default_sort: SortKey) -> Self {
        Self {
            records,
            criteria: SearchCriteria::default(),
            sort_key: default_sort,
            direction: SortDirection::Ascending,
            pager: Pager::default(),
            state: SearchState::Unsearched,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pager = Pager::new(page_size);
        self
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn state(&self) -> &SearchState<T> {
        &self.state
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    /// Edit criteria through a closure; any edit resets pagination.
    pub fn update_criteria(&mut self, edit: impl FnOnce(&mut SearchCriteria)) {
        edit(&mut self.criteria);
        self.pager.reset();
    }

    pub fn set_criteria(&mut self, criteria: SearchCriteria) {
        self.criteria = criteria;
        self.pager.reset();
    }

    /// Run the query with the current criteria and sort order.
    pub fn search(&mut self) -> Result<&SearchState<T>, QueryError> {
        let mut state = run_query(&self.records, &self.criteria)?;
        if let SearchState::Results(records) = &mut state {
            sort_records(records, self.sort_key, self.direction);
        }
        debug!(matched = state.len(), page = self.pager.page, "search");
        self.state = state;
        Ok(&self.state)
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort_key = key;
        self.resort();
    }

    pub fn toggle_direction(&mut self) {
        self.direction.toggle();
        self.resort();
    }

    fn resort(&mut self) {
        if let SearchState::Results(records) = &mut self.state {
            sort_records(records, self.sort_key, self.direction);
        }
    }

    pub fn total(&self) -> usize {
        self.state.len()
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count(self.total())
    }

    pub fn set_page(&mut self, page: usize) {
        self.pager.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        if self.pager.page < self.page_count() {
            self.pager.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.pager.page > 1 {
            self.pager.page -= 1;
        }
    }

    /// Records visible on the current page; empty unless in `Results`.
    pub fn current_page(&self) -> &[T] {
        match &self.state {
            SearchState::Results(records) => self.pager.slice(records),
            _ => &[],
        }
    }
}
