use serde::{Deserialize, Serialize};

/// Result of a search, keeping "never searched" distinct from "searched and
/// found nothing". The listing pages render the two differently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SearchState<T> {
    Unsearched,
    Empty,
    Results(Vec<T>),
}

impl<T> SearchState<T> {
    pub fn is_unsearched(&self) -> bool {
        matches!(self, SearchState::Unsearched)
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self, SearchState::Empty)
    }

    pub fn results(&self) -> Option<&[T]> {
        match self {
            SearchState::Results(records) => Some(records),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchState::Results(records) => records.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
