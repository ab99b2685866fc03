pub mod criteria;
pub mod engine;
pub mod session;
pub mod state;

pub use criteria::SearchCriteria;
pub use engine::{run_query, QueryError, Queryable, SortDirection, SortKey, SortValue};
pub use session::{Pager, QuerySession};
pub use state::SearchState;
