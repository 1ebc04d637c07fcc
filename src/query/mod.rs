//! Query-time side of the spatial hash: planning and evaluating radius
//! searches.

pub mod disc;
pub mod planner;
pub mod predicate;
pub mod search;

pub use disc::SearchDisc;
pub use planner::{SpatialQuery, SpatialQueryPlanner, plan_query};
pub use predicate::{CoarsePredicate, DistanceFn, ExactFilter};
pub use search::{QueryStats, SearchHit, SearchOptions, SearchResults, SpatialSearch};
