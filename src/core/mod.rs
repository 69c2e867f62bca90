// Core query and encoding exports
pub mod encoding;
pub mod filters;
pub mod range;
pub mod schedule;
pub mod selector;

pub use encoding::{encode, AsArray, OrderedMap, ScalarEnum, UnknownVariant};
pub use filters::{FilterError, MatchFilter, MatchFilterSet, TimeField};
pub use range::{parse_difference_string, RangeError, RangePredicate};
pub use schedule::{current_state, CurrentState};
pub use selector::{select, select_matches, SelectionResult};
