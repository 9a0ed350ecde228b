pub mod criteria;
pub mod engine;
pub mod monthly;
pub mod price;
pub mod request;
pub mod session;
pub mod time_bucket;
pub mod timestamp;
pub mod trip_type;

pub use criteria::{CriteriaSelection, FilterCriteria, FilterDefaults};
pub use engine::{FilterReport, FilterStats, FlightFilterEngine, RejectReason, Verdict};
pub use monthly::{MonthlyAggregator, Route};
pub use price::PriceRange;
pub use request::SearchRequestBuilder;
pub use session::{ResultsView, SearchSequencer, SearchTicket};
pub use time_bucket::TimeBucket;
pub use trip_type::TripTypeMode;
