// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod tags;

pub use domain::{
    IncomeBracket, PageRequest, ResultPage, ScoredCandidate, SearchCriteria, ServiceRecord,
    UserContext, UserProfile,
};
pub use requests::{AutocompleteQuery, MatchedServicesQuery, SearchServicesQuery};
pub use responses::{ErrorResponse, FilterOptionsResponse, HealthResponse, ServiceSummary};
pub use tags::{BusinessType, FamilyType, Occupation, ServiceCategory, SpecialGroup};
