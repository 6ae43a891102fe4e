pub mod persistence;
pub mod traffic_matching_criteria;

pub use persistence::UniversalPersistenceProfile;
pub use traffic_matching_criteria::TrafficMatchingCriteria;
