pub mod resource_persistence_profile_universal;
pub mod resource_traffic_matching_criteria;

pub use resource_persistence_profile_universal::PersistenceProfileUniversalResource;
pub use resource_traffic_matching_criteria::TrafficMatchingCriteriaResource;
