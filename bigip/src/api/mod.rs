//! iControl REST API layer
//!
//! `BigIpApi` is the boundary the resources talk to; `Client` implements it
//! over HTTP.

pub mod client;
pub mod common;
pub mod error;
pub mod ltm;
pub mod net;

#[cfg(test)]
pub mod test_helpers;

pub use client::Client;
pub use error::ApiError;
pub use ltm::{TrafficMatchingCriteria, UniversalPersistenceProfile};
pub use net::{AddressList, AddressListAddress};

use async_trait::async_trait;

/// Remote operations needed by the resources, one group per object family.
/// `get_*` returns `Ok(None)` when the object does not exist.
#[async_trait]
pub trait BigIpApi: Send + Sync {
    async fn create_universal_persistence_profile(
        &self,
        profile: &UniversalPersistenceProfile,
    ) -> Result<(), ApiError>;

    async fn get_universal_persistence_profile(
        &self,
        name: &str,
    ) -> Result<Option<UniversalPersistenceProfile>, ApiError>;

    async fn modify_universal_persistence_profile(
        &self,
        name: &str,
        profile: &UniversalPersistenceProfile,
    ) -> Result<(), ApiError>;

    async fn delete_universal_persistence_profile(&self, name: &str) -> Result<(), ApiError>;

    async fn create_traffic_matching_criteria(
        &self,
        criteria: &TrafficMatchingCriteria,
    ) -> Result<(), ApiError>;

    async fn get_traffic_matching_criteria(
        &self,
        name: &str,
    ) -> Result<Option<TrafficMatchingCriteria>, ApiError>;

    async fn modify_traffic_matching_criteria(
        &self,
        name: &str,
        criteria: &TrafficMatchingCriteria,
    ) -> Result<(), ApiError>;

    async fn delete_traffic_matching_criteria(&self, name: &str) -> Result<(), ApiError>;

    async fn create_address_list(&self, list: &AddressList) -> Result<(), ApiError>;

    async fn get_address_list(&self, name: &str) -> Result<Option<AddressList>, ApiError>;

    async fn modify_address_list(&self, name: &str, list: &AddressList) -> Result<(), ApiError>;

    async fn delete_address_list(&self, name: &str) -> Result<(), ApiError>;
}
