//! Universal persistence profile API implementation

use super::super::common::{string_or_number, BigIpApiResource};
use super::super::{ApiError, Client};
use serde::{Deserialize, Serialize};

/// A universal persistence profile as exchanged with
/// `/mgmt/tm/ltm/persistence/universal`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalPersistenceProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_across_pools: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_across_services: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_across_virtuals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_connection_limit: Option<String>,
    /// Seconds, or a keyword such as `indefinite`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize"
    )]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl BigIpApiResource for UniversalPersistenceProfile {
    fn api_path() -> &'static str {
        "/mgmt/tm/ltm/persistence/universal"
    }
}

impl Client {
    /// POST /mgmt/tm/ltm/persistence/universal
    pub async fn create_universal_persistence(
        &self,
        profile: &UniversalPersistenceProfile,
    ) -> Result<(), ApiError> {
        self.post(UniversalPersistenceProfile::api_path(), profile)
            .await
    }

    /// GET /mgmt/tm/ltm/persistence/universal/{name}
    pub async fn get_universal_persistence(
        &self,
        name: &str,
    ) -> Result<Option<UniversalPersistenceProfile>, ApiError> {
        self.get_optional(&UniversalPersistenceProfile::resource_path(name))
            .await
    }

    /// PUT /mgmt/tm/ltm/persistence/universal/{name}
    pub async fn modify_universal_persistence(
        &self,
        name: &str,
        profile: &UniversalPersistenceProfile,
    ) -> Result<(), ApiError> {
        self.put(&UniversalPersistenceProfile::resource_path(name), profile)
            .await
    }

    /// DELETE /mgmt/tm/ltm/persistence/universal/{name}
    pub async fn delete_universal_persistence(&self, name: &str) -> Result<(), ApiError> {
        self.delete(&UniversalPersistenceProfile::resource_path(name))
            .await
    }
}
