//! Traffic matching criteria API implementation

use super::super::common::{number_or_string, string_or_number, BigIpApiResource};
use super::super::{ApiError, Client};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficMatchingCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_address_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_address_inline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port_list: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number::deserialize"
    )]
    pub destination_port_inline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address_inline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port_list: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "number_or_string::deserialize"
    )]
    pub source_port_inline: Option<i64>,
}

impl BigIpApiResource for TrafficMatchingCriteria {
    fn api_path() -> &'static str {
        "/mgmt/tm/ltm/traffic-matching-criteria"
    }
}

impl Client {
    pub async fn create_traffic_matching_criteria(
        &self,
        criteria: &TrafficMatchingCriteria,
    ) -> Result<(), ApiError> {
        self.post(TrafficMatchingCriteria::api_path(), criteria).await
    }

    pub async fn get_traffic_matching_criteria(
        &self,
        name: &str,
    ) -> Result<Option<TrafficMatchingCriteria>, ApiError> {
        self.get_optional(&TrafficMatchingCriteria::resource_path(name))
            .await
    }

    pub async fn modify_traffic_matching_criteria(
        &self,
        name: &str,
        criteria: &TrafficMatchingCriteria,
    ) -> Result<(), ApiError> {
        self.put(&TrafficMatchingCriteria::resource_path(name), criteria)
            .await
    }

    pub async fn delete_traffic_matching_criteria(&self, name: &str) -> Result<(), ApiError> {
        self.delete(&TrafficMatchingCriteria::resource_path(name))
            .await
    }
}
