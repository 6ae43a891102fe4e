//! Address list API implementation

use super::super::common::BigIpApiResource;
use super::super::{ApiError, Client};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<AddressListAddress>>,
}

/// One entry of an address list; the device keys entries by `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressListAddress {
    pub name: String,
}

impl BigIpApiResource for AddressList {
    fn api_path() -> &'static str {
        "/mgmt/tm/net/address-list"
    }
}

impl Client {
    pub async fn create_address_list(&self, list: &AddressList) -> Result<(), ApiError> {
        self.post(AddressList::api_path(), list).await
    }

    pub async fn get_address_list(&self, name: &str) -> Result<Option<AddressList>, ApiError> {
        self.get_optional(&AddressList::resource_path(name)).await
    }

    pub async fn modify_address_list(
        &self,
        name: &str,
        list: &AddressList,
    ) -> Result<(), ApiError> {
        self.put(&AddressList::resource_path(name), list).await
    }

    pub async fn delete_address_list(&self, name: &str) -> Result<(), ApiError> {
        self.delete(&AddressList::resource_path(name)).await
    }
}
