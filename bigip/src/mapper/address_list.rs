use super::{get_string, get_string_list, identity, record, require, string_value};
use crate::api::{AddressList, AddressListAddress};
use tfplug::types::{Diagnostic, Dynamic, DynamicValue};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressListModel {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub addresses: Option<Vec<String>>,
}

impl AddressListModel {
    pub fn from_dynamic(value: &DynamicValue) -> Self {
        Self {
            id: get_string(value, "id"),
            name: get_string(value, "name"),
            description: get_string(value, "description"),
            addresses: get_string_list(value, "addresses"),
        }
    }

    pub fn validate_required(&self) -> Result<(), Diagnostic> {
        require(&self.name, "name")
    }

    pub fn identity(&self) -> Option<String> {
        identity(&self.id, &self.name)
    }

    pub fn to_request(&self) -> AddressList {
        AddressList {
            name: self.name.clone(),
            description: self.description.clone(),
            addresses: self.addresses.as_ref().map(|addresses| {
                addresses
                    .iter()
                    .map(|address| AddressListAddress {
                        name: address.clone(),
                    })
                    .collect()
            }),
        }
    }

    pub fn apply_response(&mut self, list: &AddressList) {
        self.description = list.description.clone();
        self.addresses = list
            .addresses
            .as_ref()
            .map(|addresses| addresses.iter().map(|a| a.name.clone()).collect());
    }

    pub fn to_dynamic(&self) -> DynamicValue {
        let addresses = self
            .addresses
            .as_ref()
            .map(|addresses| {
                Dynamic::List(addresses.iter().cloned().map(Dynamic::String).collect())
            })
            .unwrap_or(Dynamic::Null);

        record(vec![
            ("id", string_value(&self.id)),
            ("name", string_value(&self.name)),
            ("description", string_value(&self.description)),
            ("addresses", addresses),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfplug::types::AttributePath;

    fn model() -> AddressListModel {
        AddressListModel {
            id: None,
            name: Some("/Common/al1".to_string()),
            description: Some("backends".to_string()),
            addresses: Some(vec!["10.0.0.1/32".to_string(), "10.0.0.2/32".to_string()]),
        }
    }

    #[test]
    fn addresses_are_wrapped_in_order() {
        let request = model().to_request();

        assert_eq!(
            request.addresses.unwrap(),
            vec![
                AddressListAddress {
                    name: "10.0.0.1/32".to_string()
                },
                AddressListAddress {
                    name: "10.0.0.2/32".to_string()
                },
            ]
        );
    }

    #[test]
    fn response_unwraps_in_order() {
        let original = model();
        let mut restored = AddressListModel {
            name: original.name.clone(),
            ..Default::default()
        };

        restored.apply_response(&original.to_request());
        assert_eq!(restored, original);
    }

    #[test]
    fn absent_addresses_stay_null() {
        let m = AddressListModel {
            name: Some("/Common/empty".to_string()),
            ..Default::default()
        };

        assert!(m.to_request().addresses.is_none());
        assert_eq!(
            m.to_dynamic().get(&AttributePath::new("addresses")),
            Some(&Dynamic::Null)
        );
    }

    #[test]
    fn dynamic_round_trip() {
        let mut m = model();
        m.id = m.name.clone();

        let value = m.to_dynamic();
        assert_eq!(
            value
                .get_string(&AttributePath::new("addresses").index(1))
                .unwrap(),
            "10.0.0.2/32"
        );
        assert_eq!(AddressListModel::from_dynamic(&value), m);
    }
}
