use super::{get_i64, get_string, i64_value, identity, record, require, string_value};
use crate::api::TrafficMatchingCriteria;
use tfplug::types::{Diagnostic, DynamicValue};

/// The device rejects criteria without a source address, so requests fall
/// back to matching any source
pub const WILDCARD_SOURCE_ADDRESS: &str = "0.0.0.0";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrafficMatchingCriteriaModel {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub protocol: Option<String>,
    pub route_domain: Option<String>,
    pub destination_address_list: Option<String>,
    pub destination_address_inline: Option<String>,
    pub destination_port_list: Option<String>,
    pub destination_port_inline: Option<String>,
    pub source_address_list: Option<String>,
    pub source_address_inline: Option<String>,
    pub source_port_list: Option<String>,
    pub source_port_inline: Option<i64>,
}

impl TrafficMatchingCriteriaModel {
    pub fn from_dynamic(value: &DynamicValue) -> Self {
        Self {
            id: get_string(value, "id"),
            name: get_string(value, "name"),
            description: get_string(value, "description"),
            protocol: get_string(value, "protocol"),
            route_domain: get_string(value, "route_domain"),
            destination_address_list: get_string(value, "destination_address_list"),
            destination_address_inline: get_string(value, "destination_address_inline"),
            destination_port_list: get_string(value, "destination_port_list"),
            destination_port_inline: get_string(value, "destination_port_inline"),
            source_address_list: get_string(value, "source_address_list"),
            source_address_inline: get_string(value, "source_address_inline"),
            source_port_list: get_string(value, "source_port_list"),
            source_port_inline: get_i64(value, "source_port_inline"),
        }
    }

    pub fn validate_required(&self) -> Result<(), Diagnostic> {
        require(&self.name, "name")
    }

    pub fn identity(&self) -> Option<String> {
        identity(&self.id, &self.name)
    }

    pub fn to_request(&self) -> TrafficMatchingCriteria {
        let source_address_inline = self
            .source_address_inline
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| WILDCARD_SOURCE_ADDRESS.to_string());

        TrafficMatchingCriteria {
            name: self.name.clone(),
            description: self.description.clone(),
            protocol: self.protocol.clone(),
            route_domain: self.route_domain.clone(),
            destination_address_list: self.destination_address_list.clone(),
            destination_address_inline: self.destination_address_inline.clone(),
            destination_port_list: self.destination_port_list.clone(),
            destination_port_inline: self.destination_port_inline.clone(),
            source_address_list: self.source_address_list.clone(),
            source_address_inline: Some(source_address_inline),
            source_port_list: self.source_port_list.clone(),
            source_port_inline: self.source_port_inline,
        }
    }

    pub fn apply_response(&mut self, criteria: &TrafficMatchingCriteria) {
        self.description = criteria.description.clone();
        self.protocol = criteria.protocol.clone();
        self.route_domain = criteria.route_domain.clone();
        self.destination_address_list = criteria.destination_address_list.clone();
        self.destination_address_inline = criteria.destination_address_inline.clone();
        self.destination_port_list = criteria.destination_port_list.clone();
        self.destination_port_inline = criteria.destination_port_inline.clone();
        self.source_address_list = criteria.source_address_list.clone();
        self.source_address_inline = criteria.source_address_inline.clone();
        self.source_port_list = criteria.source_port_list.clone();
        self.source_port_inline = criteria.source_port_inline;
    }

    pub fn to_dynamic(&self) -> DynamicValue {
        record(vec![
            ("id", string_value(&self.id)),
            ("name", string_value(&self.name)),
            ("description", string_value(&self.description)),
            ("protocol", string_value(&self.protocol)),
            ("route_domain", string_value(&self.route_domain)),
            (
                "destination_address_list",
                string_value(&self.destination_address_list),
            ),
            (
                "destination_address_inline",
                string_value(&self.destination_address_inline),
            ),
            ("destination_port_list", string_value(&self.destination_port_list)),
            (
                "destination_port_inline",
                string_value(&self.destination_port_inline),
            ),
            ("source_address_list", string_value(&self.source_address_list)),
            ("source_address_inline", string_value(&self.source_address_inline)),
            ("source_port_list", string_value(&self.source_port_list)),
            ("source_port_inline", i64_value(self.source_port_inline)),
        ])
    }
}
