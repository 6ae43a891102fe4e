use super::{get_i64, get_string, i64_value, identity, record, require, string_value};
use crate::api::UniversalPersistenceProfile;
use tfplug::types::{Diagnostic, DynamicValue};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistenceProfileModel {
    pub id: Option<String>,
    pub name: Option<String>,
    pub defaults_from: Option<String>,
    pub app_service: Option<String>,
    pub match_across_pools: Option<String>,
    pub match_across_services: Option<String>,
    pub match_across_virtuals: Option<String>,
    pub method: Option<String>,
    pub mirror: Option<String>,
    pub override_conn_limit: Option<String>,
    pub timeout: Option<i64>,
    pub rule: Option<String>,
}

impl PersistenceProfileModel {
    pub fn from_dynamic(value: &DynamicValue) -> Self {
        Self {
            id: get_string(value, "id"),
            name: get_string(value, "name"),
            defaults_from: get_string(value, "defaults_from"),
            app_service: get_string(value, "app_service"),
            match_across_pools: get_string(value, "match_across_pools"),
            match_across_services: get_string(value, "match_across_services"),
            match_across_virtuals: get_string(value, "match_across_virtuals"),
            method: get_string(value, "method"),
            mirror: get_string(value, "mirror"),
            override_conn_limit: get_string(value, "override_conn_limit"),
            timeout: get_i64(value, "timeout"),
            rule: get_string(value, "rule"),
        }
    }

    pub fn validate_required(&self) -> Result<(), Diagnostic> {
        require(&self.name, "name")?;
        require(&self.defaults_from, "defaults_from")
    }

    pub fn identity(&self) -> Option<String> {
        identity(&self.id, &self.name)
    }

    /// Creation only establishes the object and its parent profile
    pub fn to_create_request(&self) -> UniversalPersistenceProfile {
        UniversalPersistenceProfile {
            name: self.name.clone(),
            defaults_from: self.defaults_from.clone(),
            ..Default::default()
        }
    }

    /// Full modify body. `method` is fixed by the profile type and is
    /// never sent.
    pub fn to_request(&self) -> UniversalPersistenceProfile {
        UniversalPersistenceProfile {
            name: None,
            defaults_from: self.defaults_from.clone(),
            app_service: self.app_service.clone(),
            match_across_pools: self.match_across_pools.clone(),
            match_across_services: self.match_across_services.clone(),
            match_across_virtuals: self.match_across_virtuals.clone(),
            method: None,
            mirror: self.mirror.clone(),
            override_connection_limit: self.override_conn_limit.clone(),
            timeout: self.timeout.map(|t| t.to_string()),
            rule: self.rule.clone(),
        }
    }

    pub fn apply_response(&mut self, profile: &UniversalPersistenceProfile) {
        self.defaults_from = profile.defaults_from.clone();
        self.app_service = profile.app_service.clone();
        self.match_across_pools = profile.match_across_pools.clone();
        self.match_across_services = profile.match_across_services.clone();
        self.match_across_virtuals = profile.match_across_virtuals.clone();
        self.method = profile.method.clone();
        self.mirror = profile.mirror.clone();
        self.override_conn_limit = profile.override_connection_limit.clone();
        self.rule = profile.rule.clone();

        if let Some(raw) = &profile.timeout {
            match raw.parse::<i64>() {
                Ok(timeout) => self.timeout = Some(timeout),
                Err(_) => tracing::debug!(
                    "Ignoring non-numeric persistence timeout {:?}, keeping {:?}",
                    raw,
                    self.timeout
                ),
            }
        }
    }

    pub fn to_dynamic(&self) -> DynamicValue {
        record(vec![
            ("id", string_value(&self.id)),
            ("name", string_value(&self.name)),
            ("defaults_from", string_value(&self.defaults_from)),
            ("app_service", string_value(&self.app_service)),
            ("match_across_pools", string_value(&self.match_across_pools)),
            ("match_across_services", string_value(&self.match_across_services)),
            ("match_across_virtuals", string_value(&self.match_across_virtuals)),
            ("method", string_value(&self.method)),
            ("mirror", string_value(&self.mirror)),
            ("override_conn_limit", string_value(&self.override_conn_limit)),
            ("timeout", i64_value(self.timeout)),
            ("rule", string_value(&self.rule)),
        ])
    }
}
