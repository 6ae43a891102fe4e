//! Terraform provider for F5 BIG-IP
//!
//! Manages universal persistence profiles, traffic matching criteria and
//! address lists through the iControl REST API.

pub mod api;
pub mod mapper;
pub mod provider_data;
pub mod resources;
pub mod validators;

pub use provider_data::BigIpProviderData;

use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tfplug::context::Context;
use tfplug::provider::{
    ConfigureProviderRequest, ConfigureProviderResponse, Provider, ProviderMetadataRequest,
    ProviderMetadataResponse, ProviderResource, ProviderSchemaRequest, ProviderSchemaResponse,
    ResourceFactory, ValidateProviderConfigRequest, ValidateProviderConfigResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, DynamicValue};
use tfplug::validator::NumberRangeValidator;

pub const DEFAULT_PORT: u16 = 443;

#[derive(Default)]
pub struct BigIpProvider {
    provider_data: Option<BigIpProviderData>,
}

impl BigIpProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.provider_data.is_some()
    }

    fn build_schema() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("F5 BIG-IP provider")
            .attribute(
                AttributeBuilder::new("address", AttributeType::String)
                    .description("Domain name or IP address of the BIG-IP. Can also be set with BIGIP_HOST")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("port", AttributeType::Number)
                    .description("Management port, default 443. Can also be set with BIGIP_PORT")
                    .optional()
                    .validator(Box::new(NumberRangeValidator {
                        min: Some(1.0),
                        max: Some(65535.0),
                    }))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("username", AttributeType::String)
                    .description("Username with API access to the BIG-IP. Can also be set with BIGIP_USER")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("password", AttributeType::String)
                    .description("Password for API access. Can also be set with BIGIP_PASSWORD")
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("validate_certs_disable", AttributeType::Bool)
                    .description("Skip TLS certificate verification, default true. Can also be set with BIGIP_VERIFY_CERT_DISABLE")
                    .optional()
                    .build(),
            )
            .build()
    }
}

/// Configuration value first, then the environment variable
fn config_string(config: &DynamicValue, key: &str, env: &str) -> Option<String> {
    config
        .get_string(&AttributePath::new(key))
        .ok()
        .or_else(|| std::env::var(env).ok())
        .filter(|s| !s.is_empty())
}

fn config_port(config: &DynamicValue) -> Result<u16, Diagnostic> {
    if let Ok(port) = config.get_number(&AttributePath::new("port")) {
        if port.fract() != 0.0 || !(1.0..=65535.0).contains(&port) {
            return Err(
                Diagnostic::error("Invalid port", format!("{} is not a valid TCP port", port))
                    .with_attribute(AttributePath::new("port")),
            );
        }
        return Ok(port as u16);
    }

    match std::env::var("BIGIP_PORT") {
        Ok(raw) if !raw.is_empty() => raw
            .parse::<u16>()
            .ok()
            .filter(|port| *port != 0)
            .ok_or_else(|| {
                Diagnostic::error(
                    "Invalid port",
                    format!("BIGIP_PORT value {:?} is not a valid TCP port", raw),
                )
            }),
        _ => Ok(DEFAULT_PORT),
    }
}

fn config_insecure(config: &DynamicValue) -> bool {
    config
        .get_bool(&AttributePath::new("validate_certs_disable"))
        .ok()
        .or_else(|| {
            std::env::var("BIGIP_VERIFY_CERT_DISABLE")
                .ok()
                .and_then(|v| v.parse::<bool>().ok())
        })
        .unwrap_or(true)
}

#[async_trait]
impl Provider for BigIpProvider {
    fn type_name(&self) -> &str {
        "bigip"
    }

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ProviderMetadataRequest,
    ) -> ProviderMetadataResponse {
        ProviderMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ProviderSchemaRequest,
    ) -> ProviderSchemaResponse {
        ProviderSchemaResponse {
            schema: Self::build_schema(),
            diagnostics: vec![],
        }
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateProviderConfigRequest,
    ) -> ValidateProviderConfigResponse {
        ValidateProviderConfigResponse {
            diagnostics: Self::build_schema().validate_config(&request.config),
        }
    }

    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureProviderRequest,
    ) -> ConfigureProviderResponse {
        let config = &request.config;
        let mut diagnostics = vec![];
        self.provider_data = None;

        let address = config_string(config, "address", "BIGIP_HOST");
        let username = config_string(config, "username", "BIGIP_USER");
        let password = config_string(config, "password", "BIGIP_PASSWORD");
        let insecure = config_insecure(config);

        let port = match config_port(config) {
            Ok(port) => port,
            Err(diag) => {
                return ConfigureProviderResponse {
                    diagnostics: vec![diag],
                    provider_data: None,
                }
            }
        };

        match (address, username, password) {
            (Some(address), Some(username), Some(password)) => {
                let client = api::Client::endpoint(&address, port).and_then(|endpoint| {
                    tracing::info!("Configuring BIG-IP client for {}", endpoint);
                    api::Client::new(endpoint.as_str(), &username, &password, insecure)
                });

                match client {
                    Ok(client) => {
                        self.provider_data = Some(BigIpProviderData::new(client));
                    }
                    Err(e) => {
                        diagnostics.push(Diagnostic::error(
                            format!("Failed to create API client: {}", e),
                            format!("Could not build a client for {}", address),
                        ));
                    }
                }
            }
            (None, _, _) => {
                diagnostics.push(Diagnostic::error(
                    "address is required (set in provider config or BIGIP_HOST env var)",
                    "No BIG-IP address was configured",
                ));
            }
            (_, None, _) => {
                diagnostics.push(Diagnostic::error(
                    "username is required (set in provider config or BIGIP_USER env var)",
                    "No BIG-IP username was configured",
                ));
            }
            (_, _, None) => {
                diagnostics.push(Diagnostic::error(
                    "password is required (set in provider config or BIGIP_PASSWORD env var)",
                    "No BIG-IP password was configured",
                ));
            }
        }

        ConfigureProviderResponse {
            diagnostics,
            provider_data: self
                .provider_data
                .clone()
                .map(|data| Arc::new(data) as Arc<dyn Any + Send + Sync>),
        }
    }

    fn resources(&self) -> HashMap<String, ResourceFactory> {
        let mut factories: HashMap<String, ResourceFactory> = HashMap::new();
        factories.insert(
            "bigip_ltm_persistence_profile_universal".to_string(),
            Box::new(|| {
                Box::new(resources::PersistenceProfileUniversalResource::new()) as Box<dyn ProviderResource>
            }),
        );
        factories.insert(
            "bigip_ltm_traffic_matching_criteria".to_string(),
            Box::new(|| {
                Box::new(resources::TrafficMatchingCriteriaResource::new()) as Box<dyn ProviderResource>
            }),
        );
        factories.insert(
            "bigip_net_address_list".to_string(),
            Box::new(|| {
                Box::new(resources::AddressListResource::new()) as Box<dyn ProviderResource>
            }),
        );
        factories
    }
}
