//! Address list resource (`/mgmt/tm/net/address-list`)

use crate::api::BigIpApi;
use crate::mapper::AddressListModel;
use crate::provider_data::BigIpProviderData;
use crate::resources::{
    client, configure_provider_data, import_absent, import_seed, missing_identity,
    remote_failure, schema_response, validate_against, Fetched,
};
use crate::validators::f5_name_with_directory;
use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::plan_modifier::{RequiresReplace, UseStateForUnknown};
use tfplug::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceSchemaRequest, ResourceSchemaResponse,
    ResourceWithConfigure, ResourceWithImportState, UpdateResourceRequest, UpdateResourceResponse,
    ValidateResourceConfigRequest, ValidateResourceConfigResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::Diagnostic;

#[derive(Default)]
pub struct AddressListResource {
    provider_data: Option<BigIpProviderData>,
}

impl AddressListResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_schema() -> Result<Schema, regex::Error> {
        Ok(SchemaBuilder::new()
            .version(0)
            .description("Manages an address list on a BIG-IP")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Identity of the address list, equal to its name")
                    .computed()
                    .plan_modifier(Box::new(UseStateForUnknown))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("Name of the address list, in /Partition/Name form")
                    .required()
                    .validator(Box::new(f5_name_with_directory()?))
                    .plan_modifier(Box::new(RequiresReplace))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("description", AttributeType::String)
                    .description("User defined description")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    "addresses",
                    AttributeType::List(Box::new(AttributeType::String)),
                )
                .description("Addresses or networks with mask, e.g. 10.0.0.0/24")
                .optional()
                .build(),
            )
            .build())
    }

    async fn refresh(
        client: &dyn BigIpApi,
        name: &str,
        mut model: AddressListModel,
    ) -> Fetched<AddressListModel> {
        tracing::info!("Fetching address list {}", name);

        Fetched::from_result(
            client.get_address_list(name).await,
            "read address list",
            name,
        )
        .map(|list| {
            model.apply_response(&list);
            model.id = Some(name.to_string());
            model.name = Some(name.to_string());
            model
        })
    }
}

#[async_trait]
impl Resource for AddressListResource {
    fn type_name(&self) -> &str {
        "bigip_net_address_list"
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ResourceSchemaRequest,
    ) -> ResourceSchemaResponse {
        schema_response(Self::build_schema())
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse {
        ValidateResourceConfigResponse {
            diagnostics: validate_against(Self::build_schema(), &request.config),
        }
    }

    async fn create(
        &self,
        _ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return CreateResourceResponse::failed(vec![diag]),
        };

        let model = AddressListModel::from_dynamic(&request.planned_state);
        if let Err(diag) = model.validate_required() {
            return CreateResourceResponse::failed(vec![diag]);
        }
        let name = model.name.clone().unwrap_or_default();

        tracing::info!("Creating address list {}", name);
        if let Err(e) = client.create_address_list(&model.to_request()).await {
            return CreateResourceResponse::failed(vec![remote_failure(
                "create address list",
                &name,
                &e,
            )]);
        }

        let created = AddressListModel {
            id: Some(name.clone()),
            ..model.clone()
        }
        .to_dynamic();
        let incomplete = |diag: Diagnostic| CreateResourceResponse::incomplete(created, vec![diag]);

        match Self::refresh(client.as_ref(), &name, model).await {
            Fetched::Found(model) => CreateResourceResponse::created(model.to_dynamic()),
            Fetched::Absent => incomplete(Diagnostic::error(
                "Address list disappeared after create",
                format!("{} was created but could not be read back", name),
            )),
            Fetched::Failed(diag) => incomplete(diag),
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return ReadResourceResponse::failed(request.current_state, vec![diag]),
        };

        let model = AddressListModel::from_dynamic(&request.current_state);
        let Some(name) = model.identity() else {
            return ReadResourceResponse::failed(request.current_state, vec![missing_identity()]);
        };

        match Self::refresh(client.as_ref(), &name, model).await {
            Fetched::Found(model) => ReadResourceResponse::found(model.to_dynamic()),
            Fetched::Absent => {
                tracing::warn!("Address list {} not found, removing from state", name);
                ReadResourceResponse::removed()
            }
            Fetched::Failed(diag) => ReadResourceResponse::failed(request.current_state, vec![diag]),
        }
    }

    async fn update(
        &self,
        _ctx: Context,
        request: UpdateResourceRequest,
    ) -> UpdateResourceResponse {
        let failed = |diagnostics: Vec<Diagnostic>| {
            UpdateResourceResponse::failed(request.prior_state.clone(), diagnostics)
        };

        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return failed(vec![diag]),
        };

        let Some(name) = AddressListModel::from_dynamic(&request.prior_state).identity() else {
            return failed(vec![missing_identity()]);
        };
        let model = AddressListModel::from_dynamic(&request.planned_state);

        tracing::info!("Updating address list {}", name);
        if let Err(e) = client
            .modify_address_list(&name, &model.to_request())
            .await
        {
            return failed(vec![remote_failure("update address list", &name, &e)]);
        }

        match Self::refresh(client.as_ref(), &name, model).await {
            Fetched::Found(model) => UpdateResourceResponse::updated(model.to_dynamic()),
            Fetched::Absent => failed(vec![Diagnostic::error(
                "Address list disappeared after update",
                format!("{} was modified but could not be read back", name),
            )]),
            Fetched::Failed(diag) => failed(vec![diag]),
        }
    }

    async fn delete(
        &self,
        _ctx: Context,
        request: DeleteResourceRequest,
    ) -> DeleteResourceResponse {
        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return DeleteResourceResponse::failed(vec![diag]),
        };

        let Some(name) = AddressListModel::from_dynamic(&request.prior_state).identity() else {
            return DeleteResourceResponse::failed(vec![missing_identity()]);
        };

        tracing::info!("Deleting address list {}", name);
        match client.delete_address_list(&name).await {
            Ok(()) => DeleteResourceResponse::default(),
            Err(e) => DeleteResourceResponse::failed(vec![remote_failure(
                "delete address list",
                &name,
                &e,
            )]),
        }
    }
}

#[async_trait]
impl ResourceWithConfigure for AddressListResource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
        let (provider_data, diagnostics) = configure_provider_data(request.provider_data);
        self.provider_data = provider_data;
        ConfigureResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for AddressListResource {
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return ImportResourceStateResponse::failed(vec![diag]),
        };

        let seed = match import_seed(&ctx, &request) {
            Ok(seed) => seed,
            Err(diagnostics) => return ImportResourceStateResponse::failed(diagnostics),
        };

        let model = AddressListModel::from_dynamic(&seed);
        match Self::refresh(client.as_ref(), &request.id, model).await {
            Fetched::Found(model) => {
                ImportResourceStateResponse::imported(self.type_name(), model.to_dynamic())
            }
            Fetched::Absent => ImportResourceStateResponse::failed(vec![import_absent(&request.id)]),
            Fetched::Failed(diag) => ImportResourceStateResponse::failed(vec![diag]),
        }
    }
}

#[cfg(test)]
#[path = "./resource_address_list_test.rs"]
mod resource_address_list_test;
