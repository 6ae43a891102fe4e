#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::test_helpers::{FakeBigIp, Op};
    use crate::api::{AddressList, AddressListAddress};
    use std::sync::Arc;
    use tfplug::types::{AttributePath, ClientCapabilities, Dynamic, DynamicValue};

    async fn configured(fake: &Arc<FakeBigIp>) -> AddressListResource {
        let mut resource = AddressListResource::new();
        let provider_data = BigIpProviderData {
            client: fake.clone(),
        };
        let response = resource
            .configure(
                Context::new(),
                ConfigureResourceRequest {
                    provider_data: Some(Arc::new(provider_data)),
                },
            )
            .await;
        assert!(response.diagnostics.is_empty());
        resource
    }

    fn plan(name: &str, addresses: &[&str]) -> DynamicValue {
        AddressListModel {
            id: None,
            name: Some(name.to_string()),
            description: Some("backends".to_string()),
            addresses: Some(addresses.iter().map(|a| a.to_string()).collect()),
        }
        .to_dynamic()
    }

    fn stored(name: &str, addresses: &[&str]) -> AddressList {
        AddressList {
            name: Some(name.to_string()),
            description: None,
            addresses: Some(
                addresses
                    .iter()
                    .map(|a| AddressListAddress {
                        name: a.to_string(),
                    })
                    .collect(),
            ),
        }
    }

    async fn create(
        resource: &AddressListResource,
        planned_state: DynamicValue,
    ) -> CreateResourceResponse {
        resource
            .create(
                Context::new(),
                CreateResourceRequest {
                    type_name: "bigip_net_address_list".to_string(),
                    config: planned_state.clone(),
                    planned_state,
                },
            )
            .await
    }

    async fn read(
        resource: &AddressListResource,
        current_state: DynamicValue,
    ) -> ReadResourceResponse {
        resource
            .read(
                Context::new(),
                ReadResourceRequest {
                    type_name: "bigip_net_address_list".to_string(),
                    current_state,
                    client_capabilities: ClientCapabilities::default(),
                },
            )
            .await
    }

    fn addresses(state: &DynamicValue) -> Vec<Dynamic> {
        state.get_list(&AttributePath::new("addresses")).unwrap()
    }

    #[test]
    fn test_resource_type_name() {
        let resource = AddressListResource::new();
        assert_eq!(resource.type_name(), "bigip_net_address_list");
    }

    #[tokio::test]
    async fn test_resource_schema() {
        let resource = AddressListResource::new();
        let response = resource.schema(Context::new(), ResourceSchemaRequest).await;

        assert!(response.diagnostics.is_empty());
        let name = response.schema.attribute("name").unwrap();
        assert!(name.required);
        assert_eq!(name.validators.len(), 1);
        assert_eq!(name.plan_modifiers.len(), 1);

        let id = response.schema.attribute("id").unwrap();
        assert!(id.computed && !id.optional);
        assert!(matches!(
            response.schema.attribute("addresses").unwrap().r#type,
            AttributeType::List(_)
        ));
    }

    #[tokio::test]
    async fn test_validate_names() {
        let resource = AddressListResource::new();

        for (name, valid) in [
            ("/Common/al1", true),
            ("/Common/app.app/al1", true),
            ("al1", false),
            ("/Common/a/b/al1", false),
        ] {
            let response = resource
                .validate(
                    Context::new(),
                    ValidateResourceConfigRequest {
                        type_name: "bigip_net_address_list".to_string(),
                        config: plan(name, &[]),
                        client_capabilities: ClientCapabilities::default(),
                    },
                )
                .await;
            assert_eq!(response.diagnostics.is_empty(), valid, "{}", name);
        }
    }

    #[tokio::test]
    async fn test_create_reads_back_addresses_in_order() {
        let fake = Arc::new(FakeBigIp::new());
        let resource = configured(&fake).await;

        let response = create(&resource, plan("/Common/al1", &["10.0.0.1/32", "10.0.0.2/32"])).await;

        assert!(response.diagnostics.is_empty());
        let state = response.new_state;
        assert_eq!(state.get_string(&AttributePath::new("id")).unwrap(), "/Common/al1");
        assert_eq!(
            addresses(&state),
            vec![
                Dynamic::String("10.0.0.1/32".to_string()),
                Dynamic::String("10.0.0.2/32".to_string()),
            ]
        );
        assert_eq!(fake.calls(), vec!["create /Common/al1", "get /Common/al1"]);

        let refreshed = read(&resource, state.clone()).await;
        assert!(refreshed.diagnostics.is_empty());
        assert_eq!(refreshed.new_state, Some(state));
    }

    #[tokio::test]
    async fn test_create_failure_returns_null_state() {
        let fake = Arc::new(FakeBigIp::new());
        fake.fail(Op::Create, 409, "already exists");
        let resource = configured(&fake).await;

        let response = create(&resource, plan("/Common/al1", &["10.0.0.1/32"])).await;

        assert!(response.new_state.is_null());
        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(response.diagnostics[0].summary, "Failed to create address list");
        assert!(response.diagnostics[0].detail.contains("/Common/al1"));
        assert!(response.diagnostics[0].detail.contains("already exists"));
    }

    #[tokio::test]
    async fn test_create_keeps_identity_when_list_vanishes_before_read_back() {
        let fake = Arc::new(FakeBigIp::new());
        fake.fail(Op::Get, 404, "The requested object was not found.");
        let resource = configured(&fake).await;

        let response = create(&resource, plan("/Common/al1", &["10.0.0.2/32", "10.0.0.1/32"])).await;

        assert!(fake.address_lists.lock().unwrap().contains_key("/Common/al1"));
        assert_eq!(
            response.new_state.get_string(&AttributePath::new("id")).unwrap(),
            "/Common/al1"
        );
        assert_eq!(
            addresses(&response.new_state),
            vec![
                Dynamic::String("10.0.0.2/32".to_string()),
                Dynamic::String("10.0.0.1/32".to_string()),
            ]
        );
        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(response.diagnostics[0].summary, "Address list disappeared after create");
    }

    #[tokio::test]
    async fn test_create_without_provider_data() {
        let resource = AddressListResource::new();

        let response = create(&resource, plan("/Common/al1", &[])).await;

        assert!(response.new_state.is_null());
        assert_eq!(response.diagnostics[0].summary, "Provider not configured");
    }

    #[tokio::test]
    async fn test_read_drops_state_when_absent() {
        let fake = Arc::new(FakeBigIp::new());
        let resource = configured(&fake).await;

        let mut state = plan("/Common/gone", &[]);
        state
            .set_string(&AttributePath::new("id"), "/Common/gone".to_string())
            .unwrap();

        let response = read(&resource, state).await;
        assert!(response.new_state.is_none());
        assert!(response.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_read_error_keeps_current_state() {
        let fake = Arc::new(FakeBigIp::new());
        fake.fail(Op::Get, 500, "internal error");
        let resource = configured(&fake).await;

        let state = plan("/Common/al1", &["10.0.0.1/32"]);
        let response = read(&resource, state.clone()).await;

        assert_eq!(response.new_state, Some(state));
        assert_eq!(response.diagnostics[0].summary, "Failed to read address list");
    }

    #[tokio::test]
    async fn test_read_detects_drift() {
        let fake = Arc::new(FakeBigIp::new());
        fake.address_lists
            .lock()
            .unwrap()
            .insert("/Common/al1".to_string(), stored("/Common/al1", &["10.9.9.9/32"]));
        let resource = configured(&fake).await;

        let response = read(&resource, plan("/Common/al1", &["10.0.0.1/32"])).await;

        let state = response.new_state.unwrap();
        assert_eq!(addresses(&state), vec![Dynamic::String("10.9.9.9/32".to_string())]);
        assert_eq!(state.get(&AttributePath::new("description")), Some(&Dynamic::Null));
    }

    #[tokio::test]
    async fn test_update_sends_full_list_then_reads() {
        let fake = Arc::new(FakeBigIp::new());
        fake.address_lists
            .lock()
            .unwrap()
            .insert("/Common/al1".to_string(), stored("/Common/al1", &["10.0.0.1/32"]));
        let resource = configured(&fake).await;

        let prior_state = plan("/Common/al1", &["10.0.0.1/32"]);
        let planned_state = plan("/Common/al1", &["10.0.0.3/32", "10.0.0.1/32"]);
        let response = resource
            .update(
                Context::new(),
                UpdateResourceRequest {
                    type_name: "bigip_net_address_list".to_string(),
                    prior_state,
                    config: planned_state.clone(),
                    planned_state,
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        assert_eq!(
            addresses(&response.new_state),
            vec![
                Dynamic::String("10.0.0.3/32".to_string()),
                Dynamic::String("10.0.0.1/32".to_string()),
            ]
        );
        assert_eq!(fake.calls(), vec!["modify /Common/al1", "get /Common/al1"]);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_prior_state() {
        let fake = Arc::new(FakeBigIp::new());
        fake.fail(Op::Modify, 400, "invalid address");
        let resource = configured(&fake).await;

        let prior_state = plan("/Common/al1", &["10.0.0.1/32"]);
        let planned_state = plan("/Common/al1", &["bogus"]);
        let response = resource
            .update(
                Context::new(),
                UpdateResourceRequest {
                    type_name: "bigip_net_address_list".to_string(),
                    prior_state: prior_state.clone(),
                    config: planned_state.clone(),
                    planned_state,
                },
            )
            .await;

        assert_eq!(response.new_state, prior_state);
        assert_eq!(response.diagnostics[0].summary, "Failed to update address list");
        assert_eq!(fake.calls(), vec!["modify /Common/al1"]);
    }

    #[tokio::test]
    async fn test_delete_then_read_drops_state() {
        let fake = Arc::new(FakeBigIp::new());
        let resource = configured(&fake).await;
        let state = create(&resource, plan("/Common/al1", &["10.0.0.1/32"])).await.new_state;

        let response = resource
            .delete(
                Context::new(),
                DeleteResourceRequest {
                    type_name: "bigip_net_address_list".to_string(),
                    prior_state: state.clone(),
                },
            )
            .await;
        assert!(response.diagnostics.is_empty());
        assert!(fake.address_lists.lock().unwrap().is_empty());

        assert!(read(&resource, state).await.new_state.is_none());
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let fake = Arc::new(FakeBigIp::new());
        fake.fail(Op::Delete, 400, "address list in use by /Common/tmc1");
        let resource = configured(&fake).await;

        let response = resource
            .delete(
                Context::new(),
                DeleteResourceRequest {
                    type_name: "bigip_net_address_list".to_string(),
                    prior_state: plan("/Common/al1", &[]),
                },
            )
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(response.diagnostics[0].summary, "Failed to delete address list");
    }

    #[tokio::test]
    async fn test_delete_of_missing_object_is_an_error() {
        let fake = Arc::new(FakeBigIp::new());
        let resource = configured(&fake).await;

        let response = resource
            .delete(
                Context::new(),
                DeleteResourceRequest {
                    type_name: "bigip_net_address_list".to_string(),
                    prior_state: plan("/Common/al1", &[]),
                },
            )
            .await;

        assert_eq!(fake.calls(), vec!["delete /Common/al1"]);
        assert_eq!(response.diagnostics.len(), 1);
        assert!(response.diagnostics[0].is_error());
        assert_eq!(response.diagnostics[0].summary, "Failed to delete address list");
        assert!(response.diagnostics[0].detail.contains("was not found"));
    }

    #[tokio::test]
    async fn test_import_existing_list() {
        let fake = Arc::new(FakeBigIp::new());
        fake.address_lists.lock().unwrap().insert(
            "/Common/al1".to_string(),
            stored("/Common/al1", &["10.0.0.1/32", "10.0.0.2/32"]),
        );
        let resource = configured(&fake).await;

        let response = resource
            .import_state(
                Context::new(),
                ImportResourceStateRequest {
                    type_name: "bigip_net_address_list".to_string(),
                    id: "/Common/al1".to_string(),
                    client_capabilities: ClientCapabilities::default(),
                },
            )
            .await;

        assert!(response.diagnostics.is_empty());
        let imported = &response.imported_resources[0];
        assert_eq!(imported.type_name, "bigip_net_address_list");
        assert_eq!(
            imported.state.get_string(&AttributePath::new("name")).unwrap(),
            "/Common/al1"
        );
        assert_eq!(addresses(&imported.state).len(), 2);
    }

    #[tokio::test]
    async fn test_import_missing_list() {
        let fake = Arc::new(FakeBigIp::new());
        let resource = configured(&fake).await;

        let response = resource
            .import_state(
                Context::new(),
                ImportResourceStateRequest {
                    type_name: "bigip_net_address_list".to_string(),
                    id: "/Common/nope".to_string(),
                    client_capabilities: ClientCapabilities::default(),
                },
            )
            .await;

        assert!(response.imported_resources.is_empty());
        assert_eq!(
            response.diagnostics[0].summary,
            "Cannot import non-existent remote object"
        );
    }
}
