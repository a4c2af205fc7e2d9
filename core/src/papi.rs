//! `Papi`: one named method per operation over a [`Transport`].
//!
//! Every method validates, builds, sends and parses through
//! [`PapiClient::execute`]; the request types can also be used directly
//! with [`PapiClient::build`] and [`PapiClient::parse`] when the caller
//! performs the I/O itself.

use crate::activations::*;
use crate::active_hostnames::*;
use crate::client::PapiClient;
use crate::client_settings::*;
use crate::config::ClientConfig;
use crate::contracts::*;
use crate::cpcodes::*;
use crate::edge_hostnames::*;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::groups::*;
use crate::hostname_activations::*;
use crate::hostname_buckets::*;
use crate::http::Transport;
use crate::include_activations::*;
use crate::include_versions::*;
use crate::includes::*;
use crate::products::*;
use crate::properties::*;
use crate::property_versions::*;
use crate::rule_formats::*;
use crate::rule_trees::*;
use crate::search::*;
use crate::version_hostnames::*;

macro_rules! operations {
    ($($(#[$meta:meta])* $name:ident($request:ty) -> $response:ty;)+) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, request: &$request) -> Result<$response> {
                self.execute(request)
            }
        )+
    };
}

#[derive(Debug, Clone)]
pub struct Papi<T> {
    client: PapiClient,
    transport: T,
}

impl<T: Transport> Papi<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: PapiClient::with_config(config),
            transport,
        }
    }

    pub fn client(&self) -> &PapiClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run any endpoint, including ones without a named method.
    pub fn execute<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response> {
        self.client.execute(&self.transport, endpoint)
    }

    operations! {
        get_contracts(GetContractsRequest) -> GetContractsResponse;
        get_groups(GetGroupsRequest) -> GetGroupsResponse;
        get_products(GetProductsRequest) -> GetProductsResponse;
        get_client_settings(GetClientSettingsRequest) -> ClientSettings;
        update_client_settings(UpdateClientSettingsRequest) -> ClientSettings;
        get_rule_formats(GetRuleFormatsRequest) -> GetRuleFormatsResponse;
        search_properties(SearchRequest) -> SearchResponse;

        get_cp_codes(GetCpCodesRequest) -> GetCpCodesResponse;
        get_cp_code(GetCpCodeRequest) -> GetCpCodeResponse;
        create_cp_code(CreateCpCodeRequest) -> CreateCpCodeResponse;

        get_edge_hostnames(GetEdgeHostnamesRequest) -> GetEdgeHostnamesResponse;
        get_edge_hostname(GetEdgeHostnameRequest) -> GetEdgeHostnameResponse;
        create_edge_hostname(CreateEdgeHostnameRequest) -> CreateEdgeHostnameResponse;

        get_properties(GetPropertiesRequest) -> GetPropertiesResponse;
        get_property(GetPropertyRequest) -> GetPropertyResponse;
        create_property(CreatePropertyRequest) -> CreatePropertyResponse;
        remove_property(RemovePropertyRequest) -> RemovePropertyResponse;

        get_property_versions(GetPropertyVersionsRequest) -> GetPropertyVersionsResponse;
        get_property_version(GetPropertyVersionRequest) -> GetPropertyVersionResponse;
        get_latest_version(GetLatestVersionRequest) -> GetPropertyVersionResponse;
        create_property_version(CreatePropertyVersionRequest) -> CreatePropertyVersionResponse;
        get_available_behaviors(GetAvailableBehaviorsRequest) -> AvailableBehaviorsResponse;
        get_available_criteria(GetAvailableCriteriaRequest) -> AvailableCriteriaResponse;
        list_available_includes(ListAvailableIncludesRequest) -> ListAvailableIncludesResponse;
        list_referenced_includes(ListReferencedIncludesRequest) -> ListReferencedIncludesResponse;

        get_property_version_hostnames(GetPropertyVersionHostnamesRequest) -> GetPropertyVersionHostnamesResponse;
        update_property_version_hostnames(UpdatePropertyVersionHostnamesRequest) -> UpdatePropertyVersionHostnamesResponse;

        list_active_property_hostnames(ListActivePropertyHostnamesRequest) -> ListActivePropertyHostnamesResponse;
        get_active_property_hostnames_diff(GetActivePropertyHostnamesDiffRequest) -> GetActivePropertyHostnamesDiffResponse;
        /// Starts a hostname activation; see [`Papi::get_property_hostname_activation`].
        patch_property_hostname_bucket(PatchPropertyHostnameBucketRequest) -> PatchPropertyHostnameBucketResponse;

        list_property_hostname_activations(ListPropertyHostnameActivationsRequest) -> ListPropertyHostnameActivationsResponse;
        get_property_hostname_activation(GetPropertyHostnameActivationRequest) -> GetPropertyHostnameActivationResponse;
        /// Fails with [`Error::ActivationAlreadyAborted`] when there is nothing left to cancel.
        cancel_property_hostname_activation(CancelPropertyHostnameActivationRequest) -> CancelPropertyHostnameActivationResponse;

        create_activation(CreateActivationRequest) -> CreateActivationResponse;
        get_activations(GetActivationsRequest) -> GetActivationsResponse;
        get_activation(GetActivationRequest) -> GetActivationResponse;
        cancel_activation(CancelActivationRequest) -> CancelActivationResponse;

        list_includes(ListIncludesRequest) -> ListIncludesResponse;
        list_include_parents(ListIncludeParentsRequest) -> ListIncludeParentsResponse;
        get_include(GetIncludeRequest) -> GetIncludeResponse;
        create_include(CreateIncludeRequest) -> CreateIncludeResponse;
        delete_include(DeleteIncludeRequest) -> DeleteIncludeResponse;

        create_include_version(CreateIncludeVersionRequest) -> CreateIncludeVersionResponse;
        get_include_version(GetIncludeVersionRequest) -> GetIncludeVersionResponse;
        list_include_versions(ListIncludeVersionsRequest) -> ListIncludeVersionsResponse;
        list_include_version_available_criteria(ListIncludeVersionAvailableCriteriaRequest) -> AvailableCriteriaResponse;
        list_include_version_available_behaviors(ListIncludeVersionAvailableBehaviorsRequest) -> AvailableBehaviorsResponse;

        activate_include(ActivateIncludeRequest) -> IncludeActivationLink;
        deactivate_include(DeactivateIncludeRequest) -> IncludeActivationLink;
        cancel_include_activation(CancelIncludeActivationRequest) -> ListIncludeActivationsResponse;
        get_include_activation(GetIncludeActivationRequest) -> GetIncludeActivationResponse;
        list_include_activations(ListIncludeActivationsRequest) -> ListIncludeActivationsResponse;

        get_rule_tree(GetRuleTreeRequest) -> GetRuleTreeResponse;
        update_rule_tree(UpdateRulesRequest) -> UpdateRulesResponse;
        get_include_rule_tree(GetIncludeRuleTreeRequest) -> GetIncludeRuleTreeResponse;
        update_include_rule_tree(UpdateIncludeRuleTreeRequest) -> UpdateIncludeRuleTreeResponse;
    }

    /// Id of the property named exactly `request.name`, found by listing
    /// the properties of its contract and group.
    pub fn map_property_name_to_id(&self, request: &MapPropertyNameToIdRequest) -> Result<String> {
        request.validate().map_err(|source| Error::Validation {
            op: MapPropertyNameToIdRequest::OPERATION,
            source,
        })?;
        let properties = self.get_properties(&request.listing())?;
        request.find(&properties)
    }

    pub fn map_property_id_to_name(&self, request: &MapPropertyIdToNameRequest) -> Result<String> {
        request.validate().map_err(|source| Error::Validation {
            op: MapPropertyIdToNameRequest::OPERATION,
            source,
        })?;
        let found = self.get_property(&request.lookup())?;
        Ok(found.property.property_name)
    }
}
