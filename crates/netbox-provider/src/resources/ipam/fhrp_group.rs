//! FHRP group resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::mapping::{choice_from_api, model_id, preserve_write_only, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::schema::{self, Attribute, AttributeKind, Schema};
use crate::value::Value;
use netbox_client::{FhrpGroup, NetBoxApi};
use serde::{Deserialize, Serialize};

const PROTOCOLS: &[&str] = &["vrrp2", "vrrp3", "carp", "clusterxl", "hsrp", "glbp", "other"];
const AUTH_TYPES: &[&str] = &["plaintext", "md5"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FhrpGroupModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub protocol: Value<String>,
    pub group_id: Value<i64>,
    pub auth_type: Value<String>,
    pub auth_key: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct FhrpGroupResource;

#[async_trait::async_trait]
impl ResourceDef for FhrpGroupResource {
    type Model = FhrpGroupModel;
    type Response = FhrpGroup;

    const TYPE_NAME: &'static str = "fhrp_group";
    const ENDPOINT: &'static str = "ipam/fhrp-groups";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::optional("name", AttributeKind::String, "Group name."),
            Attribute::required("protocol", AttributeKind::String, "Redundancy protocol.").one_of(PROTOCOLS),
            Attribute::required("group_id", AttributeKind::Int64, "Protocol group identifier."),
            Attribute::optional("auth_type", AttributeKind::String, "Authentication type.").one_of(AUTH_TYPES),
            Attribute::optional("auth_key", AttributeKind::String, "Authentication key. Never returned by NetBox.")
                .sensitive(),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a first-hop redundancy protocol (FHRP) group in NetBox.", attributes)
    }

    fn id(&self, model: &FhrpGroupModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut FhrpGroupModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        _api: &dyn NetBoxApi,
        plan: &FhrpGroupModel,
        _prior: Option<&FhrpGroupModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.int32("group_id", &plan.group_id)?;
        body.text("name", &plan.name)
            .text("protocol", &plan.protocol)
            .text("auth_type", &plan.auth_type)
            .text("auth_key", &plan.auth_key)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        Ok(body)
    }

    fn apply_response(&self, group: &FhrpGroup, model: &mut FhrpGroupModel) {
        model.id = Value::known(group.id.to_string());
        model.name = string_from_api(&model.name, &group.name);
        model.protocol = choice_from_api(group.protocol.as_ref());
        model.group_id = Value::Known(group.group_id);
        model.auth_type = choice_from_api(group.auth_type.as_ref());
        model.auth_key = preserve_write_only(&model.auth_key);
        model.description = string_from_api(&model.description, &group.description);
        model.comments = string_from_api(&model.comments, &group.comments);
    }

    fn metadata<'a>(&self, model: &'a mut FhrpGroupModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}
