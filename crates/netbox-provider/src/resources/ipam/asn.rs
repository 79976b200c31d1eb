//! ASN resource

use crate::crud::{ConflictPolicy, ResourceDef};
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{Asn, NetBoxApi};
use serde::{Deserialize, Serialize};

/// 32-bit ASNs (RFC 6793); NetBox stores them in a 64-bit column
const MAX_ASN: i64 = 4_294_967_295;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsnModel {
    pub id: Value<String>,
    pub asn: Value<i64>,
    pub rir: Value<String>,
    pub tenant: Value<String>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct AsnResource;

#[async_trait::async_trait]
impl ResourceDef for AsnResource {
    type Model = AsnModel;
    type Response = Asn;

    const TYPE_NAME: &'static str = "asn";
    const ENDPOINT: &'static str = "ipam/asns";
    const CONFLICT_POLICY: ConflictPolicy = ConflictPolicy::ImportHint;

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::required("asn", AttributeKind::Int64, "16- or 32-bit autonomous system number.")
                .validate_with(Validator::Range(1, MAX_ASN)),
            schema::required_reference("rir", "RIR responsible for this ASN (ID, name or slug)."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages an autonomous system number in NetBox.", attributes)
    }

    fn id(&self, model: &AsnModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut AsnModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &AsnModel,
        _prior: Option<&AsnModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.optional("asn", &plan.asn)?;
        body.text("description", &plan.description)
            .text("comments", &plan.comments);
        body.required_reference(api, &lookup::RIR, "rir", &plan.rir).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        Ok(body)
    }

    fn apply_response(&self, asn: &Asn, model: &mut AsnModel) {
        model.id = Value::known(asn.id.to_string());
        model.asn = Value::Known(asn.asn);
        model.rir = reference::read_back(&model.rir, asn.rir.as_ref());
        model.tenant = reference::read_back(&model.tenant, asn.tenant.as_ref());
        model.description = string_from_api(&model.description, &asn.description);
        model.comments = string_from_api(&model.comments, &asn.comments);
    }

    fn metadata<'a>(&self, model: &'a mut AsnModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }

    fn unique_key(&self, model: &AsnModel) -> Option<(&'static str, String)> {
        model.asn.as_known().map(|asn| ("asn", asn.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_four_byte_asn_is_not_narrowed() {
        let mock = mock();
        mock.insert("ipam/rirs", json!({"name": "ARIN", "slug": "arin"}));
        let exec = executor(&mock, AsnResource);

        let created = exec
            .create(AsnModel {
                asn: Value::Known(4_200_000_001),
                rir: known("ARIN"),
                ..AsnModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.asn, Value::Known(4_200_000_001));
        assert_eq!(created.rir, known("ARIN"));
    }
}
