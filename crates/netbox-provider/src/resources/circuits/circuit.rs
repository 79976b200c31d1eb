//! Circuit resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, optional_string_from_api, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use chrono::NaiveDate;
use netbox_client::{Circuit, NetBoxApi};
use serde::{Deserialize, Serialize};

const CIRCUIT_STATUSES: &[&str] = &[
    "planned",
    "provisioning",
    "active",
    "offline",
    "deprovisioning",
    "decommissioned",
];

fn parse_date(attribute: &str, value: &Value<String>) -> Result<Option<NaiveDate>, ProviderError> {
    value
        .as_str()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                ProviderError::validation(attribute, format!("{:?} is not a YYYY-MM-DD date: {}", raw, e))
            })
        })
        .transpose()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitModel {
    pub id: Value<String>,
    pub cid: Value<String>,
    pub provider: Value<String>,
    #[serde(rename = "type")]
    pub circuit_type: Value<String>,
    pub status: Value<String>,
    pub tenant: Value<String>,
    pub install_date: Value<String>,
    pub termination_date: Value<String>,
    pub commit_rate: Value<i64>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct CircuitResource;

#[async_trait::async_trait]
impl ResourceDef for CircuitResource {
    type Model = CircuitModel;
    type Response = Circuit;

    const TYPE_NAME: &'static str = "circuit";
    const ENDPOINT: &'static str = "circuits/circuits";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            Attribute::required("cid", AttributeKind::String, "Circuit ID, unique per provider."),
            schema::required_reference("provider", "Circuit provider (ID, name or slug)."),
            schema::required_reference("type", "Circuit type (ID, name or slug)."),
            schema::status(CIRCUIT_STATUSES),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            Attribute::optional("install_date", AttributeKind::String, "Installation date, YYYY-MM-DD.")
                .validate_with(Validator::Date),
            Attribute::optional("termination_date", AttributeKind::String, "Termination date, YYYY-MM-DD.")
                .validate_with(Validator::Date),
            Attribute::optional("commit_rate", AttributeKind::Int64, "Committed rate in Kbps.")
                .validate_with(Validator::Range(0, i64::from(i32::MAX))),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a circuit in NetBox.", attributes)
    }

    fn id(&self, model: &CircuitModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut CircuitModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &CircuitModel,
        _prior: Option<&CircuitModel>,
    ) -> Result<RequestBody, ProviderError> {
        let installed = parse_date("install_date", &plan.install_date)?;
        let terminated = parse_date("termination_date", &plan.termination_date)?;
        if let (Some(installed), Some(terminated)) = (installed, terminated) {
            if terminated < installed {
                return Err(ProviderError::validation(
                    "termination_date",
                    "termination date is before the install date",
                ));
            }
        }

        let mut body = RequestBody::new();
        body.int32("commit_rate", &plan.commit_rate)?;
        body.text("cid", &plan.cid)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.optional("status", &plan.status)?
            .nullable("install_date", &plan.install_date)?
            .nullable("termination_date", &plan.termination_date)?;
        body.required_reference(api, &lookup::CIRCUIT_PROVIDER, "provider", &plan.provider)
            .await?;
        body.required_reference(api, &lookup::CIRCUIT_TYPE, "type", &plan.circuit_type)
            .await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        Ok(body)
    }

    fn apply_response(&self, circuit: &Circuit, model: &mut CircuitModel) {
        model.id = Value::known(circuit.id.to_string());
        model.cid = Value::known(circuit.cid.clone());
        model.provider = reference::read_back(&model.provider, circuit.provider.as_ref());
        model.circuit_type = reference::read_back(&model.circuit_type, circuit.circuit_type.as_ref());
        model.status = choice_from_api(circuit.status.as_ref());
        model.tenant = reference::read_back(&model.tenant, circuit.tenant.as_ref());
        model.install_date = optional_string_from_api(&model.install_date, circuit.install_date.as_deref());
        model.termination_date = optional_string_from_api(&model.termination_date, circuit.termination_date.as_deref());
        model.commit_rate = circuit.commit_rate.into();
        model.description = string_from_api(&model.description, &circuit.description);
        model.comments = string_from_api(&model.comments, &circuit.comments);
    }

    fn metadata<'a>(&self, model: &'a mut CircuitModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    fn seed(mock: &netbox_client::MockNetBoxClient) {
        mock.insert("circuits/providers", json!({"name": "Level3", "slug": "level3"}));
        mock.insert("circuits/circuit-types", json!({"name": "Transit", "slug": "transit"}));
    }

    #[tokio::test]
    async fn test_create_and_update_commit_rate() {
        let mock = mock();
        seed(&mock);
        let exec = executor(&mock, CircuitResource);

        let created = exec
            .create(CircuitModel {
                cid: known("L3-0001"),
                provider: known("Level3"),
                circuit_type: known("transit"),
                status: Value::Unknown,
                install_date: known("2024-03-01"),
                commit_rate: Value::Known(10_000),
                ..CircuitModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.provider, known("Level3"));
        assert_eq!(created.circuit_type, known("transit"));
        assert_eq!(created.status, known("active"));
        assert_eq!(created.install_date, known("2024-03-01"));
        assert_eq!(created.termination_date, Value::Null);

        let mut plan = created.clone();
        plan.commit_rate = Value::Null;
        let updated = exec.update(plan, created).await.unwrap();
        assert_eq!(updated.commit_rate, Value::Null);
        let body = mock.requests().pop().unwrap().body.unwrap();
        assert!(body["commit_rate"].is_null());
    }

    #[tokio::test]
    async fn test_termination_before_install_is_rejected() {
        let mock = mock();
        seed(&mock);
        let exec = executor(&mock, CircuitResource);
        let err = exec
            .create(CircuitModel {
                cid: known("L3-0002"),
                provider: known("level3"),
                circuit_type: known("transit"),
                install_date: known("2024-03-01"),
                termination_date: known("2023-12-31"),
                ..CircuitModel::default()
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("termination_date"));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_date_is_rejected() {
        let mock = mock();
        let exec = executor(&mock, CircuitResource);
        let err = exec
            .create(CircuitModel {
                cid: known("L3-0003"),
                provider: known("level3"),
                circuit_type: known("transit"),
                install_date: known("03/01/2024"),
                ..CircuitModel::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation { .. }));
    }
}
