//! Virtual machine resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{choice_from_api, model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{NetBoxApi, VirtualMachine};
use serde::{Deserialize, Serialize};

const VM_STATUSES: &[&str] = &["offline", "active", "planned", "staged", "failed", "decommissioning"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualMachineModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub cluster: Value<String>,
    pub site: Value<String>,
    pub status: Value<String>,
    pub role: Value<String>,
    pub tenant: Value<String>,
    pub platform: Value<String>,
    pub vcpus: Value<f64>,
    pub memory: Value<i64>,
    pub disk: Value<i64>,
    pub description: Value<String>,
    pub comments: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct VirtualMachineResource;

#[async_trait::async_trait]
impl ResourceDef for VirtualMachineResource {
    type Model = VirtualMachineModel;
    type Response = VirtualMachine;

    const TYPE_NAME: &'static str = "virtual_machine";
    const ENDPOINT: &'static str = "virtualization/virtual-machines";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::name(),
            schema::reference("cluster", "Cluster (ID or name)."),
            schema::reference("site", "Site (ID, name or slug)."),
            schema::status(VM_STATUSES),
            schema::reference("role", "Device role (ID, name or slug)."),
            schema::reference("tenant", "Tenant (ID, name or slug)."),
            schema::reference("platform", "Platform (ID, name or slug)."),
            Attribute::optional("vcpus", AttributeKind::Float64, "Number of virtual CPUs."),
            Attribute::optional("memory", AttributeKind::Int64, "Memory in MB.")
                .validate_with(Validator::Range(0, i64::from(i32::MAX))),
            Attribute::optional("disk", AttributeKind::Int64, "Disk space in GB.")
                .validate_with(Validator::Range(0, i64::from(i32::MAX))),
            schema::description(),
            schema::comments(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a virtual machine in NetBox.", attributes)
    }

    fn id(&self, model: &VirtualMachineModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut VirtualMachineModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &VirtualMachineModel,
        _prior: Option<&VirtualMachineModel>,
    ) -> Result<RequestBody, ProviderError> {
        if plan.cluster.is_null() && plan.site.is_null() {
            return Err(ProviderError::validation("cluster", "either cluster or site must be set"));
        }

        let mut body = RequestBody::new();
        body.int32("memory", &plan.memory)?.int32("disk", &plan.disk)?;
        body.text("name", &plan.name)
            .text("description", &plan.description)
            .text("comments", &plan.comments);
        body.optional("status", &plan.status)?
            .nullable("vcpus", &plan.vcpus)?;
        body.reference(api, &lookup::CLUSTER, "cluster", &plan.cluster).await?;
        body.reference(api, &lookup::SITE, "site", &plan.site).await?;
        body.reference(api, &lookup::DEVICE_ROLE, "role", &plan.role).await?;
        body.reference(api, &lookup::TENANT, "tenant", &plan.tenant).await?;
        body.reference(api, &lookup::PLATFORM, "platform", &plan.platform).await?;
        Ok(body)
    }

    fn apply_response(&self, vm: &VirtualMachine, model: &mut VirtualMachineModel) {
        model.id = Value::known(vm.id.to_string());
        model.name = Value::known(vm.name.clone());
        model.cluster = reference::read_back(&model.cluster, vm.cluster.as_ref());
        model.site = reference::read_back(&model.site, vm.site.as_ref());
        model.status = choice_from_api(vm.status.as_ref());
        model.role = reference::read_back(&model.role, vm.role.as_ref());
        model.tenant = reference::read_back(&model.tenant, vm.tenant.as_ref());
        model.platform = reference::read_back(&model.platform, vm.platform.as_ref());
        model.vcpus = vm.vcpus.into();
        model.memory = vm.memory.into();
        model.disk = vm.disk.into();
        model.description = string_from_api(&model.description, &vm.description);
        model.comments = string_from_api(&model.comments, &vm.comments);
    }

    fn metadata<'a>(&self, model: &'a mut VirtualMachineModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_in_cluster_with_resources() {
        let mock = mock();
        mock.insert("virtualization/clusters", json!({"name": "pve-1"}));
        mock.insert("dcim/device-roles", json!({"name": "Web", "slug": "web"}));
        let exec = executor(&mock, VirtualMachineResource);

        let created = exec
            .create(VirtualMachineModel {
                name: known("web-vm-01"),
                cluster: known("pve-1"),
                role: known("web"),
                status: Value::Unknown,
                vcpus: Value::Known(2.5),
                memory: Value::Known(4096),
                ..VirtualMachineModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.cluster, known("pve-1"));
        assert_eq!(created.role, known("web"));
        assert_eq!(created.vcpus, Value::Known(2.5));
        assert_eq!(created.memory, Value::Known(4096));
        assert_eq!(created.disk, Value::Null);
        assert_eq!(created.status, known("active"));
    }

    #[tokio::test]
    async fn test_memory_overflow_is_local() {
        let mock = mock();
        let exec = executor(&mock, VirtualMachineResource);
        let err = exec
            .create(VirtualMachineModel {
                name: known("big"),
                site: known("hq"),
                memory: Value::Known(i64::from(i32::MAX) + 1),
                ..VirtualMachineModel::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::IntegerOverflow { .. }));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_needs_cluster_or_site() {
        let mock = mock();
        let exec = executor(&mock, VirtualMachineResource);
        let err = exec
            .create(VirtualMachineModel {
                name: known("orphan"),
                ..VirtualMachineModel::default()
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("either cluster or site"));
    }
}
