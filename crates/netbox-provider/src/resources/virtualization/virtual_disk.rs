//! Virtual disk resource

use crate::crud::ResourceDef;
use crate::error::ProviderError;
use crate::lookup;
use crate::mapping::{model_id, string_from_api, RequestBody};
use crate::metadata::Metadata;
use crate::reference;
use crate::schema::{self, Attribute, AttributeKind, Schema, Validator};
use crate::value::Value;
use netbox_client::{NetBoxApi, VirtualDisk};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualDiskModel {
    pub id: Value<String>,
    pub virtual_machine: Value<String>,
    pub name: Value<String>,
    pub size: Value<i64>,
    pub description: Value<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

#[derive(Debug, Default)]
pub struct VirtualDiskResource;

#[async_trait::async_trait]
impl ResourceDef for VirtualDiskResource {
    type Model = VirtualDiskModel;
    type Response = VirtualDisk;

    const TYPE_NAME: &'static str = "virtual_disk";
    const ENDPOINT: &'static str = "virtualization/virtual-disks";

    fn schema(&self) -> Schema {
        let mut attributes = vec![
            schema::id(),
            schema::required_reference("virtual_machine", "Virtual machine (ID or name)."),
            schema::name(),
            Attribute::required("size", AttributeKind::Int64, "Disk size in the unit NetBox is configured for.")
                .validate_with(Validator::Range(0, i64::from(i32::MAX))),
            schema::description(),
        ];
        attributes.extend(schema::metadata());
        Schema::new("Manages a virtual machine disk in NetBox.", attributes)
    }

    fn id(&self, model: &VirtualDiskModel) -> Result<i32, ProviderError> {
        model_id(&model.id)
    }

    fn set_id(&self, model: &mut VirtualDiskModel, id: i32) {
        model.id = Value::known(id.to_string());
    }

    async fn build_request(
        &self,
        api: &dyn NetBoxApi,
        plan: &VirtualDiskModel,
        _prior: Option<&VirtualDiskModel>,
    ) -> Result<RequestBody, ProviderError> {
        let mut body = RequestBody::new();
        body.int32("size", &plan.size)?;
        body.text("name", &plan.name).text("description", &plan.description);
        body.required_reference(api, &lookup::VIRTUAL_MACHINE, "virtual_machine", &plan.virtual_machine)
            .await?;
        Ok(body)
    }

    fn apply_response(&self, disk: &VirtualDisk, model: &mut VirtualDiskModel) {
        model.id = Value::known(disk.id.to_string());
        model.virtual_machine = reference::read_back(&model.virtual_machine, disk.virtual_machine.as_ref());
        model.name = Value::known(disk.name.clone());
        model.size = Value::Known(disk.size);
        model.description = string_from_api(&model.description, &disk.description);
    }

    fn metadata<'a>(&self, model: &'a mut VirtualDiskModel) -> Option<&'a mut Metadata> {
        Some(&mut model.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_disk_lifecycle() {
        let mock = mock();
        let vm = mock.insert("virtualization/virtual-machines", json!({"name": "db-01"}));
        let exec = executor(&mock, VirtualDiskResource);

        let created = exec
            .create(VirtualDiskModel {
                virtual_machine: known(&vm.to_string()),
                name: known("root"),
                size: Value::Known(40),
                ..VirtualDiskModel::default()
            })
            .await
            .unwrap();
        assert_eq!(created.virtual_machine, known(&vm.to_string()));
        assert_eq!(created.size, Value::Known(40));

        let mut grown = created.clone();
        grown.size = Value::Known(80);
        let updated = exec.update(grown, created).await.unwrap();
        assert_eq!(updated.size, Value::Known(80));

        exec.delete(updated.clone()).await.unwrap();
        assert!(exec.read(updated).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_oversized_disk_is_rejected() {
        let mock = mock();
        mock.insert("virtualization/virtual-machines", json!({"name": "db-01"}));
        let exec = executor(&mock, VirtualDiskResource);
        let err = exec
            .create(VirtualDiskModel {
                virtual_machine: known("db-01"),
                name: known("data"),
                size: Value::Known(i64::from(i32::MAX) + 1),
                ..VirtualDiskModel::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_local());
        assert!(VirtualDiskResource
            .schema()
            .validate(&json!({"virtual_machine": "db-01", "name": "data", "size": -1}))
            .is_err());
    }
}
