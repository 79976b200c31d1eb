//! Contact group resource

use crate::lookup::{self, LookupTarget};
use crate::resources::organizational::{Hierarchical, HierarchicalKind, OrganizationalKind};

#[derive(Debug)]
pub struct ContactGroupKind;

impl OrganizationalKind for ContactGroupKind {
    const TYPE_NAME: &'static str = "contact_group";
    const ENDPOINT: &'static str = "tenancy/contact-groups";
    const DESCRIPTION: &'static str = "Manages a contact group in NetBox. Contact groups can be nested.";
}

impl HierarchicalKind for ContactGroupKind {
    const PARENT: LookupTarget = lookup::CONTACT_GROUP;
}

pub type ContactGroupResource = Hierarchical<ContactGroupKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::organizational::HierarchicalModel;
    use crate::test_utils::{executor, known, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_parent_slug_is_resolved() {
        let mock = mock();
        let parent = mock.insert("tenancy/contact-groups", json!({"name": "Vendors", "slug": "vendors"}));
        let exec = executor(&mock, ContactGroupResource::default());

        let created = exec
            .create(HierarchicalModel {
                name: known("Hardware Vendors"),
                slug: known("hardware-vendors"),
                parent: known("vendors"),
                ..HierarchicalModel::default()
            })
            .await
            .unwrap();

        let id = created.id.as_str().unwrap().parse().unwrap();
        assert_eq!(mock.get("tenancy/contact-groups", id).unwrap()["parent"]["id"], json!(parent));

        let imported = exec.read(exec.import_state(&id.to_string()).unwrap()).await.unwrap().unwrap();
        assert_eq!(imported.parent, known("Vendors"));
    }
}
