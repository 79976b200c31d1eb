//! Contact role resource

use crate::resources::organizational::{Organizational, OrganizationalKind};

#[derive(Debug)]
pub struct ContactRoleKind;

impl OrganizationalKind for ContactRoleKind {
    const TYPE_NAME: &'static str = "contact_role";
    const ENDPOINT: &'static str = "tenancy/contact-roles";
    const DESCRIPTION: &'static str = "Manages a contact role (e.g. Owner, Technical) in NetBox.";
}

pub type ContactRoleResource = Organizational<ContactRoleKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::resources::organizational::OrganizationalModel;
    use crate::test_utils::{executor, known, mock};

    #[tokio::test]
    async fn test_duplicate_slug_names_existing_role() {
        let mock = mock();
        let exec = executor(&mock, ContactRoleResource::default());
        let plan = OrganizationalModel {
            name: known("Owner"),
            slug: known("owner"),
            ..OrganizationalModel::default()
        };

        let first = exec.create(plan.clone()).await.unwrap();
        let read = exec.read(first.clone()).await.unwrap().unwrap();
        assert_eq!(read, first);

        let err = exec.create(plan).await.unwrap_err();
        assert!(matches!(err, ProviderError::Duplicate { .. }));
        assert!(err.to_string().contains("netbox_contact_role"), "{err}");
    }
}
