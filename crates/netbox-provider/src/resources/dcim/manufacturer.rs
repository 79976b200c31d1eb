//! Manufacturer resource

use crate::resources::organizational::{Organizational, OrganizationalKind};

#[derive(Debug)]
pub struct ManufacturerKind;

impl OrganizationalKind for ManufacturerKind {
    const TYPE_NAME: &'static str = "manufacturer";
    const ENDPOINT: &'static str = "dcim/manufacturers";
    const DESCRIPTION: &'static str = "Manages a hardware manufacturer in NetBox.";
}

pub type ManufacturerResource = Organizational<ManufacturerKind>;
