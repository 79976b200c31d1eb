//! Extras resources

pub mod journal_entry;
pub mod tag;
pub mod webhook;

use crate::crud::{managed, ManagedResource};
use netbox_client::NetBoxApi;
use std::sync::Arc;

pub(crate) fn register(api: &Arc<dyn NetBoxApi>, resources: &mut Vec<Arc<dyn ManagedResource>>) {
    resources.push(managed(api, tag::TagResource));
    resources.push(managed(api, webhook::WebhookResource));
    resources.push(managed(api, journal_entry::JournalEntryResource));
}
