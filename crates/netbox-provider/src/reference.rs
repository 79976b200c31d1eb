//! References to other NetBox objects
//!
//! Users may refer to a related object by numeric ID, name or slug. The API
//! always answers with a nested brief object; state must keep whatever form
//! the user wrote as long as it still identifies the same object, otherwise
//! every plan would show a spurious `"hq" -> "5"` diff.

use crate::value::Value;
use netbox_client::NestedObject;

/// A reference as written in configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    raw: String,
}

impl Reference {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Numeric ID when the user referenced the object by ID
    pub fn as_id(&self) -> Option<i32> {
        self.raw.trim().parse::<i32>().ok().filter(|id| *id > 0)
    }

    /// Whether this reference still identifies `object`
    pub fn identifies(&self, object: &NestedObject) -> bool {
        if let Some(id) = self.as_id() {
            return id == object.id;
        }
        let eq_ci = |candidate: &Option<String>| {
            candidate
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(&self.raw))
        };
        let eq = |candidate: &Option<String>| candidate.as_deref() == Some(self.raw.as_str());
        eq_ci(&object.name)
            || eq_ci(&object.slug)
            || eq(&object.model)
            || eq(&object.address)
            || eq(&object.cid)
            || object.vid.is_some_and(|vid| vid.to_string() == self.raw)
    }
}

/// Reconcile a reference attribute with the object NetBox reports
///
/// - no related object: null
/// - the configured value still identifies the object: keep it verbatim
/// - configured by ID but the object changed: the new ID
/// - anything else (import, null, unknown, stale name or slug): the API name,
///   falling back to the slug and then the ID
pub fn read_back(current: &Value<String>, api: Option<&NestedObject>) -> Value<String> {
    let Some(object) = api else {
        return Value::Null;
    };

    match current.as_str().map(Reference::new) {
        Some(reference) if reference.identifies(object) => Value::known(reference.raw()),
        Some(reference) if reference.as_id().is_some() => Value::known(object.id.to_string()),
        _ => Value::known(
            object
                .label()
                .or(object.slug.as_deref())
                .map_or_else(|| object.id.to_string(), str::to_string),
        ),
    }
}
