//! Collaborators the engine consults but does not own.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::format::DatePicker;

/// Expands external `$ref` URIs and hyperschema `describedby` links.
///
/// Local references (`#/definitions/...`) are resolved against the root
/// schema by the engine itself and never reach this trait.
pub trait SchemaResolver: Send + Sync {
    /// Document registered under `uri`, without any `#fragment`.
    fn resolve_ref(&self, uri: &str) -> Option<Value>;

    /// Schema fragment a `describedby` link points at.
    fn resolve_link(&self, link: &Map<String, Value>) -> Option<Value> {
        let href = link.get("href")?.as_str()?;
        resolve_uri(self, href)
    }
}

/// Resolver that knows no documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl SchemaResolver for NoResolver {
    fn resolve_ref(&self, _uri: &str) -> Option<Value> {
        None
    }
}

/// Resolve `uri` through `resolver`, applying any `#/json/pointer` fragment.
pub fn resolve_uri<R: SchemaResolver + ?Sized>(resolver: &R, uri: &str) -> Option<Value> {
    let (document, fragment) = uri.split_once('#').unwrap_or((uri, ""));
    let doc = resolver.resolve_ref(document)?;
    if fragment.is_empty() {
        Some(doc)
    } else {
        doc.pointer(fragment).cloned()
    }
}

/// What an interactive editor bound to a value path looks like.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorInfo {
    pub type_name: Option<String>,
    pub format: Option<String>,
}

impl EditorInfo {
    /// Buttons and info panels hold no data and never satisfy `required`.
    pub fn is_non_data_control(&self) -> bool {
        let kind = self.format.as_deref().or(self.type_name.as_deref());
        matches!(kind, Some("button" | "info"))
    }
}

/// Looks up the editor rendering a value path.
pub trait EditorLookup: Send + Sync {
    fn lookup_editor(&self, path: &str) -> Option<EditorInfo>;
}

/// Supplies a rich date picker for a path, overriding the built-in date/time patterns.
pub trait RichFormatValidator: Send + Sync {
    fn picker_for(&self, path: &str) -> Option<Arc<dyn DatePicker>>;
}
