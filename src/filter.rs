//! Metadata scoping for search and delete operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Optional scoping fields combined with logical AND by the service.
///
/// Hierarchy: tenant -> project -> knowledge base -> document. Every field is
/// optional; an absent field imposes no constraint, and a filter with no
/// fields set is equivalent to no filter at all (it is omitted from request
/// bodies entirely).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Free-form additional constraints, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<HashMap<String, serde_json::Value>>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field is set; such a filter carries no constraint.
    pub fn is_empty(&self) -> bool {
        self.tenant_id.is_none()
            && self.project_id.is_none()
            && self.kb_id.is_none()
            && self.doc_id.is_none()
            && self.document_type.is_none()
            && self.user_ids.is_none()
            && self.file_name.is_none()
            && self.custom.is_none()
    }

    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_kb_id(mut self, kb_id: impl Into<String>) -> Self {
        self.kb_id = Some(kb_id.into());
        self
    }

    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Reduce to `None` when empty, for `Option`-typed request fields.
    pub(crate) fn non_empty(&self) -> Option<&Self> {
        if self.is_empty() { None } else { Some(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_empty() {
        assert!(MetadataFilter::new().is_empty());
    }

    #[test]
    fn test_any_field_makes_filter_non_empty() {
        assert!(!MetadataFilter::new().with_tenant_id("t").is_empty());
        assert!(!MetadataFilter::new().with_file_name("a.pdf").is_empty());
    }

    #[test]
    fn test_unset_fields_are_not_serialized() {
        let filter = MetadataFilter::new().with_tenant_id("tenant-1").with_kb_id("kb-9");
        let value = serde_json::to_value(&filter).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["tenant_id"], "tenant-1");
        assert_eq!(object["kb_id"], "kb-9");
        assert!(!object.contains_key("project_id"));
        assert!(!object.contains_key("doc_id"));
    }

    #[test]
    fn test_empty_filter_serializes_to_empty_object() {
        let value = serde_json::to_value(MetadataFilter::new()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_non_empty_reduces_empty_filter_to_none() {
        assert!(MetadataFilter::new().non_empty().is_none());
        let filter = MetadataFilter::new().with_project_id("p");
        assert!(filter.non_empty().is_some());
    }
}
