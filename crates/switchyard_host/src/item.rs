use std::sync::Arc;

use switchyard_project::path::SystemPathBuf;

/// A node in the host's hierarchical test tree (file, class, function).
///
/// The tree is owned by the host; this engine only reads the id, the file
/// location, and the children. A node with no children is a leaf, i.e. an
/// executable test case.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TestItem {
    id: String,
    uri: Option<SystemPathBuf>,
    children: Vec<Arc<TestItem>>,
}

impl TestItem {
    #[must_use]
    pub fn leaf(id: impl Into<String>, uri: Option<SystemPathBuf>) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            uri,
            children: Vec::new(),
        })
    }

    #[must_use]
    pub fn node(
        id: impl Into<String>,
        uri: Option<SystemPathBuf>,
        children: Vec<Arc<Self>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            uri,
            children,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn uri(&self) -> Option<&SystemPathBuf> {
        self.uri.as_ref()
    }

    #[must_use]
    pub fn children(&self) -> &[Arc<Self>] {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
