/// Owned element tree of a loaded report. Only elements are kept; text
/// content is flattened into `text`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<ReportNode>,
}

impl ReportNode {
    pub fn new(name: impl Into<String>) -> Self {
        ReportNode {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: ReportNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    pub(crate) fn from_xml(node: roxmltree::Node<'_, '_>) -> Self {
        let mut out = ReportNode::new(node.tag_name().name());
        for attr in node.attributes() {
            out.attributes
                .push((attr.name().to_string(), attr.value().to_string()));
        }
        for child in node.children() {
            if child.is_element() {
                out.children.push(ReportNode::from_xml(child));
            } else if child.is_text() {
                out.text.push_str(child.text().unwrap_or_default());
            }
        }
        out
    }
}
