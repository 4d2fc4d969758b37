use serde::Serialize;
use serde_json::Value;

/// Scalar string previews longer than this are truncated.
const PREVIEW_LIMIT: usize = 100;

/// JSON type tag shown in the tree's "Type" column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl NodeKind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Boolean,
            Value::Null => NodeKind::Null,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Object => "Object",
            NodeKind::Array => "Array",
            NodeKind::String => "String",
            NodeKind::Number => "Number",
            NodeKind::Boolean => "Boolean",
            NodeKind::Null => "Null",
        }
    }
}

/// One entry in the rendered tree: a key (or index) plus a value preview.
///
/// The tree is plain data; expand/collapse is presentation state owned by
/// the rendering widget. The whole tree is discarded and rebuilt on every
/// formatting action.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    pub label: String,
    pub preview: String,
    pub kind: NodeKind,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn from_value(label: &str, value: &Value) -> Self {
        let mut children = Vec::new();
        match value {
            Value::Object(map) => {
                for (key, val) in map.iter() {
                    children.push(TreeNode::from_value(key, val));
                }
            }
            Value::Array(items) => {
                for (idx, val) in items.iter().enumerate() {
                    children.push(TreeNode::from_value(&format!("[{}]", idx), val));
                }
            }
            _ => {}
        }

        TreeNode {
            label: label.to_string(),
            preview: format_value_preview(value),
            kind: NodeKind::of(value),
            children,
        }
    }
}

/// Materializes the display tree for a parsed document.
///
/// The root is synthetic, labeled by the top-level shape of the value.
/// Traversal is depth-first pre-order; scalars terminate with zero
/// children. JSON values are acyclic, so no cycle detection is needed.
pub fn build_tree(value: &Value) -> TreeNode {
    let root_label = match value {
        Value::Object(_) => "JSON Object",
        Value::Array(_) => "JSON Array",
        _ => "JSON Value",
    };
    TreeNode::from_value(root_label, value)
}

/// Formats a JSON value as a preview string for display in tree nodes.
///
/// Containers preview as an item count. Strings are quoted; strings over
/// 100 characters are cut to the first 97 plus an ellipsis, still inside
/// the quotes. Counts are characters, not bytes.
pub fn format_value_preview(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > PREVIEW_LIMIT {
                let truncated: String = s.chars().take(PREVIEW_LIMIT - 3).collect();
                format!("\"{}...\"", truncated)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(items) => format!("{} items", items.len()),
        Value::Object(map) => format!("{} items", map.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_tree_for_simple_object() {
        let value = serde_json::json!({"name": "value", "items": [1, 2]});
        let root = build_tree(&value);
        assert_eq!(root.label, "JSON Object");
        assert_eq!(root.preview, "2 items");
        assert_eq!(root.kind, NodeKind::Object);
        assert_eq!(root.children.len(), 2);

        let items = root.children.iter().find(|child| child.label == "items");
        assert!(items.is_some());
        let items_children = &items.unwrap().children;
        assert_eq!(items_children.len(), 2);
        assert_eq!(items_children[0].label, "[0]");
        assert_eq!(items_children[0].kind, NodeKind::Number);
    }

    #[test]
    fn build_tree_for_array_root() {
        let value = serde_json::json!([true, null, "x"]);
        let root = build_tree(&value);
        assert_eq!(root.label, "JSON Array");
        assert_eq!(root.preview, "3 items");
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[0].label, "[0]");
        assert_eq!(root.children[0].preview, "true");
        assert_eq!(root.children[1].preview, "null");
        assert_eq!(root.children[2].preview, "\"x\"");
    }

    #[test]
    fn build_tree_for_scalar_root() {
        let root = build_tree(&serde_json::json!(42));
        assert_eq!(root.label, "JSON Value");
        assert_eq!(root.preview, "42");
        assert!(root.children.is_empty());
    }

    #[test]
    fn child_counts_match_containers() {
        let value = serde_json::json!({
            "obj": {"a": 1, "b": 2, "c": 3},
            "arr": [1, 2, 3, 4],
            "scalar": "s"
        });
        let root = build_tree(&value);
        let obj = root.children.iter().find(|c| c.label == "obj").unwrap();
        assert_eq!(obj.children.len(), 3);
        let arr = root.children.iter().find(|c| c.label == "arr").unwrap();
        assert_eq!(arr.children.len(), 4);
        let scalar = root.children.iter().find(|c| c.label == "scalar").unwrap();
        assert!(scalar.children.is_empty());
    }

    #[test]
    fn children_follow_insertion_order() {
        let value: Value = serde_json::from_str(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let root = build_tree(&value);
        let labels: Vec<&str> = root.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_preview_scalars() {
        assert_eq!(format_value_preview(&Value::Null), "null");
        assert_eq!(format_value_preview(&serde_json::json!(true)), "true");
        assert_eq!(format_value_preview(&serde_json::json!(false)), "false");
        assert_eq!(format_value_preview(&serde_json::json!(3.14)), "3.14");
        assert_eq!(format_value_preview(&serde_json::json!("hi")), "\"hi\"");
    }

    #[test]
    fn test_preview_long_string_truncated() {
        let long = "a".repeat(150);
        let preview = format_value_preview(&serde_json::json!(long));
        // quote + 97 chars + "..." + quote
        assert_eq!(preview.len(), 102);
        assert!(preview.starts_with('"'));
        assert!(preview.ends_with("...\""));
    }

    #[test]
    fn test_preview_exactly_100_chars_kept() {
        let s = "b".repeat(100);
        let preview = format_value_preview(&serde_json::json!(s.clone()));
        assert_eq!(preview, format!("\"{}\"", s));
    }

    #[test]
    fn test_preview_truncates_by_characters_not_bytes() {
        let long: String = "界".repeat(120);
        let preview = format_value_preview(&serde_json::json!(long));
        let inner: Vec<char> = preview.chars().collect();
        // quote + 97 chars + "..." + quote = 102 characters
        assert_eq!(inner.len(), 102);
    }

    #[test]
    fn test_deterministic_rebuild() {
        let value = serde_json::json!({"a": [1, {"b": "c"}], "d": null});
        let first = serde_json::to_string(&build_tree(&value)).unwrap();
        let second = serde_json::to_string(&build_tree(&value)).unwrap();
        assert_eq!(first, second);
    }
}
