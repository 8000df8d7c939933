use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Category record as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Opaque 20-character identifier
    pub id: String,
    /// Parent category, `None` for roots
    pub parent_id: Option<String>,
    /// Display label, unique across all categories
    pub label: String,
}

/// Derived tree node served by the category listing.
///
/// Never persisted; rebuilt on every read. `products_count` aggregates the
/// products on this node plus those on its direct parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNode {
    pub id: String,
    pub parent_id: Option<String>,
    pub label: String,
    pub children: Vec<CategoryTreeNode>,
    pub products_count: u64,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 128))]
    pub label: String,
    pub parent_id: Option<String>,
}

/// Payload for updating a category. Both fields are replaced.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 128))]
    pub label: String,
    pub parent_id: Option<String>,
}

impl Category {
    pub fn new(id: String, input: CreateCategory) -> Self {
        Self {
            id,
            parent_id: input.parent_id,
            label: input.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_with_camel_case_keys() {
        let category = Category {
            id: "c1".to_string(),
            parent_id: Some("root".to_string()),
            label: "Peripherals".to_string(),
        };

        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["parentId"], "root");
        assert!(json.get("parent_id").is_none());
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let input = CreateCategory {
            label: String::new(),
            parent_id: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_label_over_128_chars_is_rejected() {
        let input = CreateCategory {
            label: "x".repeat(129),
            parent_id: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_tree_node_serializes_products_count() {
        let node = CategoryTreeNode {
            id: "c1".to_string(),
            parent_id: None,
            label: "Hardware".to_string(),
            children: vec![],
            products_count: 3,
        };

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["productsCount"], 3);
        assert_eq!(json["children"], serde_json::json!([]));
    }
}
