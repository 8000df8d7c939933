use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use validator::Validate;

use domain_products::repository::ProductRepository;
use domain_products::service::ProductService;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryTreeNode, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Service layer for Category business logic.
///
/// Holds the product service so tree nodes can carry their aggregated
/// product counts.
pub struct CategoryService<R: CategoryRepository, P: ProductRepository> {
    repository: Arc<R>,
    products: ProductService<P>,
}

impl<R: CategoryRepository, P: ProductRepository> Clone for CategoryService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            products: self.products.clone(),
        }
    }
}

impl<R: CategoryRepository, P: ProductRepository> CategoryService<R, P> {
    pub fn new(repository: R, products: ProductService<P>) -> Self {
        Self {
            repository: Arc::new(repository),
            products,
        }
    }

    /// Assemble the full category tree, one node per root.
    ///
    /// Children are resolved depth-first in store fetch order. A fetch fault
    /// on a branch resolves that branch to an empty children list, and a
    /// fault on the root fetch yields an empty tree; the operation never
    /// fails on store faults at a fetch step. Product-count faults do
    /// propagate.
    pub async fn get_all_categories(&self) -> CategoryResult<Vec<CategoryTreeNode>> {
        let roots = match self.repository.list_by_parent(None).await {
            Ok(roots) => roots,
            Err(e) => {
                tracing::warn!("Failed to fetch root categories: {}", e);
                return Ok(Vec::new());
            }
        };

        let mut visited = HashSet::new();
        let mut tree = Vec::with_capacity(roots.len());
        for root in roots {
            tree.push(self.build_tree_node(root, &mut visited).await?);
        }

        Ok(tree)
    }

    /// Resolve one category into a tree node with children and product count.
    ///
    /// The visited set breaks cycles that slipped into the store out of band
    /// (the write path only prevents direct two-node cycles): a category
    /// seen before resolves with no children.
    fn build_tree_node<'a>(
        &'a self,
        category: Category,
        visited: &'a mut HashSet<String>,
    ) -> Pin<Box<dyn Future<Output = CategoryResult<CategoryTreeNode>> + Send + 'a>> {
        Box::pin(async move {
            let products_count = self
                .products
                .count_products_for_category(&category.id, category.parent_id.as_deref())
                .await
                .map_err(|e| CategoryError::Internal(e.to_string()))?;

            let first_visit = visited.insert(category.id.clone());

            let mut children = Vec::new();
            if first_visit {
                match self.repository.list_by_parent(Some(&category.id)).await {
                    Ok(kids) => {
                        for kid in kids {
                            children.push(self.build_tree_node(kid, visited).await?);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            category_id = %category.id,
                            "Failed to fetch children, resolving branch as empty: {}",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!(
                    category_id = %category.id,
                    "Cycle detected in category tree, truncating branch"
                );
            }

            Ok(CategoryTreeNode {
                id: category.id,
                parent_id: category.parent_id,
                label: category.label,
                children,
                products_count,
            })
        })
    }

    /// Get a category by ID
    pub async fn get_category(&self, id: &str) -> CategoryResult<Category> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CategoryError::NotFound(id.to_string()))
    }

    /// Create a new category with a generated ID.
    ///
    /// Fails on a duplicate label anywhere in the tree and on a missing
    /// parent when one is given.
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        if self.repository.find_by_label(&input.label).await?.is_some() {
            return Err(CategoryError::DuplicateLabel(input.label));
        }

        if let Some(parent_id) = &input.parent_id {
            self.repository
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| CategoryError::ParentNotFound(parent_id.clone()))?;
        }

        let category = Category::new(shortid::generate(), input);
        self.repository.insert(category).await
    }

    /// Update a category, replacing its label and parent reference.
    ///
    /// Keeping the current label is allowed; taking another category's label
    /// is a conflict. Re-parenting rejects the category itself, a missing
    /// parent, and a parent whose own parent is this category.
    pub async fn update_category(
        &self,
        id: &str,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CategoryError::NotFound(id.to_string()))?;

        if input.label != existing.label
            && self.repository.find_by_label(&input.label).await?.is_some()
        {
            return Err(CategoryError::DuplicateLabel(input.label));
        }

        if let Some(parent_id) = &input.parent_id {
            if parent_id == id {
                return Err(CategoryError::SelfParent(id.to_string()));
            }

            let parent = self
                .repository
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| CategoryError::ParentNotFound(parent_id.clone()))?;

            if parent.parent_id.as_deref() == Some(id) {
                return Err(CategoryError::CircularParent(parent_id.clone()));
            }
        }

        self.repository
            .update(id, input)
            .await?
            .ok_or_else(|| CategoryError::NotFound(id.to_string()))
    }

    /// Delete a category.
    ///
    /// Children and referencing products are orphaned, not cascaded.
    pub async fn delete_category(&self, id: &str) -> CategoryResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(CategoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryCategoryRepository, MockCategoryRepository};
    use domain_products::models::CreateProduct;
    use domain_products::repository::InMemoryProductRepository;

    fn empty_products() -> ProductService<InMemoryProductRepository> {
        ProductService::new(InMemoryProductRepository::new())
    }

    fn in_memory_service(
    ) -> CategoryService<InMemoryCategoryRepository, InMemoryProductRepository> {
        CategoryService::new(InMemoryCategoryRepository::new(), empty_products())
    }

    fn create(label: &str, parent_id: Option<&str>) -> CreateCategory {
        CreateCategory {
            label: label.to_string(),
            parent_id: parent_id.map(str::to_string),
        }
    }

    fn update(label: &str, parent_id: Option<&str>) -> UpdateCategory {
        UpdateCategory {
            label: label.to_string(),
            parent_id: parent_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_duplicate_label_creation_conflicts() {
        let service = in_memory_service();

        service.create_category(create("Hardware", None)).await.unwrap();
        let result = service.create_category(create("Hardware", None)).await;

        assert!(matches!(result, Err(CategoryError::DuplicateLabel(_))));
    }

    #[tokio::test]
    async fn test_duplicate_label_check_is_case_sensitive() {
        let service = in_memory_service();

        service.create_category(create("Hardware", None)).await.unwrap();
        let result = service.create_category(create("hardware", None)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_with_missing_parent_is_not_found() {
        let service = in_memory_service();

        let result = service
            .create_category(create("Child", Some("no-such-parent")))
            .await;

        assert!(matches!(result, Err(CategoryError::ParentNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_with_missing_parent_is_not_found() {
        let service = in_memory_service();

        let cat = service.create_category(create("Solo", None)).await.unwrap();
        let result = service
            .update_category(&cat.id, update("Solo", Some("no-such-parent")))
            .await;

        assert!(matches!(result, Err(CategoryError::ParentNotFound(_))));
    }

    #[tokio::test]
    async fn test_self_parent_update_conflicts() {
        let service = in_memory_service();

        let cat = service.create_category(create("Loop", None)).await.unwrap();
        let result = service
            .update_category(&cat.id, update("Loop", Some(&cat.id)))
            .await;

        assert!(matches!(result, Err(CategoryError::SelfParent(_))));
    }

    #[tokio::test]
    async fn test_direct_two_node_cycle_conflicts() {
        let service = in_memory_service();

        let a = service.create_category(create("A", None)).await.unwrap();
        let b = service
            .create_category(create("B", Some(&a.id)))
            .await
            .unwrap();

        // A -> B while B -> A already holds
        let result = service
            .update_category(&a.id, update("A", Some(&b.id)))
            .await;

        assert!(matches!(result, Err(CategoryError::CircularParent(_))));
    }

    #[tokio::test]
    async fn test_keeping_current_label_does_not_conflict() {
        let service = in_memory_service();

        let cat = service.create_category(create("Stable", None)).await.unwrap();
        let updated = service
            .update_category(&cat.id, update("Stable", None))
            .await
            .unwrap();

        assert_eq!(updated.label, "Stable");
    }

    #[tokio::test]
    async fn test_taking_another_categorys_label_conflicts() {
        let service = in_memory_service();

        service.create_category(create("Taken", None)).await.unwrap();
        let cat = service.create_category(create("Free", None)).await.unwrap();

        let result = service.update_category(&cat.id, update("Taken", None)).await;

        assert!(matches!(result, Err(CategoryError::DuplicateLabel(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_not_found() {
        let service = in_memory_service();

        let result = service.delete_category("missing").await;

        assert!(matches!(result, Err(CategoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_orphans_children() {
        let service = in_memory_service();

        let root = service.create_category(create("Root", None)).await.unwrap();
        let child = service
            .create_category(create("Child", Some(&root.id)))
            .await
            .unwrap();

        service.delete_category(&root.id).await.unwrap();

        // Child survives, still pointing at the deleted parent
        let orphan = service.get_category(&child.id).await.unwrap();
        assert_eq!(orphan.parent_id.as_deref(), Some(root.id.as_str()));

        // The orphan no longer appears in the tree since its parent is gone
        let tree = service.get_all_categories().await.unwrap();
        assert!(tree.is_empty());
    }

    #[tokio::test]
    async fn test_tree_shape_and_product_counts() {
        let products_repo = InMemoryProductRepository::new();
        let products = ProductService::new(products_repo);
        let service = CategoryService::new(InMemoryCategoryRepository::new(), products.clone());

        let root_a = service.create_category(create("Root A", None)).await.unwrap();
        let root_b = service.create_category(create("Root B", None)).await.unwrap();
        let child = service
            .create_category(create("Child", Some(&root_a.id)))
            .await
            .unwrap();
        let grandchild = service
            .create_category(create("Grandchild", Some(&child.id)))
            .await
            .unwrap();

        // Two products on the root, one on the child
        for label in ["p1", "p2"] {
            products
                .create_product(CreateProduct {
                    label: label.to_string(),
                    category_id: Some(root_a.id.clone()),
                })
                .await
                .unwrap();
        }
        products
            .create_product(CreateProduct {
                label: "p3".to_string(),
                category_id: Some(child.id.clone()),
            })
            .await
            .unwrap();

        let tree = service.get_all_categories().await.unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].label, "Root A");
        assert_eq!(tree[1].label, "Root B");

        // Roots have no parent so their count is just their own products
        assert_eq!(tree[0].products_count, 2);
        assert_eq!(tree[1].products_count, 0);

        // Child counts its own product plus the parent's two
        let child_node = &tree[0].children[0];
        assert_eq!(child_node.id, child.id);
        assert_eq!(child_node.products_count, 3);

        // Grandchild has no products of its own, inherits the child's one
        let grandchild_node = &child_node.children[0];
        assert_eq!(grandchild_node.id, grandchild.id);
        assert_eq!(grandchild_node.products_count, 1);
        assert!(grandchild_node.children.is_empty());
    }

    #[tokio::test]
    async fn test_root_fetch_fault_yields_empty_tree() {
        let mut mock_repo = MockCategoryRepository::new();

        mock_repo
            .expect_list_by_parent()
            .returning(|_| Err(CategoryError::Internal("store down".to_string())));

        let service = CategoryService::new(mock_repo, empty_products());
        let tree = service.get_all_categories().await.unwrap();

        assert!(tree.is_empty());
    }

    #[tokio::test]
    async fn test_child_fetch_fault_resolves_branch_as_empty() {
        let mut mock_repo = MockCategoryRepository::new();

        mock_repo
            .expect_list_by_parent()
            .returning(|parent_id| match parent_id {
                None => Ok(vec![Category {
                    id: "root".to_string(),
                    parent_id: None,
                    label: "Root".to_string(),
                }]),
                Some(_) => Err(CategoryError::Internal("store hiccup".to_string())),
            });

        let service = CategoryService::new(mock_repo, empty_products());
        let tree = service.get_all_categories().await.unwrap();

        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_band_cycle_is_truncated() {
        // A corrupted store row reusing the root's id and parenting itself
        // under it would recurse forever without the visited guard
        let repo = InMemoryCategoryRepository::new();
        repo.insert(Category {
            id: "r".to_string(),
            parent_id: None,
            label: "Root".to_string(),
        })
        .await
        .unwrap();
        repo.insert(Category {
            id: "r".to_string(),
            parent_id: Some("r".to_string()),
            label: "Root again".to_string(),
        })
        .await
        .unwrap();

        let service = CategoryService::new(repo, empty_products());

        let tree = service.get_all_categories().await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
        assert!(tree[0].children[0].children.is_empty());
    }
}
