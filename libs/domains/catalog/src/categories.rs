//! Category writes and the category tree.

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, CategoryTree, CreateCategory, UpdateCategory};
use crate::tables::category;
use sea_orm::ConnectionTrait;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub(crate) async fn create_category<C: ConnectionTrait>(
    conn: &C,
    input: &CreateCategory,
) -> CatalogResult<Category> {
    if let Some(parent_id) = input.parent_id {
        require_parent(conn, parent_id).await?;
    }
    category::insert(conn, input).await
}

pub(crate) async fn update_category<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    input: &UpdateCategory,
) -> CatalogResult<Category> {
    let existing = category::find_live(conn, id).await?;

    if let Some(Some(parent_id)) = input.parent_id {
        if parent_id == id {
            return Err(CatalogError::InvalidProductCategory);
        }
        let live = category::find_all_live(conn).await?;
        check_reparent(&live, id, parent_id)?;
    }

    category::update(conn, existing, input).await
}

pub(crate) async fn list_tree<C: ConnectionTrait>(conn: &C) -> CatalogResult<Vec<CategoryTree>> {
    let categories = category::find_all_live(conn).await?;
    Ok(build_tree(categories))
}

async fn require_parent<C: ConnectionTrait>(conn: &C, parent_id: Uuid) -> CatalogResult<()> {
    category::find_live(conn, parent_id)
        .await
        .map(|_| ())
        .map_err(|err| match err {
            CatalogError::RecordNotFound => CatalogError::ParentProductCategoryNotFound,
            other => other,
        })
}

/// `parent_id` must be live and must not sit below `id`.
fn check_reparent(live: &[Category], id: Uuid, parent_id: Uuid) -> CatalogResult<()> {
    let parents: HashMap<Uuid, Option<Uuid>> = live.iter().map(|c| (c.id, c.parent_id)).collect();
    if !parents.contains_key(&parent_id) {
        return Err(CatalogError::ParentProductCategoryNotFound);
    }

    let mut seen = HashSet::new();
    let mut cursor = Some(parent_id);
    while let Some(current) = cursor {
        if current == id {
            return Err(CatalogError::InvalidProductCategory);
        }
        if !seen.insert(current) {
            break;
        }
        cursor = parents.get(&current).copied().flatten();
    }
    Ok(())
}

/// Nest categories under their parents.
///
/// Categories whose parent is not in `categories` (deleted or missing) become
/// roots. Siblings keep the input order.
pub(crate) fn build_tree(categories: Vec<Category>) -> Vec<CategoryTree> {
    let known: HashSet<Uuid> = categories.iter().map(|c| c.id).collect();
    let mut children: HashMap<Uuid, Vec<Category>> = HashMap::new();
    let mut roots = Vec::new();

    for category in categories {
        match category.parent_id {
            Some(parent_id) if known.contains(&parent_id) && parent_id != category.id => {
                children.entry(parent_id).or_default().push(category)
            }
            _ => roots.push(category),
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children))
        .collect()
}

fn attach(category: Category, children: &mut HashMap<Uuid, Vec<Category>>) -> CategoryTree {
    let nested = children
        .remove(&category.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach(child, children))
        .collect();

    CategoryTree {
        id: category.id,
        name: category.name,
        parent_id: category.parent_id,
        created_at: category.created_at,
        updated_at: category.updated_at,
        children: nested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::product_category;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn category(name: &str, parent_id: Option<Uuid>) -> Category {
        Category {
            id: Uuid::now_v7(),
            name: name.to_string(),
            parent_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_tree_nests_children() {
        let apparel = category("Apparel", None);
        let shoes = category("Shoes", Some(apparel.id));
        let trail = category("Trail", Some(shoes.id));
        let home = category("Home", None);

        let tree = build_tree(vec![apparel.clone(), shoes.clone(), trail.clone(), home.clone()]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, apparel.id);
        assert_eq!(tree[0].children[0].id, shoes.id);
        assert_eq!(tree[0].children[0].children[0].id, trail.id);
        assert_eq!(tree[1].id, home.id);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_orphans_are_listed_at_root() {
        let orphan = category("Orphan", Some(Uuid::now_v7()));

        let tree = build_tree(vec![orphan.clone()]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, orphan.id);
        assert_eq!(tree[0].parent_id, orphan.parent_id);
    }

    #[test]
    fn test_reparent_checks() {
        let apparel = category("Apparel", None);
        let shoes = category("Shoes", Some(apparel.id));
        let trail = category("Trail", Some(shoes.id));
        let live = vec![apparel.clone(), shoes.clone(), trail.clone()];

        assert!(check_reparent(&live, trail.id, apparel.id).is_ok());
        assert!(matches!(
            check_reparent(&live, apparel.id, trail.id),
            Err(CatalogError::InvalidProductCategory)
        ));
        assert!(matches!(
            check_reparent(&live, shoes.id, Uuid::now_v7()),
            Err(CatalogError::ParentProductCategoryNotFound)
        ));
    }

    #[tokio::test]
    async fn test_missing_parent_on_create() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<product_category::Model>::new()])
            .into_connection();
        let input = CreateCategory {
            name: "Shoes".to_string(),
            parent_id: Some(Uuid::now_v7()),
        };

        let result = create_category(&db, &input).await;

        assert!(matches!(result, Err(CatalogError::ParentProductCategoryNotFound)));
    }

    #[tokio::test]
    async fn test_self_parent_is_invalid() {
        let id = Uuid::now_v7();
        let now = Utc::now().into();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product_category::Model {
                id,
                name: "Shoes".to_string(),
                parent_id: None,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            }]])
            .into_connection();
        let input = UpdateCategory {
            name: None,
            parent_id: Some(Some(id)),
        };

        let result = update_category(&db, id, &input).await;

        assert!(matches!(result, Err(CatalogError::InvalidProductCategory)));
    }
}
