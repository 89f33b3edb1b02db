use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::db::{queries::categories, Category};

use super::ServiceResult;

/// Category names keyed by id, serialized as a JSON object.
pub type CategoryMap = BTreeMap<i64, String>;

pub struct CategoryListing {
    pub categories: CategoryMap,
    pub total_categories: usize,
}

pub async fn list_categories(pool: &SqlitePool) -> ServiceResult<CategoryListing> {
    let categories: CategoryMap = categories::get_all_categories(pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect();
    Ok(CategoryListing {
        total_categories: categories.len(),
        categories,
    })
}

/// Fails with `NotFound` when no category has this id.
pub async fn get_category(pool: &SqlitePool, id: i64) -> ServiceResult<Category> {
    Ok(categories::get_category(pool, id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::service::ServiceError;

    #[tokio::test]
    async fn lists_seeded_categories() {
        let pool = test_pool().await;
        let listing = list_categories(&pool).await.unwrap();
        assert_eq!(listing.total_categories, 6);
        assert_eq!(listing.categories[&1], "Science");
        assert_eq!(listing.categories[&6], "Sports");
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let pool = test_pool().await;
        assert!(matches!(
            get_category(&pool, 1000).await,
            Err(ServiceError::NotFound)
        ));
    }
}
