use std::sync::Arc;

use serde::Deserialize;

use super::entities::review;
use super::repository::ReviewRepository;
use crate::modules::catalog::repository::ProductRepository;
use crate::shared::audit;
use crate::shared::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
}

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    products: Arc<dyn ProductRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { reviews, products }
    }

    pub async fn list_reviews(&self, product_id: i32) -> AppResult<Vec<review::Model>> {
        self.products
            .find_by_id(product_id)
            .await?
            .ok_or(AppError::NotFound)?;
        self.reviews.find_by_product(product_id).await
    }

    pub async fn create_review(
        &self,
        actor: &str,
        user_id: i32,
        product_id: i32,
        request: ReviewRequest,
    ) -> AppResult<review::Model> {
        validate_rating(request.rating)?;
        self.products
            .find_by_id(product_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if self
            .reviews
            .find_by_product_and_user(product_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Product already reviewed by this user".to_string(),
            ));
        }

        let stamp = audit::stamp(actor);
        self.reviews
            .insert(review::Model {
                id: 0,
                product_id,
                user_id,
                rating: request.rating,
                comment: request.comment,
                created_at: stamp.at,
                created_by: stamp.by.clone(),
                updated_at: stamp.at,
                updated_by: stamp.by,
                deleted: false,
            })
            .await
    }

    /// Only the author may update; someone else's review reads as missing.
    pub async fn update_review(
        &self,
        actor: &str,
        user_id: i32,
        review_id: i32,
        request: ReviewRequest,
    ) -> AppResult<review::Model> {
        validate_rating(request.rating)?;
        let mut review = self.owned(user_id, review_id).await?;

        let stamp = audit::stamp(actor);
        review.rating = request.rating;
        review.comment = request.comment;
        review.updated_at = stamp.at;
        review.updated_by = stamp.by;
        self.reviews.update(review).await
    }

    pub async fn delete_review(&self, actor: &str, user_id: i32, review_id: i32) -> AppResult<()> {
        let mut review = self.owned(user_id, review_id).await?;

        let stamp = audit::stamp(actor);
        review.deleted = true;
        review.updated_at = stamp.at;
        review.updated_by = stamp.by;
        self.reviews.update(review).await?;
        Ok(())
    }

    async fn owned(&self, user_id: i32, review_id: i32) -> AppResult<review::Model> {
        self.reviews
            .find_by_id(review_id)
            .await?
            .filter(|r| r.user_id == user_id)
            .ok_or(AppError::NotFound)
    }
}

fn validate_rating(rating: i32) -> AppResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::infra::persistence::InMemoryProductRepository;
    use crate::modules::orders::service::tests::seed_product;
    use crate::modules::reviews::infra::persistence::InMemoryReviewRepository;
    use crate::shared::infra::memory::MemoryStore;
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<MemoryStore>, ReviewService) {
        let store = Arc::new(MemoryStore::new());
        let service = ReviewService::new(
            Arc::new(InMemoryReviewRepository::new(store.clone())),
            Arc::new(InMemoryProductRepository::new(store.clone())),
        );
        (store, service)
    }

    fn request(rating: i32) -> ReviewRequest {
        ReviewRequest {
            rating,
            comment: Some("solid".to_string()),
        }
    }

    #[tokio::test]
    async fn create_and_list_reviews() {
        let (store, svc) = setup();
        let product_id = seed_product(&store, dec!(3.00), 5);

        let review = svc
            .create_review("u1", 1, product_id, request(4))
            .await
            .unwrap();
        assert_eq!(review.rating, 4);

        let listed = svc.list_reviews(product_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, review.id);
    }

    #[tokio::test]
    async fn rating_out_of_range_is_rejected() {
        let (store, svc) = setup();
        let product_id = seed_product(&store, dec!(3.00), 5);

        for rating in [0, 6] {
            let err = svc
                .create_review("u1", 1, product_id, request(rating))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[tokio::test]
    async fn second_review_for_same_product_conflicts() {
        let (store, svc) = setup();
        let product_id = seed_product(&store, dec!(3.00), 5);

        svc.create_review("u1", 1, product_id, request(4))
            .await
            .unwrap();
        let err = svc
            .create_review("u1", 1, product_id, request(5))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // A different user is still free to review.
        svc.create_review("u2", 2, product_id, request(2))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn only_the_author_can_update_or_delete() {
        let (store, svc) = setup();
        let product_id = seed_product(&store, dec!(3.00), 5);
        let review = svc
            .create_review("u1", 1, product_id, request(4))
            .await
            .unwrap();

        assert!(matches!(
            svc.update_review("u2", 2, review.id, request(1)).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            svc.delete_review("u2", 2, review.id).await,
            Err(AppError::NotFound)
        ));

        let updated = svc
            .update_review("u1", 1, review.id, request(5))
            .await
            .unwrap();
        assert_eq!(updated.rating, 5);

        svc.delete_review("u1", 1, review.id).await.unwrap();
        assert!(svc.list_reviews(product_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reviewing_a_missing_product_is_not_found() {
        let (_store, svc) = setup();
        let err = svc.create_review("u1", 1, 42, request(3)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
