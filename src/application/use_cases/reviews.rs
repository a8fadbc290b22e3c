//! Book reviews.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::responses::ReviewResponse;
use crate::domain::entities::{NewReview, ReviewUpdate};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::{BookRepository, ReviewRepository};
use crate::domain::unit_of_work::{UnitOfWork, in_unit_of_work};

use super::book_for_slug;

pub struct CreateReview<R: ReviewRepository, B: BookRepository, U: UnitOfWork> {
    reviews: Arc<R>,
    books: Arc<B>,
    uow: Arc<U>,
}

impl<R: ReviewRepository, B: BookRepository, U: UnitOfWork> CreateReview<R, B, U> {
    pub fn new(reviews: Arc<R>, books: Arc<B>, uow: Arc<U>) -> Self {
        Self {
            reviews,
            books,
            uow,
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::BookNotFound`] for an unknown slug and
    /// [`CatalogError::ReviewAlreadyExists`] if the user already reviewed the book.
    pub async fn execute(
        &self,
        user_id: Uuid,
        slug: &str,
        review: NewReview,
    ) -> CatalogResult<ReviewResponse> {
        let book = book_for_slug(self.books.as_ref(), slug).await?;

        let created = in_unit_of_work(
            self.uow.as_ref(),
            self.reviews.create(user_id, book.id, review),
        )
        .await?;

        Ok(created.into())
    }
}

/// Lists the reviews of a book, newest first.
///
/// An unknown slug yields an empty list rather than an error.
pub struct FindReviews<R: ReviewRepository, B: BookRepository> {
    reviews: Arc<R>,
    books: Arc<B>,
}

impl<R: ReviewRepository, B: BookRepository> FindReviews<R, B> {
    pub fn new(reviews: Arc<R>, books: Arc<B>) -> Self {
        Self { reviews, books }
    }

    pub async fn execute(&self, slug: &str) -> CatalogResult<Vec<ReviewResponse>> {
        let Some(book) = self.books.find_by_slug(slug).await? else {
            return Ok(Vec::new());
        };

        let reviews = self.reviews.find_all_by_book_id(book.id).await?;
        Ok(reviews.into_iter().map(Into::into).collect())
    }
}

pub struct UpdateReview<R: ReviewRepository, B: BookRepository, U: UnitOfWork> {
    reviews: Arc<R>,
    books: Arc<B>,
    uow: Arc<U>,
}

impl<R: ReviewRepository, B: BookRepository, U: UnitOfWork> UpdateReview<R, B, U> {
    pub fn new(reviews: Arc<R>, books: Arc<B>, uow: Arc<U>) -> Self {
        Self {
            reviews,
            books,
            uow,
        }
    }

    pub async fn execute(
        &self,
        user_id: Uuid,
        slug: &str,
        update: ReviewUpdate,
    ) -> CatalogResult<ReviewResponse> {
        let book = book_for_slug(self.books.as_ref(), slug).await?;

        let updated = in_unit_of_work(self.uow.as_ref(), async {
            self.reviews
                .update(user_id, book.id, update)
                .await?
                .ok_or(CatalogError::ReviewNotFound)
        })
        .await?;

        Ok(updated.into())
    }
}

pub struct DeleteReview<R: ReviewRepository, B: BookRepository, U: UnitOfWork> {
    reviews: Arc<R>,
    books: Arc<B>,
    uow: Arc<U>,
}

impl<R: ReviewRepository, B: BookRepository, U: UnitOfWork> DeleteReview<R, B, U> {
    pub fn new(reviews: Arc<R>, books: Arc<B>, uow: Arc<U>) -> Self {
        Self {
            reviews,
            books,
            uow,
        }
    }

    pub async fn execute(&self, user_id: Uuid, slug: &str) -> CatalogResult<()> {
        let book = book_for_slug(self.books.as_ref(), slug).await?;

        in_unit_of_work(self.uow.as_ref(), async {
            if self.reviews.delete(user_id, book.id).await? {
                Ok(())
            } else {
                Err(CatalogError::ReviewNotFound)
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::MockUnitOfWork;
    use crate::domain::entities::{Book, Genre, Review, ReviewAuthor};
    use crate::domain::repositories::{MockBookRepository, MockReviewRepository};

    fn peaky() -> Book {
        Book {
            id: Uuid::new_v4(),
            title: "Peaky".to_string(),
            slug: "peaky".to_string(),
            language: "English".to_string(),
            genre: Genre::Detective,
            description: None,
            short_description: None,
            publish_year: None,
            page_count: None,
            author_id: None,
        }
    }

    fn review_of(book: Book, text: &str, rating: i32) -> Review {
        Review {
            id: Uuid::new_v4(),
            review: text.to_string(),
            rating,
            created_at: Utc::now(),
            user: ReviewAuthor {
                first_name: "Ada".to_string(),
                last_name: "Thorne".to_string(),
            },
            book,
        }
    }

    fn books_with(book: Book) -> MockBookRepository {
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_slug()
            .with(eq("peaky"))
            .returning(move |_| Ok(Some(book.clone())));
        books
    }

    fn no_books() -> MockBookRepository {
        let mut books = MockBookRepository::new();
        books.expect_find_by_slug().returning(|_| Ok(None));
        books
    }

    #[tokio::test]
    async fn test_create_review_carries_reviewer_name() {
        let book = peaky();
        let stored = book.clone();
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_create()
            .withf(|_, _, review| review.rating == 5)
            .times(1)
            .returning(move |_, _, review| Ok(review_of(stored.clone(), &review.review, review.rating)));

        let mut uow = MockUnitOfWork::new();
        uow.expect_commit().times(1).returning(|| Ok(()));

        let use_case = CreateReview::new(Arc::new(reviews), Arc::new(books_with(book)), Arc::new(uow));

        let created = use_case
            .execute(
                Uuid::new_v4(),
                "peaky",
                NewReview {
                    review: "Sharp and atmospheric".to_string(),
                    rating: 5,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.author, "Ada Thorne");
        assert_eq!(created.book.slug, "peaky");
    }

    #[tokio::test]
    async fn test_create_second_review_conflicts() {
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_create()
            .returning(|_, _, _| Err(CatalogError::ReviewAlreadyExists));

        let mut uow = MockUnitOfWork::new();
        uow.expect_rollback().times(1).returning(|| Ok(()));

        let use_case =
            CreateReview::new(Arc::new(reviews), Arc::new(books_with(peaky())), Arc::new(uow));

        let err = use_case
            .execute(
                Uuid::new_v4(),
                "peaky",
                NewReview {
                    review: "Read it twice now".to_string(),
                    rating: 4,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::ReviewAlreadyExists));
    }

    #[tokio::test]
    async fn test_find_reviews_for_unknown_book_is_empty() {
        let mut reviews = MockReviewRepository::new();
        reviews.expect_find_all_by_book_id().times(0);

        let use_case = FindReviews::new(Arc::new(reviews), Arc::new(no_books()));

        let listed = use_case.execute("unknown-slug").await.unwrap();

        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_find_reviews_maps_each_review() {
        let book = peaky();
        let book_id = book.id;
        let stored = book.clone();
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_find_all_by_book_id()
            .with(eq(book_id))
            .returning(move |_| {
                Ok(vec![
                    review_of(stored.clone(), "Second look, still great", 5),
                    review_of(stored.clone(), "Good but slow at times", 3),
                ])
            });

        let use_case = FindReviews::new(Arc::new(reviews), Arc::new(books_with(book)));

        let listed = use_case.execute("peaky").await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].rating, 3);
    }

    #[tokio::test]
    async fn test_update_review_for_unknown_book() {
        let mut reviews = MockReviewRepository::new();
        reviews.expect_update().times(0);

        let use_case = UpdateReview::new(
            Arc::new(reviews),
            Arc::new(no_books()),
            Arc::new(MockUnitOfWork::new()),
        );

        let err = use_case
            .execute(
                Uuid::new_v4(),
                "unknown-slug",
                ReviewUpdate {
                    review: "Changed my mind".to_string(),
                    rating: 2,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::BookNotFound));
    }

    #[tokio::test]
    async fn test_update_missing_review() {
        let mut reviews = MockReviewRepository::new();
        reviews.expect_update().returning(|_, _, _| Ok(None));

        let mut uow = MockUnitOfWork::new();
        uow.expect_rollback().times(1).returning(|| Ok(()));

        let use_case =
            UpdateReview::new(Arc::new(reviews), Arc::new(books_with(peaky())), Arc::new(uow));

        let err = use_case
            .execute(
                Uuid::new_v4(),
                "peaky",
                ReviewUpdate {
                    review: "Changed my mind".to_string(),
                    rating: 2,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::ReviewNotFound));
    }

    #[tokio::test]
    async fn test_delete_review() {
        let mut reviews = MockReviewRepository::new();
        reviews.expect_delete().times(1).returning(|_, _| Ok(true));

        let mut uow = MockUnitOfWork::new();
        uow.expect_commit().times(1).returning(|| Ok(()));

        let use_case =
            DeleteReview::new(Arc::new(reviews), Arc::new(books_with(peaky())), Arc::new(uow));

        use_case.execute(Uuid::new_v4(), "peaky").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_review() {
        let mut reviews = MockReviewRepository::new();
        reviews.expect_delete().returning(|_, _| Ok(false));

        let mut uow = MockUnitOfWork::new();
        uow.expect_rollback().times(1).returning(|| Ok(()));

        let use_case =
            DeleteReview::new(Arc::new(reviews), Arc::new(books_with(peaky())), Arc::new(uow));

        let err = use_case.execute(Uuid::new_v4(), "peaky").await.unwrap_err();

        assert!(matches!(err, CatalogError::ReviewNotFound));
    }
}
