//! Book workflows.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::application::caching::{self, BOOK_CACHE_TTL_SECONDS};
use crate::application::responses::BookResponse;
use crate::domain::entities::{BookFilter, BookUpdate, Genre, NewBook};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::{AuthorRepository, BookRepository};
use crate::domain::unit_of_work::{UnitOfWork, in_unit_of_work};
use crate::infrastructure::cache::CacheManager;
use crate::utils::slug::slugify;

/// Fields of a new book as supplied by a client.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBookCommand {
    pub title: String,
    pub language: Option<String>,
    pub genre: Genre,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub publish_year: Option<i32>,
    pub page_count: Option<i32>,
    pub author_id: Option<Uuid>,
}

/// Fails with [`CatalogError::AuthorNotFound`] when `author_id` names no author.
async fn ensure_author_exists<A: AuthorRepository>(
    authors: &A,
    author_id: Option<Uuid>,
) -> CatalogResult<()> {
    if let Some(id) = author_id
        && authors.find_by_id(id).await?.is_none()
    {
        return Err(CatalogError::AuthorNotFound);
    }
    Ok(())
}

/// Lists books matching a filter. Not cached.
pub struct GetBooks<B: BookRepository> {
    books: Arc<B>,
}

impl<B: BookRepository> GetBooks<B> {
    pub fn new(books: Arc<B>) -> Self {
        Self { books }
    }

    pub async fn execute(&self, filter: BookFilter) -> CatalogResult<Vec<BookResponse>> {
        let books = self.books.find_all(filter).await?;
        Ok(books.into_iter().map(BookResponse::from).collect())
    }
}

/// Read-through lookup of a book by slug.
///
/// # Cache
///
/// Hits return without touching the repository. Misses load from the
/// repository and store the result for [`BOOK_CACHE_TTL_SECONDS`]. Unknown
/// slugs are never cached.
pub struct FindBookBySlug<B: BookRepository> {
    books: Arc<B>,
    cache: Arc<dyn CacheManager>,
    ttl_seconds: i64,
}

impl<B: BookRepository> FindBookBySlug<B> {
    pub fn new(books: Arc<B>, cache: Arc<dyn CacheManager>) -> Self {
        Self {
            books,
            cache,
            ttl_seconds: BOOK_CACHE_TTL_SECONDS,
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::BookNotFound`] if no book has this slug.
    pub async fn execute(&self, slug: &str) -> CatalogResult<BookResponse> {
        let key = caching::book_by_slug(slug);

        if let Some(cached) = caching::load::<BookResponse>(self.cache.as_ref(), &key).await {
            debug!(slug, "Book served from cache");
            return Ok(cached);
        }

        let book = self
            .books
            .find_by_slug(slug)
            .await?
            .ok_or(CatalogError::BookNotFound)?;

        let response = BookResponse::from(book);
        caching::store(self.cache.as_ref(), &key, &response, self.ttl_seconds).await;

        Ok(response)
    }
}

/// Creates a book with a slug derived from its title.
pub struct CreateBook<B: BookRepository, A: AuthorRepository, U: UnitOfWork> {
    books: Arc<B>,
    authors: Arc<A>,
    uow: Arc<U>,
}

impl<B: BookRepository, A: AuthorRepository, U: UnitOfWork> CreateBook<B, A, U> {
    pub fn new(books: Arc<B>, authors: Arc<A>, uow: Arc<U>) -> Self {
        Self {
            books,
            authors,
            uow,
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::AuthorNotFound`] if `author_id` names no author,
    /// [`CatalogError::BookAlreadyExists`] if the title or slug is taken.
    pub async fn execute(&self, command: CreateBookCommand) -> CatalogResult<BookResponse> {
        ensure_author_exists(self.authors.as_ref(), command.author_id).await?;

        let new_book = NewBook {
            slug: slugify(&command.title),
            title: command.title,
            language: command.language,
            genre: command.genre,
            description: command.description,
            short_description: command.short_description,
            publish_year: command.publish_year,
            page_count: command.page_count,
            author_id: command.author_id,
        };

        let book = in_unit_of_work(self.uow.as_ref(), self.books.create(new_book)).await?;

        Ok(book.into())
    }
}

/// Overwrites a book's mutable fields and drops its cache entry.
pub struct UpdateBook<B: BookRepository, A: AuthorRepository, U: UnitOfWork> {
    books: Arc<B>,
    authors: Arc<A>,
    cache: Arc<dyn CacheManager>,
    uow: Arc<U>,
}

impl<B: BookRepository, A: AuthorRepository, U: UnitOfWork> UpdateBook<B, A, U> {
    pub fn new(books: Arc<B>, authors: Arc<A>, cache: Arc<dyn CacheManager>, uow: Arc<U>) -> Self {
        Self {
            books,
            authors,
            cache,
            uow,
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::AuthorNotFound`] before any write if the new
    /// `author_id` names no author, [`CatalogError::BookNotFound`] if `id`
    /// names no book.
    pub async fn execute(&self, id: Uuid, update: BookUpdate) -> CatalogResult<BookResponse> {
        ensure_author_exists(self.authors.as_ref(), update.author_id).await?;

        let book = in_unit_of_work(self.uow.as_ref(), async {
            let book = self
                .books
                .update(id, update)
                .await?
                .ok_or(CatalogError::BookNotFound)?;

            self.cache.delete(&caching::book_by_slug(&book.slug)).await;
            Ok(book)
        })
        .await?;

        Ok(book.into())
    }
}

/// Deletes a book by id and drops its cache entry.
pub struct DeleteBook<B: BookRepository, U: UnitOfWork> {
    books: Arc<B>,
    cache: Arc<dyn CacheManager>,
    uow: Arc<U>,
}

impl<B: BookRepository, U: UnitOfWork> DeleteBook<B, U> {
    pub fn new(books: Arc<B>, cache: Arc<dyn CacheManager>, uow: Arc<U>) -> Self {
        Self { books, cache, uow }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::BookNotFound`] if `id` names no book.
    pub async fn execute(&self, id: Uuid) -> CatalogResult<()> {
        in_unit_of_work(self.uow.as_ref(), async {
            let book = self
                .books
                .find_by_id(id)
                .await?
                .ok_or(CatalogError::BookNotFound)?;

            if !self.books.delete_by_id(id).await? {
                return Err(CatalogError::BookNotFound);
            }

            self.cache.delete(&caching::book_by_slug(&book.slug)).await;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockUnitOfWork;
    use crate::domain::entities::{Author, Book};
    use crate::domain::repositories::{MockAuthorRepository, MockBookRepository};
    use crate::infrastructure::cache::{JsonCacheManager, MemoryBackend};

    fn sample_book(slug: &str) -> Book {
        Book {
            id: Uuid::new_v4(),
            title: "Peaky".to_string(),
            slug: slug.to_string(),
            language: "English".to_string(),
            genre: Genre::Detective,
            description: None,
            short_description: Some("Birmingham, 1919".to_string()),
            publish_year: Some(2013),
            page_count: Some(320),
            author_id: None,
        }
    }

    fn sample_author(id: Uuid) -> Author {
        Author {
            id,
            name: "Thomas Shelby".to_string(),
            slug: "thomas-shelby".to_string(),
            bio: None,
            birth_date: None,
            death_date: None,
            country: None,
            photo_url: None,
        }
    }

    fn memory_cache() -> Arc<JsonCacheManager<MemoryBackend>> {
        Arc::new(JsonCacheManager::new(MemoryBackend::new()))
    }

    fn committing_uow() -> MockUnitOfWork {
        let mut uow = MockUnitOfWork::new();
        uow.expect_commit().times(1).returning(|| Ok(()));
        uow
    }

    fn rolling_back_uow() -> MockUnitOfWork {
        let mut uow = MockUnitOfWork::new();
        uow.expect_commit().times(0);
        uow.expect_rollback().times(1).returning(|| Ok(()));
        uow
    }

    fn update_for(author_id: Option<Uuid>) -> BookUpdate {
        BookUpdate {
            language: None,
            genre: Genre::Romance,
            description: Some("Updated".to_string()),
            short_description: None,
            publish_year: Some(2014),
            page_count: Some(400),
            author_id,
        }
    }

    #[tokio::test]
    async fn test_find_book_second_call_is_served_from_cache() {
        let mut books = MockBookRepository::new();
        let book = sample_book("peaky");
        books
            .expect_find_by_slug()
            .withf(|slug| slug == "peaky")
            .times(1)
            .returning(move |_| Ok(Some(book.clone())));

        let use_case = FindBookBySlug::new(Arc::new(books), memory_cache());

        let first = use_case.execute("peaky").await.unwrap();
        let second = use_case.execute("peaky").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.slug, "peaky");
    }

    #[tokio::test]
    async fn test_find_unknown_book_is_not_cached() {
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_slug()
            .times(2)
            .returning(|_| Ok(None));

        let cache = memory_cache();
        let use_case = FindBookBySlug::new(Arc::new(books), cache.clone());

        for _ in 0..2 {
            let err = use_case.execute("unknown-slug").await.unwrap_err();
            assert!(matches!(err, CatalogError::BookNotFound));
        }
        assert!(cache.backend().is_empty().await);
    }

    #[tokio::test]
    async fn test_create_book_derives_slug_from_title() {
        let mut books = MockBookRepository::new();
        books
            .expect_create()
            .withf(|new_book| new_book.slug == "the-great-gatsby" && new_book.language.is_none())
            .times(1)
            .returning(|new_book| {
                let mut book = sample_book(&new_book.slug);
                book.title = new_book.title;
                Ok(book)
            });

        let use_case = CreateBook::new(
            Arc::new(books),
            Arc::new(MockAuthorRepository::new()),
            Arc::new(committing_uow()),
        );

        let created = use_case
            .execute(CreateBookCommand {
                title: "The Great Gatsby".to_string(),
                language: None,
                genre: Genre::Romance,
                description: None,
                short_description: None,
                publish_year: Some(1925),
                page_count: None,
                author_id: None,
            })
            .await
            .unwrap();

        assert_eq!(created.slug, "the-great-gatsby");
        assert_eq!(created.title, "The Great Gatsby");
    }

    #[tokio::test]
    async fn test_create_book_with_unknown_author_fails_before_writing() {
        let mut authors = MockAuthorRepository::new();
        authors
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        let mut books = MockBookRepository::new();
        books.expect_create().times(0);
        let mut uow = MockUnitOfWork::new();
        uow.expect_commit().times(0);
        uow.expect_rollback().times(0);

        let use_case = CreateBook::new(Arc::new(books), Arc::new(authors), Arc::new(uow));

        let err = use_case
            .execute(CreateBookCommand {
                title: "Orphan".to_string(),
                language: None,
                genre: Genre::Fantasy,
                description: None,
                short_description: None,
                publish_year: None,
                page_count: None,
                author_id: Some(Uuid::new_v4()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::AuthorNotFound));
    }

    #[tokio::test]
    async fn test_create_book_conflict_rolls_back() {
        let mut books = MockBookRepository::new();
        books
            .expect_create()
            .times(1)
            .returning(|_| Err(CatalogError::BookAlreadyExists));

        let use_case = CreateBook::new(
            Arc::new(books),
            Arc::new(MockAuthorRepository::new()),
            Arc::new(rolling_back_uow()),
        );

        let err = use_case
            .execute(CreateBookCommand {
                title: "Peaky".to_string(),
                language: None,
                genre: Genre::Detective,
                description: None,
                short_description: None,
                publish_year: None,
                page_count: None,
                author_id: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::BookAlreadyExists));
    }

    #[tokio::test]
    async fn test_update_book_invalidates_cache_entry() {
        let author_id = Uuid::new_v4();
        let mut authors = MockAuthorRepository::new();
        authors
            .expect_find_by_id()
            .times(1)
            .returning(move |id| Ok(Some(sample_author(id))));

        let mut books = MockBookRepository::new();
        books.expect_update().times(1).returning(|_, update| {
            let mut book = sample_book("peaky");
            book.genre = update.genre;
            book.author_id = update.author_id;
            Ok(Some(book))
        });

        let cache = memory_cache();
        cache
            .set_json(
                &caching::book_by_slug("peaky"),
                &serde_json::json!({ "stale": true }),
                60,
            )
            .await;

        let use_case = UpdateBook::new(
            Arc::new(books),
            Arc::new(authors),
            cache.clone(),
            Arc::new(committing_uow()),
        );

        let updated = use_case
            .execute(Uuid::new_v4(), update_for(Some(author_id)))
            .await
            .unwrap();

        assert_eq!(updated.genre, Genre::Romance);
        assert_eq!(updated.author_id, Some(author_id));
        assert!(cache.backend().is_empty().await);
    }

    #[tokio::test]
    async fn test_update_missing_book_rolls_back() {
        let mut books = MockBookRepository::new();
        books.expect_update().times(1).returning(|_, _| Ok(None));

        let use_case = UpdateBook::new(
            Arc::new(books),
            Arc::new(MockAuthorRepository::new()),
            memory_cache(),
            Arc::new(rolling_back_uow()),
        );

        let err = use_case
            .execute(Uuid::new_v4(), update_for(None))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::BookNotFound));
    }

    #[tokio::test]
    async fn test_update_with_unknown_author_never_writes() {
        let mut authors = MockAuthorRepository::new();
        authors
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        let mut books = MockBookRepository::new();
        books.expect_update().times(0);

        let use_case = UpdateBook::new(
            Arc::new(books),
            Arc::new(authors),
            memory_cache(),
            Arc::new(MockUnitOfWork::new()),
        );

        let err = use_case
            .execute(Uuid::new_v4(), update_for(Some(Uuid::new_v4())))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::AuthorNotFound));
    }

    #[tokio::test]
    async fn test_delete_book_evicts_cached_copy() {
        let book = sample_book("peaky");
        let book_id = book.id;
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(book.clone())));
        books
            .expect_delete_by_id()
            .withf(move |id| *id == book_id)
            .times(1)
            .returning(|_| Ok(true));

        let cache = memory_cache();
        cache
            .set(&caching::book_by_slug("peaky"), "{}", 60)
            .await;

        let use_case = DeleteBook::new(Arc::new(books), cache.clone(), Arc::new(committing_uow()));

        use_case.execute(book_id).await.unwrap();

        assert!(cache.backend().is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_missing_book() {
        let mut books = MockBookRepository::new();
        books.expect_find_by_id().times(1).returning(|_| Ok(None));
        books.expect_delete_by_id().times(0);

        let use_case = DeleteBook::new(
            Arc::new(books),
            memory_cache(),
            Arc::new(rolling_back_uow()),
        );

        let err = use_case.execute(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, CatalogError::BookNotFound));
    }

    #[tokio::test]
    async fn test_get_books_passes_filter_through() {
        let mut books = MockBookRepository::new();
        books
            .expect_find_all()
            .withf(|filter| filter.genre == Some(Genre::Detective) && filter.limit == Some(5))
            .times(1)
            .returning(|_| Ok(vec![sample_book("peaky")]));

        let use_case = GetBooks::new(Arc::new(books));

        let listed = use_case
            .execute(BookFilter {
                genre: Some(Genre::Detective),
                limit: Some(5),
                ..BookFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
    }
}
