//! Per-request composition root.
//!
//! A [`RequestScope`] opens one [`PgSession`] and wires every use case a
//! handler may need over it, so all repositories of a request share one
//! transaction.

use std::sync::Arc;

use crate::application::use_cases::{
    AddFavourite, AuthenticateUser, CreateAuthor, CreateBook, CreateReview, DeleteAuthor,
    DeleteBook, DeleteFavourite, DeleteReview, FindAuthorBySlug, FindBookBySlug, FindFavourites,
    FindReviews, GetBooks, LogIn, Register, UpdateAuthorPhoto, UpdateBook, UpdateFavouriteStatus,
    UpdateReview,
};
use crate::infrastructure::persistence::{
    PgAuthorRepository, PgBookRepository, PgFavouriteBookRepository, PgReviewRepository,
    PgSession, PgUserRepository,
};
use crate::state::AppState;

type Authors = PgAuthorRepository;
type Books = PgBookRepository;
type Favourites = PgFavouriteBookRepository;
type Reviews = PgReviewRepository;
type Users = PgUserRepository;
type Session = PgSession;

pub struct RequestScope<'a> {
    state: &'a AppState,
    session: Arc<PgSession>,
}

impl<'a> RequestScope<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            session: Arc::new(PgSession::new(state.pool.clone())),
        }
    }

    fn authors(&self) -> Arc<Authors> {
        Arc::new(PgAuthorRepository::new(self.session.clone()))
    }

    fn books(&self) -> Arc<Books> {
        Arc::new(PgBookRepository::new(self.session.clone()))
    }

    fn favourites(&self) -> Arc<Favourites> {
        Arc::new(PgFavouriteBookRepository::new(self.session.clone()))
    }

    fn reviews(&self) -> Arc<Reviews> {
        Arc::new(PgReviewRepository::new(self.session.clone()))
    }

    fn users(&self) -> Arc<Users> {
        Arc::new(PgUserRepository::new(self.session.clone()))
    }

    // Authors

    pub fn create_author(&self) -> CreateAuthor<Authors, Session> {
        CreateAuthor::new(self.authors(), self.session.clone())
    }

    pub fn find_author_by_slug(&self) -> FindAuthorBySlug<Authors> {
        FindAuthorBySlug::new(self.authors(), self.state.cache.clone())
    }

    pub fn delete_author(&self) -> DeleteAuthor<Authors, Session> {
        DeleteAuthor::new(
            self.authors(),
            self.state.cache.clone(),
            self.session.clone(),
        )
    }

    pub fn update_author_photo(&self) -> UpdateAuthorPhoto<Authors, Session> {
        UpdateAuthorPhoto::new(
            self.authors(),
            self.state.storage.clone(),
            self.state.cache.clone(),
            self.session.clone(),
            self.state.avatars_bucket.clone(),
        )
    }

    // Books

    pub fn get_books(&self) -> GetBooks<Books> {
        GetBooks::new(self.books())
    }

    pub fn find_book_by_slug(&self) -> FindBookBySlug<Books> {
        FindBookBySlug::new(self.books(), self.state.cache.clone())
    }

    pub fn create_book(&self) -> CreateBook<Books, Authors, Session> {
        CreateBook::new(self.books(), self.authors(), self.session.clone())
    }

    pub fn update_book(&self) -> UpdateBook<Books, Authors, Session> {
        UpdateBook::new(
            self.books(),
            self.authors(),
            self.state.cache.clone(),
            self.session.clone(),
        )
    }

    pub fn delete_book(&self) -> DeleteBook<Books, Session> {
        DeleteBook::new(self.books(), self.state.cache.clone(), self.session.clone())
    }

    // Favourites

    pub fn add_favourite(&self) -> AddFavourite<Favourites, Books, Session> {
        AddFavourite::new(self.favourites(), self.books(), self.session.clone())
    }

    pub fn delete_favourite(&self) -> DeleteFavourite<Favourites, Books, Session> {
        DeleteFavourite::new(self.favourites(), self.books(), self.session.clone())
    }

    pub fn find_favourites(&self) -> FindFavourites<Favourites> {
        FindFavourites::new(self.favourites())
    }

    pub fn update_favourite_status(&self) -> UpdateFavouriteStatus<Favourites, Books, Session> {
        UpdateFavouriteStatus::new(self.favourites(), self.books(), self.session.clone())
    }

    // Reviews

    pub fn create_review(&self) -> CreateReview<Reviews, Books, Session> {
        CreateReview::new(self.reviews(), self.books(), self.session.clone())
    }

    pub fn find_reviews(&self) -> FindReviews<Reviews, Books> {
        FindReviews::new(self.reviews(), self.books())
    }

    pub fn update_review(&self) -> UpdateReview<Reviews, Books, Session> {
        UpdateReview::new(self.reviews(), self.books(), self.session.clone())
    }

    pub fn delete_review(&self) -> DeleteReview<Reviews, Books, Session> {
        DeleteReview::new(self.reviews(), self.books(), self.session.clone())
    }

    // Users

    pub fn register(&self) -> Register<Users, Session> {
        Register::new(
            self.users(),
            self.state.password_hasher.clone(),
            self.session.clone(),
        )
    }

    pub fn log_in(&self) -> LogIn<Users> {
        LogIn::new(
            self.users(),
            self.state.password_hasher.clone(),
            self.state.token_service.clone(),
        )
    }

    pub fn authenticate_user(&self) -> AuthenticateUser<Users> {
        AuthenticateUser::new(self.users(), self.state.token_service.clone())
    }
}
