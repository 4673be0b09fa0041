mod author;
mod genre;
mod id;
mod isbn;
mod pages;
mod price;
mod publisher;
mod title;
mod year;

pub use self::{
    author::*, genre::*, id::*, isbn::*, pages::*, price::*, publisher::*, title::*, year::*,
};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    isbn: BookIsbn,
    publication_year: PublicationYear,
    pages: BookPages,
    price: BookPrice,
    genre: BookGenre,
    publisher: BookPublisher,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        isbn: BookIsbn,
        publication_year: PublicationYear,
        pages: BookPages,
        price: BookPrice,
        genre: BookGenre,
        publisher: BookPublisher,
    ) -> Self {
        Self {
            id,
            title,
            author,
            isbn,
            publication_year,
            pages,
            price,
            genre,
            publisher,
        }
    }

    /// Attaches a store-assigned id to a draft.
    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        let DestructBookDraft {
            title,
            author,
            isbn,
            publication_year,
            pages,
            price,
            genre,
            publisher,
        } = draft.into_destruct();
        Self::new(
            id,
            title,
            author,
            isbn,
            publication_year,
            pages,
            price,
            genre,
            publisher,
        )
    }

    /// Returns the book with every field present in `patch` replaced. `id` is never touched.
    pub fn patched(mut self, patch: BookPatch) -> Self {
        let DestructBookPatch {
            title,
            author,
            isbn,
            publication_year,
            pages,
            price,
            genre,
            publisher,
        } = patch.into_destruct();
        self.substitute(|book| {
            if let Some(title) = title {
                *book.title = title;
            }
            if let Some(author) = author {
                *book.author = author;
            }
            if let Some(isbn) = isbn {
                *book.isbn = isbn;
            }
            if let Some(publication_year) = publication_year {
                *book.publication_year = publication_year;
            }
            if let Some(pages) = pages {
                *book.pages = pages;
            }
            if let Some(price) = price {
                *book.price = price;
            }
            if let Some(genre) = genre {
                *book.genre = genre;
            }
            if let Some(publisher) = publisher {
                *book.publisher = publisher;
            }
        });
        self
    }
}

/// A book that has not been stored yet.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BookDraft {
    title: BookTitle,
    author: BookAuthor,
    isbn: BookIsbn,
    publication_year: PublicationYear,
    pages: BookPages,
    price: BookPrice,
    genre: BookGenre,
    publisher: BookPublisher,
}

impl BookDraft {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: BookTitle,
        author: BookAuthor,
        isbn: BookIsbn,
        publication_year: PublicationYear,
        pages: BookPages,
        price: BookPrice,
        genre: BookGenre,
        publisher: BookPublisher,
    ) -> Self {
        Self {
            title,
            author,
            isbn,
            publication_year,
            pages,
            price,
            genre,
            publisher,
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, References, Destructure)]
pub struct BookPatch {
    title: Option<BookTitle>,
    author: Option<BookAuthor>,
    isbn: Option<BookIsbn>,
    publication_year: Option<PublicationYear>,
    pages: Option<BookPages>,
    price: Option<BookPrice>,
    genre: Option<BookGenre>,
    publisher: Option<BookPublisher>,
}

impl BookPatch {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: Option<BookTitle>,
        author: Option<BookAuthor>,
        isbn: Option<BookIsbn>,
        publication_year: Option<PublicationYear>,
        pages: Option<BookPages>,
        price: Option<BookPrice>,
        genre: Option<BookGenre>,
        publisher: Option<BookPublisher>,
    ) -> Self {
        Self {
            title,
            author,
            isbn,
            publication_year,
            pages,
            price,
            genre,
            publisher,
        }
    }
}
