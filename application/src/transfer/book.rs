use error_stack::Report;
use rust_decimal::Decimal;

use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookGenre, BookIsbn, BookPages, BookPatch, BookPrice,
    BookPublisher, BookTitle, DestructBook, PublicationYear,
};
use kernel::KernelError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication_year: i32,
    pub pages: i32,
    pub price: Decimal,
    pub genre: String,
    pub publisher: String,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            isbn,
            publication_year,
            pages,
            price,
            genre,
            publisher,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            publication_year: publication_year.into(),
            pages: pages.into(),
            price: price.into(),
            genre: genre.into(),
            publisher: publisher.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct CreateBookDto {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub pages: Option<i32>,
    pub price: Option<Decimal>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
}

impl TryFrom<CreateBookDto> for BookDraft {
    type Error = Report<KernelError>;
    fn try_from(value: CreateBookDto) -> Result<Self, Self::Error> {
        Ok(BookDraft::new(
            BookTitle::new(required_text("title", value.title)?),
            BookAuthor::new(required_text("author", value.author)?),
            BookIsbn::new(required_text("isbn", value.isbn)?),
            PublicationYear::new(required("publicationYear", value.publication_year)?),
            BookPages::new(required("pages", value.pages)?),
            price(required("price", value.price)?)?,
            BookGenre::new(required_text("genre", value.genre)?),
            BookPublisher::new(required_text("publisher", value.publisher)?),
        ))
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookDto {
    pub id: i32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub pages: Option<i32>,
    pub price: Option<Decimal>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
}

impl TryFrom<UpdateBookDto> for BookPatch {
    type Error = Report<KernelError>;
    fn try_from(value: UpdateBookDto) -> Result<Self, Self::Error> {
        Ok(BookPatch::new(
            optional_text("title", value.title)?.map(BookTitle::new),
            optional_text("author", value.author)?.map(BookAuthor::new),
            optional_text("isbn", value.isbn)?.map(BookIsbn::new),
            value.publication_year.map(PublicationYear::new),
            value.pages.map(BookPages::new),
            value.price.map(price).transpose()?,
            optional_text("genre", value.genre)?.map(BookGenre::new),
            optional_text("publisher", value.publisher)?.map(BookPublisher::new),
        ))
    }
}

pub struct DeleteBookDto {
    pub id: i32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DeletedBookDto {
    pub id: i32,
}

/// Numeric search input. `operator` is passed through verbatim; unknown tokens mean equality.
#[derive(Debug, Clone)]
pub struct SearchBookDto {
    pub value: i32,
    pub operator: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FoundBooksDto {
    pub books: Vec<BookDto>,
    pub count: usize,
}

impl From<Vec<Book>> for FoundBooksDto {
    fn from(value: Vec<Book>) -> Self {
        let books = value.into_iter().map(BookDto::from).collect::<Vec<_>>();
        Self {
            count: books.len(),
            books,
        }
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, Report<KernelError>> {
    value.ok_or_else(|| {
        Report::new(KernelError::ConstraintViolation)
            .attach_printable(format!("notNull Violation: {field} cannot be null"))
    })
}

fn price(value: Decimal) -> Result<BookPrice, Report<KernelError>> {
    let price = BookPrice::new(value);
    if !price.fits() {
        return Err(Report::new(KernelError::ConstraintViolation).attach_printable(format!(
            "numeric field overflow: price {value} does not fit NUMERIC(10, 2)"
        )));
    }
    Ok(price)
}

fn required_text(field: &str, value: Option<String>) -> Result<String, Report<KernelError>> {
    let value = required(field, value)?;
    optional_text(field, Some(value)).map(|value| value.unwrap_or_default())
}

fn optional_text(
    field: &str,
    value: Option<String>,
) -> Result<Option<String>, Report<KernelError>> {
    match value {
        Some(value) if value.trim().is_empty() => Err(Report::new(
            KernelError::ConstraintViolation,
        )
        .attach_printable(format!("Validation error: {field} cannot be empty"))),
        other => Ok(other),
    }
}
