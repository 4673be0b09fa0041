use crate::controller::Exhaust;
use crate::response::EnvelopeResponse;
use application::envelope::Envelope;
use application::transfer::{BookDto, DeletedBookDto, FoundBooksDto, PagesStatsDto, PriceStatsDto};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    id: i32,
    title: String,
    author: String,
    isbn: String,
    publication_year: i32,
    pages: i32,
    price: Decimal,
    genre: String,
    publisher: String,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            publication_year: value.publication_year,
            pages: value.pages,
            price: value.price,
            genre: value.genre,
            publisher: value.publisher,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    data: T,
}

#[derive(Debug, Serialize)]
pub struct FoundBooksBody {
    data: Vec<BookResponse>,
    count: usize,
}

#[derive(Debug, Serialize)]
pub struct UpdatedBookBody {
    message: String,
    data: BookResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBookBody {
    message: String,
    deleted_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceStatsResponse {
    total_price: Option<Decimal>,
    average_price: Option<Decimal>,
    total_books: i64,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagesStatsResponse {
    total_pages: Option<i64>,
    average_pages: Option<Decimal>,
    total_books: i64,
    min_pages: Option<i32>,
    max_pages: Option<i32>,
}

pub struct BookPresenter;

impl Exhaust<Envelope<Vec<BookDto>>> for BookPresenter {
    type To = EnvelopeResponse<DataBody<Vec<BookResponse>>>;
    fn emit(&self, input: Envelope<Vec<BookDto>>) -> Self::To {
        EnvelopeResponse::present(input, StatusCode::OK, |books| DataBody {
            data: books.into_iter().map(BookResponse::from).collect(),
        })
    }
}

impl Exhaust<Envelope<BookDto>> for BookPresenter {
    type To = EnvelopeResponse<DataBody<BookResponse>>;
    fn emit(&self, input: Envelope<BookDto>) -> Self::To {
        EnvelopeResponse::present(input, StatusCode::OK, |book| DataBody {
            data: BookResponse::from(book),
        })
    }
}

impl Exhaust<Envelope<FoundBooksDto>> for BookPresenter {
    type To = EnvelopeResponse<FoundBooksBody>;
    fn emit(&self, input: Envelope<FoundBooksDto>) -> Self::To {
        EnvelopeResponse::present(input, StatusCode::OK, |found| FoundBooksBody {
            data: found.books.into_iter().map(BookResponse::from).collect(),
            count: found.count,
        })
    }
}

impl Exhaust<Envelope<DeletedBookDto>> for BookPresenter {
    type To = EnvelopeResponse<DeletedBookBody>;
    fn emit(&self, input: Envelope<DeletedBookDto>) -> Self::To {
        EnvelopeResponse::present(input, StatusCode::OK, |deleted| DeletedBookBody {
            message: format!("Book with ID {} was deleted", deleted.id),
            deleted_id: deleted.id,
        })
    }
}

impl Exhaust<Envelope<PriceStatsDto>> for BookPresenter {
    type To = EnvelopeResponse<DataBody<PriceStatsResponse>>;
    fn emit(&self, input: Envelope<PriceStatsDto>) -> Self::To {
        EnvelopeResponse::present(input, StatusCode::OK, |stats| DataBody {
            data: PriceStatsResponse {
                total_price: stats.total_price,
                average_price: stats.average_price,
                total_books: stats.total_books,
                min_price: stats.min_price,
                max_price: stats.max_price,
            },
        })
    }
}

impl Exhaust<Envelope<PagesStatsDto>> for BookPresenter {
    type To = EnvelopeResponse<DataBody<PagesStatsResponse>>;
    fn emit(&self, input: Envelope<PagesStatsDto>) -> Self::To {
        EnvelopeResponse::present(input, StatusCode::OK, |stats| DataBody {
            data: PagesStatsResponse {
                total_pages: stats.total_pages,
                average_pages: stats.average_pages,
                total_books: stats.total_books,
                min_pages: stats.min_pages,
                max_pages: stats.max_pages,
            },
        })
    }
}

/// Answers a successful create with `201 Created`.
pub struct CreatedBookPresenter;

impl Exhaust<Envelope<BookDto>> for CreatedBookPresenter {
    type To = EnvelopeResponse<DataBody<BookResponse>>;
    fn emit(&self, input: Envelope<BookDto>) -> Self::To {
        EnvelopeResponse::present(input, StatusCode::CREATED, |book| DataBody {
            data: BookResponse::from(book),
        })
    }
}

pub struct UpdatedBookPresenter;

impl Exhaust<Envelope<BookDto>> for UpdatedBookPresenter {
    type To = EnvelopeResponse<UpdatedBookBody>;
    fn emit(&self, input: Envelope<BookDto>) -> Self::To {
        EnvelopeResponse::present(input, StatusCode::OK, |book| UpdatedBookBody {
            message: format!("Book with ID {} was updated", book.id),
            data: BookResponse::from(book),
        })
    }
}
