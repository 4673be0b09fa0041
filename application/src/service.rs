mod book;
mod search;
mod stats;

pub use self::{book::*, search::*, stats::*};

/// Every catalog operation, as seen by the transport layer.
pub trait CatalogService:
    GetBookService
    + CreateBookService
    + UpdateBookService
    + DeleteBookService
    + SearchBookService
    + BookStatsService
{
}

impl<T> CatalogService for T where
    T: GetBookService
        + CreateBookService
        + UpdateBookService
        + DeleteBookService
        + SearchBookService
        + BookStatsService
{
}
