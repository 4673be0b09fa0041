use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{AggregateField, Aggregation, BookQuery, DependOnBookQuery};
use kernel::KernelError;

use crate::envelope::Envelope;
use crate::transfer::{PagesStatsDto, PriceStatsDto};

/// Statistics always cover the whole catalog; search filters never apply here.
#[async_trait::async_trait]
pub trait BookStatsService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery
{
    async fn aggregate(
        &self,
        field: AggregateField,
    ) -> error_stack::Result<Aggregation, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        self.book_query().aggregate(&mut connection, field).await
    }

    async fn price_stats(&self) -> Envelope<PriceStatsDto> {
        let result = self.aggregate(AggregateField::Price).await;
        Envelope::from(result.map(PriceStatsDto::from))
    }

    async fn pages_stats(&self) -> Envelope<PagesStatsDto> {
        let result = self.aggregate(AggregateField::Pages).await;
        Envelope::from(result.and_then(PagesStatsDto::try_from))
    }
}

impl<T> BookStatsService for T where T: DependOnDatabaseConnection + DependOnBookQuery {}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use driver::database::InMemoryDatabase;
    use kernel::KernelError;

    use crate::service::{BookStatsService, CreateBookService};
    use crate::transfer::{CreateBookDto, PagesStatsDto, PriceStatsDto};

    fn create_dto(isbn: &str, pages: i32, cents: i64) -> CreateBookDto {
        CreateBookDto {
            title: Some("T".to_string()),
            author: Some("Au".to_string()),
            isbn: Some(isbn.to_string()),
            publication_year: Some(2020),
            pages: Some(pages),
            price: Some(Decimal::new(cents, 2)),
            genre: Some("G".to_string()),
            publisher: Some("P".to_string()),
        }
    }

    #[tokio::test]
    async fn empty_catalog_has_null_statistics() {
        let db = InMemoryDatabase::new();
        let price = db.price_stats().await.success().unwrap();
        assert_eq!(
            price,
            PriceStatsDto {
                total_price: None,
                average_price: None,
                total_books: 0,
                min_price: None,
                max_price: None,
            }
        );
        let pages = db.pages_stats().await.success().unwrap();
        assert_eq!(
            pages,
            PagesStatsDto {
                total_pages: None,
                average_pages: None,
                total_books: 0,
                min_pages: None,
                max_pages: None,
            }
        );
    }

    #[tokio::test]
    async fn statistics_over_whole_catalog() {
        let db = InMemoryDatabase::new();
        db.create_book(create_dto("1", 100, 1000)).await.success().unwrap();
        db.create_book(create_dto("2", 201, 2550)).await.success().unwrap();

        let price = db.price_stats().await.success().unwrap();
        assert_eq!(price.total_price, Some(Decimal::new(3550, 2)));
        assert_eq!(price.average_price, Some(Decimal::new(1775, 2)));
        assert_eq!(price.total_books, 2);
        assert_eq!(price.min_price, Some(Decimal::new(1000, 2)));
        assert_eq!(price.max_price, Some(Decimal::new(2550, 2)));

        let pages = db.pages_stats().await.success().unwrap();
        assert_eq!(pages.total_pages, Some(301));
        assert_eq!(pages.average_pages, Some(Decimal::new(1505, 1)));
        assert_eq!(pages.total_books, 2);
        assert_eq!(pages.min_pages, Some(100));
        assert_eq!(pages.max_pages, Some(201));
    }

    #[tokio::test]
    async fn oversized_prices_never_reach_statistics() {
        let db = InMemoryDatabase::new();
        let huge = CreateBookDto {
            price: Some(Decimal::from_str_exact("50000000000000000000000000000").unwrap()),
            ..create_dto("1", 100, 0)
        };
        for isbn in ["1", "2"] {
            let dto = CreateBookDto {
                isbn: Some(isbn.to_string()),
                ..huge.clone()
            };
            let failure = db.create_book(dto).await.failure().unwrap();
            assert_eq!(failure.kind(), KernelError::ConstraintViolation);
        }

        let price = db.price_stats().await.success().unwrap();
        assert_eq!(price.total_books, 0);
    }
}
