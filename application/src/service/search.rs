use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery, NumericField, Predicate};
use kernel::KernelError;

use crate::envelope::Envelope;
use crate::transfer::{FoundBooksDto, SearchBookDto};

#[async_trait::async_trait]
pub trait SearchBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery
{
    async fn search_books(
        &self,
        field: NumericField,
        dto: SearchBookDto,
    ) -> Envelope<FoundBooksDto> {
        let predicate = Predicate::build(field, dto.value, dto.operator.as_deref());
        tracing::debug!(?predicate, "searching books");
        let result: error_stack::Result<FoundBooksDto, KernelError> = async {
            let mut connection = self.database_connection().transact().await?;
            let books = self
                .book_query()
                .find_by_predicate(&mut connection, &predicate)
                .await?;
            Ok(FoundBooksDto::from(books))
        }
        .await;
        Envelope::from(result)
    }

    async fn find_by_year(&self, dto: SearchBookDto) -> Envelope<FoundBooksDto> {
        self.search_books(NumericField::PublicationYear, dto).await
    }

    async fn find_by_pages(&self, dto: SearchBookDto) -> Envelope<FoundBooksDto> {
        self.search_books(NumericField::Pages, dto).await
    }
}

impl<T> SearchBookService for T where T: DependOnDatabaseConnection + DependOnBookQuery {}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use driver::database::InMemoryDatabase;

    use crate::service::{CreateBookService, DeleteBookService, GetBookService, SearchBookService};
    use crate::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, SearchBookDto};

    fn create_dto(isbn: &str, year: i32, pages: i32) -> CreateBookDto {
        CreateBookDto {
            title: Some("T".to_string()),
            author: Some("Au".to_string()),
            isbn: Some(isbn.to_string()),
            publication_year: Some(year),
            pages: Some(pages),
            price: Some(Decimal::new(999, 2)),
            genre: Some("G".to_string()),
            publisher: Some("P".to_string()),
        }
    }

    fn search(value: i32, operator: Option<&str>) -> SearchBookDto {
        SearchBookDto {
            value,
            operator: operator.map(str::to_string),
        }
    }

    async fn years(db: &InMemoryDatabase, value: i32, operator: Option<&str>) -> Vec<i32> {
        let found = db.find_by_year(search(value, operator)).await.success().unwrap();
        assert_eq!(found.count, found.books.len());
        found.books.iter().map(|book| book.publication_year).collect()
    }

    async fn pages(db: &InMemoryDatabase, value: i32, operator: Option<&str>) -> Vec<i32> {
        let found = db.find_by_pages(search(value, operator)).await.success().unwrap();
        assert_eq!(found.count, found.books.len());
        found.books.iter().map(|book| book.pages).collect()
    }

    #[tokio::test]
    async fn comparison_laws() {
        let db = InMemoryDatabase::new();
        for (isbn, year, page) in [("1", 1990, 120), ("2", 2000, 250), ("3", 2010, 400)] {
            db.create_book(create_dto(isbn, year, page)).await.success().unwrap();
        }

        assert_eq!(years(&db, 2000, Some("gt")).await, vec![2010]);
        assert_eq!(years(&db, 2000, Some("lt")).await, vec![1990]);
        assert_eq!(years(&db, 2000, Some("gte")).await, vec![2000, 2010]);
        assert_eq!(years(&db, 2000, Some("lte")).await, vec![1990, 2000]);
        assert_eq!(years(&db, 2000, None).await, vec![2000]);
        assert_eq!(years(&db, 2000, Some("like")).await, vec![2000]);
        assert!(years(&db, 1995, None).await.is_empty());

        assert_eq!(pages(&db, 250, Some("gt")).await, vec![400]);
        assert_eq!(pages(&db, 250, Some("lt")).await, vec![120]);
        assert_eq!(pages(&db, 250, Some("gte")).await, vec![250, 400]);
        assert_eq!(pages(&db, 250, Some("lte")).await, vec![120, 250]);
        assert_eq!(pages(&db, 250, Some("eq")).await, vec![250]);
        assert!(pages(&db, 5000, Some("gt")).await.is_empty());
    }

    #[tokio::test]
    async fn catalog_scenario() {
        let db = InMemoryDatabase::new();
        let created = db
            .create_book(create_dto("123", 2020, 200))
            .await
            .success()
            .unwrap();

        let after_2019 = db.find_by_year(search(2019, Some("gt"))).await.success().unwrap();
        assert!(after_2019.books.contains(&created));
        let after_2020 = db.find_by_year(search(2020, Some("gt"))).await.success().unwrap();
        assert!(!after_2020.books.contains(&created));
        assert_eq!(after_2020.count, 0);

        let deleted = db.delete_book(DeleteBookDto { id: created.id }).await;
        assert_eq!(deleted.success().map(|dto| dto.id), Some(created.id));

        let failure = db.get_book(GetBookDto { id: created.id }).await.failure().unwrap();
        assert_eq!(failure.message(), format!("No book with ID {}", created.id));
    }
}
