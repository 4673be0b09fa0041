use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{BookDraft, BookId, BookPatch};
use kernel::KernelError;

use crate::envelope::Envelope;
use crate::transfer::{
    BookDto, CreateBookDto, DeleteBookDto, DeletedBookDto, GetBookDto, UpdateBookDto,
};

pub(crate) fn not_found(id: &BookId) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("No book with ID {id}"))
}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery {
    async fn get_all_books(&self) -> Envelope<Vec<BookDto>> {
        let result: error_stack::Result<Vec<BookDto>, KernelError> = async {
            let mut connection = self.database_connection().transact().await?;
            let books = self.book_query().find_all(&mut connection).await?;
            Ok(books.into_iter().map(BookDto::from).collect())
        }
        .await;
        Envelope::from(result)
    }

    async fn get_book(&self, dto: GetBookDto) -> Envelope<BookDto> {
        let id = BookId::new(dto.id);
        let result: error_stack::Result<BookDto, KernelError> = async {
            let mut connection = self.database_connection().transact().await?;
            let book = self.book_query().find_by_id(&mut connection, &id).await?;
            book.map(BookDto::from).ok_or_else(|| not_found(&id))
        }
        .await;
        Envelope::from(result)
    }
}

impl<T> GetBookService for T where T: DependOnDatabaseConnection + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    async fn create_book(&self, dto: CreateBookDto) -> Envelope<BookDto> {
        let result: error_stack::Result<BookDto, KernelError> = async {
            let draft = BookDraft::try_from(dto)?;
            let mut connection = self.database_connection().transact().await?;
            let book = self
                .book_modifier()
                .create(&mut connection, &draft)
                .await?;
            connection.commit().await?;
            tracing::info!(id = %book.id(), "book created");
            Ok(BookDto::from(book))
        }
        .await;
        Envelope::from(result)
    }
}

impl<T> CreateBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
    async fn update_book(&self, dto: UpdateBookDto) -> Envelope<BookDto> {
        let id = BookId::new(dto.id);
        let result: error_stack::Result<BookDto, KernelError> = async {
            let mut connection = self.database_connection().transact().await?;
            if self
                .book_query()
                .find_by_id(&mut connection, &id)
                .await?
                .is_none()
            {
                return Err(not_found(&id));
            }
            let patch = BookPatch::try_from(dto)?;
            let book = self
                .book_modifier()
                .update(&mut connection, &id, &patch)
                .await?;
            connection.commit().await?;
            tracing::info!(%id, "book updated");
            Ok(BookDto::from(book))
        }
        .await;
        Envelope::from(result)
    }
}

impl<T> UpdateBookService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
    async fn delete_book(&self, dto: DeleteBookDto) -> Envelope<DeletedBookDto> {
        let id = BookId::new(dto.id);
        let result: error_stack::Result<DeletedBookDto, KernelError> = async {
            let mut connection = self.database_connection().transact().await?;
            if self
                .book_query()
                .find_by_id(&mut connection, &id)
                .await?
                .is_none()
            {
                return Err(not_found(&id));
            }
            self.book_modifier().delete(&mut connection, &id).await?;
            connection.commit().await?;
            tracing::info!(%id, "book deleted");
            Ok(DeletedBookDto { id: id.into() })
        }
        .await;
        Envelope::from(result)
    }
}

impl<T> DeleteBookService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnBookModifier
{
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use driver::database::InMemoryDatabase;
    use kernel::KernelError;

    use crate::service::{
        BookStatsService, CreateBookService, DeleteBookService, GetBookService,
        UpdateBookService,
    };
    use crate::transfer::{
        CreateBookDto, DeleteBookDto, DeletedBookDto, GetBookDto, UpdateBookDto,
    };

    fn create_dto(isbn: &str, cents: i64) -> CreateBookDto {
        CreateBookDto {
            title: Some("T".to_string()),
            author: Some("Au".to_string()),
            isbn: Some(isbn.to_string()),
            publication_year: Some(2020),
            pages: Some(200),
            price: Some(Decimal::new(cents, 2)),
            genre: Some("G".to_string()),
            publisher: Some("P".to_string()),
        }
    }

    #[tokio::test]
    async fn created_book_can_be_read_back() {
        let db = InMemoryDatabase::new();
        let created = db.create_book(create_dto("123", 999)).await.success().unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.isbn, "123");
        assert_eq!(created.price, Decimal::new(999, 2));

        let found = db.get_book(GetBookDto { id: created.id }).await;
        assert_eq!(found.success(), Some(created.clone()));

        let all = db.get_all_books().await.success().unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_and_untouched() {
        let db = InMemoryDatabase::new();
        let existing = db.create_book(create_dto("123", 999)).await.success().unwrap();

        let failure = db.get_book(GetBookDto { id: 42 }).await.failure().unwrap();
        assert_eq!(failure.kind(), KernelError::NotFound);
        assert_eq!(failure.message(), "No book with ID 42");

        let update = UpdateBookDto {
            id: 42,
            title: Some(String::new()),
            ..UpdateBookDto::default()
        };
        let failure = db.update_book(update).await.failure().unwrap();
        assert_eq!(failure.kind(), KernelError::NotFound);

        let failure = db.delete_book(DeleteBookDto { id: 42 }).await.failure().unwrap();
        assert_eq!(failure.kind(), KernelError::NotFound);

        assert_eq!(db.get_all_books().await.success(), Some(vec![existing]));
    }

    #[tokio::test]
    async fn update_changes_only_submitted_fields() {
        let db = InMemoryDatabase::new();
        let created = db.create_book(create_dto("123", 999)).await.success().unwrap();

        let update = UpdateBookDto {
            id: created.id,
            title: Some("Renamed".to_string()),
            price: Some(Decimal::new(1250, 2)),
            ..UpdateBookDto::default()
        };
        let updated = db.update_book(update).await.success().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.price, Decimal::new(1250, 2));
        assert_eq!(updated.author, created.author);
        assert_eq!(updated.isbn, created.isbn);
        assert_eq!(updated.pages, created.pages);

        let blank = UpdateBookDto {
            id: created.id,
            author: Some(" ".to_string()),
            ..UpdateBookDto::default()
        };
        let failure = db.update_book(blank).await.failure().unwrap();
        assert_eq!(failure.kind(), KernelError::ConstraintViolation);
        let found = db.get_book(GetBookDto { id: created.id }).await.success();
        assert_eq!(found, Some(updated));
    }

    #[tokio::test]
    async fn constraint_violations_carry_reason() {
        let db = InMemoryDatabase::new();
        db.create_book(create_dto("123", 999)).await.success().unwrap();

        let failure = db.create_book(create_dto("123", 100)).await.failure().unwrap();
        assert_eq!(failure.kind(), KernelError::ConstraintViolation);
        assert!(failure.message().contains("123"));

        let missing = CreateBookDto {
            title: None,
            ..create_dto("456", 100)
        };
        let failure = db.create_book(missing).await.failure().unwrap();
        assert_eq!(failure.kind(), KernelError::ConstraintViolation);
        assert!(failure.message().contains("title"));

        assert_eq!(db.get_all_books().await.success().map(|books| books.len()), Some(1));
    }

    #[tokio::test]
    async fn delete_is_not_repeatable() {
        let db = InMemoryDatabase::new();
        let created = db.create_book(create_dto("123", 999)).await.success().unwrap();

        let deleted = db.delete_book(DeleteBookDto { id: created.id }).await;
        assert_eq!(deleted.success(), Some(DeletedBookDto { id: created.id }));

        let again = db.delete_book(DeleteBookDto { id: created.id }).await;
        assert_eq!(again.failure().map(|f| f.kind()), Some(KernelError::NotFound));
    }

    #[tokio::test]
    async fn price_total_tracks_mutations() {
        let db = InMemoryDatabase::new();
        let a = db.create_book(create_dto("a", 999)).await.success().unwrap();
        let b = db.create_book(create_dto("b", 2001)).await.success().unwrap();
        db.create_book(create_dto("c", 500)).await.success().unwrap();

        db.update_book(UpdateBookDto {
            id: b.id,
            price: Some(Decimal::new(1000, 2)),
            ..UpdateBookDto::default()
        })
        .await
        .success()
        .unwrap();
        db.delete_book(DeleteBookDto { id: a.id }).await.success().unwrap();

        let books = db.get_all_books().await.success().unwrap();
        let expected: Decimal = books.iter().map(|book| book.price).sum();
        let stats = db.price_stats().await.success().unwrap();
        assert_eq!(stats.total_price, Some(expected));
        assert_eq!(stats.total_price, Some(Decimal::new(1500, 2)));
        assert_eq!(stats.total_books, 2);
    }
}
