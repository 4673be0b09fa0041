use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::{PgConnection, Postgres, QueryBuilder};

use kernel::interface::query::{
    AggregateField, Aggregation, BookQuery, Comparison, NumericField, Predicate,
};
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookGenre, BookId, BookIsbn, BookPages, BookPatch, BookPrice,
    BookPublisher, BookTitle, PublicationYear,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_by_predicate(
        &self,
        con: &mut PostgresTransaction,
        predicate: &Predicate,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_predicate(con, predicate).await
    }

    async fn aggregate(
        &self,
        con: &mut PostgresTransaction,
        field: AggregateField,
    ) -> error_stack::Result<Aggregation, KernelError> {
        PgBookInternal::aggregate(con, field).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
        patch: &BookPatch,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::update(con, book_id, patch).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
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

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookIsbn::new(value.isbn),
            PublicationYear::new(value.publication_year),
            BookPages::new(value.pages),
            BookPrice::new(value.price),
            BookGenre::new(value.genre),
            BookPublisher::new(value.publisher),
        )
    }
}

#[derive(sqlx::FromRow)]
struct AggregationRow {
    sum: Option<Decimal>,
    average: Option<Decimal>,
    count: i64,
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl From<AggregationRow> for Aggregation {
    fn from(value: AggregationRow) -> Self {
        Aggregation::new(value.sum, value.average, value.count, value.min, value.max)
    }
}

const BOOK_COLUMNS: &str =
    "id, title, author, isbn, publication_year, pages, price, genre, publisher";

fn numeric_column(field: &NumericField) -> &'static str {
    match field {
        NumericField::PublicationYear => "publication_year",
        NumericField::Pages => "pages",
    }
}

fn aggregate_column(field: &AggregateField) -> &'static str {
    match field {
        AggregateField::Price => "price",
        AggregateField::Pages => "pages",
    }
}

fn sql_operator(comparison: &Comparison) -> &'static str {
    match comparison {
        Comparison::Gt => ">",
        Comparison::Lt => "<",
        Comparison::Gte => ">=",
        Comparison::Lte => "<=",
        Comparison::Eq => "=",
    }
}

fn text<T: AsRef<String>>(value: &Option<T>) -> Option<&str> {
    value.as_ref().map(|value| value.as_ref().as_str())
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    #[tracing::instrument(skip(con))]
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, isbn, publication_year, pages, price, genre, publisher
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, isbn, publication_year, pages, price, genre, publisher
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_predicate(
        con: &mut PgConnection,
        predicate: &Predicate,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        // Column and operator come from closed enums; the value is always bound.
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query
            .push(BOOK_COLUMNS)
            .push(" FROM books WHERE ")
            .push(numeric_column(predicate.field()))
            .push(" ")
            .push(sql_operator(predicate.comparison()))
            .push(" ")
            .push_bind(*predicate.value())
            .push(" ORDER BY id");
        let rows = query
            .build_query_as::<BookRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    #[tracing::instrument(skip(con))]
    async fn aggregate(
        con: &mut PgConnection,
        field: AggregateField,
    ) -> error_stack::Result<Aggregation, KernelError> {
        let column = aggregate_column(&field);
        let sql = format!(
            // language=postgresql
            r#"
            SELECT SUM({column})::NUMERIC AS sum,
                   AVG({column})::NUMERIC AS average,
                   COUNT({column})        AS count,
                   MIN({column})::NUMERIC AS min,
                   MAX({column})::NUMERIC AS max
            FROM books
            "#
        );
        let row = sqlx::query_as::<_, AggregationRow>(&sql)
            .fetch_one(con)
            .await
            .convert_error()?;
        Ok(Aggregation::from(row))
    }

    #[tracing::instrument(skip(con))]
    async fn create(
        con: &mut PgConnection,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            INSERT INTO books
                (title, author, isbn, publication_year, pages, price, genre, publisher)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, author, isbn, publication_year, pages, price, genre, publisher
            "#,
        )
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.isbn().as_ref())
        .bind(book.publication_year().as_ref())
        .bind(book.pages().as_ref())
        .bind(book.price().as_ref())
        .bind(book.genre().as_ref())
        .bind(book.publisher().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Book::from(row))
    }

    #[tracing::instrument(skip(con))]
    async fn update(
        con: &mut PgConnection,
        book_id: &BookId,
        patch: &BookPatch,
    ) -> error_stack::Result<Book, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET title            = COALESCE($2, title),
                author           = COALESCE($3, author),
                isbn             = COALESCE($4, isbn),
                publication_year = COALESCE($5, publication_year),
                pages            = COALESCE($6, pages),
                price            = COALESCE($7, price),
                genre            = COALESCE($8, genre),
                publisher        = COALESCE($9, publisher)
            WHERE id = $1
            RETURNING id, title, author, isbn, publication_year, pages, price, genre, publisher
            "#,
        )
        .bind(book_id.as_ref())
        .bind(text(patch.title()))
        .bind(text(patch.author()))
        .bind(text(patch.isbn()))
        .bind(patch.publication_year().map(i32::from))
        .bind(patch.pages().map(i32::from))
        .bind(patch.price().map(Decimal::from))
        .bind(text(patch.genre()))
        .bind(text(patch.publisher()))
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::from).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("No book with ID {book_id}"))
        })
    }

    #[tracing::instrument(skip(con))]
    async fn delete(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No book with ID {book_id}")));
        }
        Ok(())
    }
}
