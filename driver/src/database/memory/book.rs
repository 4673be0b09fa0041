use error_stack::Report;

use kernel::interface::query::{AggregateField, Aggregation, BookQuery, Predicate};
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookDraft, BookId, BookIsbn, BookPatch, BookPrice};
use kernel::KernelError;

use crate::database::memory::{BookTable, InMemoryTransaction};

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.table().values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.table().get(id).cloned())
    }

    async fn find_by_predicate(
        &self,
        con: &mut InMemoryTransaction,
        predicate: &Predicate,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con
            .table()
            .values()
            .filter(|book| predicate.matches(book))
            .cloned()
            .collect())
    }

    async fn aggregate(
        &self,
        con: &mut InMemoryTransaction,
        field: AggregateField,
    ) -> error_stack::Result<Aggregation, KernelError> {
        Aggregation::over(con.table().values().map(|book| field.value_of(book)))
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        ensure_price_fits(book.price())?;
        ensure_unique_isbn(con.table(), book.isbn(), None)?;
        let book = Book::from_draft(con.next_id(), book.clone());
        con.table_mut().insert(*book.id(), book.clone());
        Ok(book)
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
        patch: &BookPatch,
    ) -> error_stack::Result<Book, KernelError> {
        let current = con.table().get(book_id).cloned().ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("No book with ID {book_id}"))
        })?;
        if let Some(price) = patch.price() {
            ensure_price_fits(price)?;
        }
        if let Some(isbn) = patch.isbn() {
            ensure_unique_isbn(con.table(), isbn, Some(book_id))?;
        }
        let book = current.patched(patch.clone());
        con.table_mut().insert(*book_id, book.clone());
        Ok(book)
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        con.table_mut().remove(book_id).map(|_| ()).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("No book with ID {book_id}"))
        })
    }
}

fn ensure_unique_isbn(
    table: &BookTable,
    isbn: &BookIsbn,
    except: Option<&BookId>,
) -> error_stack::Result<(), KernelError> {
    let taken = table
        .values()
        .any(|book| book.isbn() == isbn && Some(book.id()) != except);
    if taken {
        return Err(Report::new(KernelError::ConstraintViolation).attach_printable(format!(
            "duplicate key value violates unique constraint: isbn {} already exists",
            isbn.as_ref()
        )));
    }
    Ok(())
}

fn ensure_price_fits(price: &BookPrice) -> error_stack::Result<(), KernelError> {
    if !price.fits() {
        return Err(Report::new(KernelError::ConstraintViolation).attach_printable(format!(
            "numeric field overflow: price {} does not fit NUMERIC(10, 2)",
            price.as_ref()
        )));
    }
    Ok(())
}
