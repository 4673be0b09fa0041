use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookDraft, BookId, BookPatch};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Stores `book` and returns it with the id the store assigned.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError>;
    /// Fails with [`KernelError::NotFound`] when no book has `book_id`.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
        patch: &BookPatch,
    ) -> error_stack::Result<Book, KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
