use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookId};
use crate::query::{AggregateField, Aggregation, Predicate};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    async fn find_by_predicate(
        &self,
        con: &mut Self::Transaction,
        predicate: &Predicate,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn aggregate(
        &self,
        con: &mut Self::Transaction,
        field: AggregateField,
    ) -> error_stack::Result<Aggregation, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
