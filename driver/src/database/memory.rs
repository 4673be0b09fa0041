use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

pub use self::book::*;

mod book;

pub(in crate::database) type BookTable = BTreeMap<BookId, Book>;

/// Process-local record store.
///
/// Transactions are serialised: each one holds the table lock until it is committed or dropped,
/// and works on a staged copy that only replaces the table on commit. Ids come from a counter
/// that, like a database sequence, is not rewound by a rollback.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    table: Arc<Mutex<BookTable>>,
    sequence: Arc<AtomicI32>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = self.table.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTransaction {
            guard,
            staged,
            sequence: self.sequence.clone(),
        })
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<BookTable>,
    staged: BookTable,
    sequence: Arc<AtomicI32>,
}

impl InMemoryTransaction {
    pub(in crate::database) fn table(&self) -> &BookTable {
        &self.staged
    }

    pub(in crate::database) fn table_mut(&mut self) -> &mut BookTable {
        &mut self.staged
    }

    pub(in crate::database) fn next_id(&self) -> BookId {
        BookId::new(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let InMemoryTransaction {
            mut guard, staged, ..
        } = self;
        *guard = staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}
