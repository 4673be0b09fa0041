use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::error::ErrorKind;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::book::*;

mod book;

static POSTGRES_URL: &str = "POSTGRES_URL";

// numeric_value_out_of_range, raised when a price does not fit NUMERIC(10, 2)
const NUMERIC_OUT_OF_RANGE: &str = "22003";

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    /// Connects to `POSTGRES_URL` and brings the schema up to date.
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| "Failed to migrate books schema")?;
        tracing::info!("connected to postgres");
        Ok(Self { pool })
    }
}

impl Clone for PostgresDatabase {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let con = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(con))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        DerefMut::deref_mut(&mut self.0)
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

fn error_context(error: &Error) -> KernelError {
    match error {
        Error::PoolTimedOut => KernelError::Timeout,
        Error::Io(_) | Error::Tls(_) | Error::PoolClosed | Error::WorkerCrashed => {
            KernelError::StoreUnavailable
        }
        Error::Database(database) => match database.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation
            | ErrorKind::ForeignKeyViolation => KernelError::ConstraintViolation,
            _ if database.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) => {
                KernelError::ConstraintViolation
            }
            _ => KernelError::Internal,
        },
        _ => KernelError::Internal,
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = error_context(&error);
            let reason = match &error {
                Error::Database(database) => database.message().to_string(),
                other => other.to_string(),
            };
            Report::from(error)
                .change_context(context)
                .attach_printable(reason)
        })
    }
}
