use std::ops::Deref;
use std::sync::Arc;

pub struct AppModule<D>(Arc<Handler<D>>);

impl<D> AppModule<D> {
    pub fn new(database: D) -> Self {
        Self(Arc::new(Handler::init(database)))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

/// Long-lived dependencies shared by every request.
pub struct Handler<D> {
    database: D,
}

impl<D> Handler<D> {
    pub fn init(database: D) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &D {
        &self.database
    }
}
