mod aggregate;
mod book;
mod predicate;

pub use self::{aggregate::*, book::*, predicate::*};
