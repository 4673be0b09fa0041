mod book;
mod envelope;

pub use self::{book::*, envelope::*};
