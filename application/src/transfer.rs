mod book;
mod stats;

pub use self::{book::*, stats::*};
