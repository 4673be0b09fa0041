use vodca::References;

use crate::entity::Book;

/// Numeric book attributes that can be filtered on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum NumericField {
    PublicationYear,
    Pages,
}

impl NumericField {
    pub fn value_of(&self, book: &Book) -> i32 {
        match self {
            NumericField::PublicationYear => *book.publication_year().as_ref(),
            NumericField::Pages => *book.pages().as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum Comparison {
    Gt,
    Lt,
    Gte,
    Lte,
    #[default]
    Eq,
}

impl Comparison {
    /// Maps an operator token onto a comparison.
    ///
    /// Only `gt`, `lt`, `gte` and `lte` are recognised. A missing or unknown token falls back
    /// to equality instead of being rejected.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("gt") => Comparison::Gt,
            Some("lt") => Comparison::Lt,
            Some("gte") => Comparison::Gte,
            Some("lte") => Comparison::Lte,
            _ => Comparison::Eq,
        }
    }

    pub fn holds<T: Ord>(&self, lhs: T, rhs: T) -> bool {
        match self {
            Comparison::Gt => lhs > rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Gte => lhs >= rhs,
            Comparison::Lte => lhs <= rhs,
            Comparison::Eq => lhs == rhs,
        }
    }
}

/// A single `field <comparison> value` filter.
#[derive(Debug, Clone, Copy, Eq, PartialEq, References)]
pub struct Predicate {
    field: NumericField,
    comparison: Comparison,
    value: i32,
}

impl Predicate {
    pub fn new(field: NumericField, comparison: Comparison, value: impl Into<i32>) -> Self {
        Self {
            field,
            comparison,
            value: value.into(),
        }
    }

    pub fn build(field: NumericField, value: impl Into<i32>, operator: Option<&str>) -> Self {
        Self::new(field, Comparison::from_token(operator), value)
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.comparison.holds(self.field.value_of(book), self.value)
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use crate::entity::{
        Book, BookAuthor, BookGenre, BookId, BookIsbn, BookPages, BookPrice, BookPublisher,
        BookTitle, PublicationYear,
    };

    use super::{Comparison, NumericField, Predicate};

    fn book(year: i32, pages: i32) -> Book {
        Book::new(
            BookId::new(1),
            BookTitle::new("T"),
            BookAuthor::new("Au"),
            BookIsbn::new("123"),
            PublicationYear::new(year),
            BookPages::new(pages),
            BookPrice::new(Decimal::new(999, 2)),
            BookGenre::new("G"),
            BookPublisher::new("P"),
        )
    }

    #[test]
    fn operator_tokens() {
        assert_eq!(Comparison::from_token(Some("gt")), Comparison::Gt);
        assert_eq!(Comparison::from_token(Some("lt")), Comparison::Lt);
        assert_eq!(Comparison::from_token(Some("gte")), Comparison::Gte);
        assert_eq!(Comparison::from_token(Some("lte")), Comparison::Lte);
        assert_eq!(Comparison::from_token(None), Comparison::Eq);
        assert_eq!(Comparison::from_token(Some("GT")), Comparison::Eq);
        assert_eq!(Comparison::from_token(Some("between")), Comparison::Eq);
        assert_eq!(Comparison::from_token(Some("")), Comparison::Eq);
    }

    #[test]
    fn year_predicates() {
        let book = book(2020, 200);
        let year = |value: i32, operator: Option<&str>| {
            Predicate::build(NumericField::PublicationYear, value, operator).matches(&book)
        };

        assert!(year(2019, Some("gt")));
        assert!(!year(2020, Some("gt")));
        assert!(year(2021, Some("lt")));
        assert!(!year(2020, Some("lt")));
        assert!(year(2020, Some("gte")));
        assert!(!year(2021, Some("gte")));
        assert!(year(2020, Some("lte")));
        assert!(!year(2019, Some("lte")));
        assert!(year(2020, None));
        assert!(!year(2019, None));
        assert!(year(2020, Some("unknown")));
        assert!(!year(2019, Some("unknown")));
    }

    #[test]
    fn pages_predicates() {
        let book = book(2020, 200);
        let pages = |value: i32, operator: Option<&str>| {
            Predicate::build(NumericField::Pages, value, operator).matches(&book)
        };

        assert!(pages(199, Some("gt")));
        assert!(!pages(200, Some("gt")));
        assert!(pages(200, Some("lte")));
        assert!(pages(200, None));
        assert!(!pages(2020, None));
    }
}
