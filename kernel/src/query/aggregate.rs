use destructure::Destructure;
use error_stack::Report;
use rust_decimal::Decimal;
use vodca::References;

use crate::entity::Book;
use crate::KernelError;

/// Numeric book attributes that can be aggregated.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AggregateField {
    Price,
    Pages,
}

impl AggregateField {
    pub fn value_of(&self, book: &Book) -> Decimal {
        match self {
            AggregateField::Price => *book.price().as_ref(),
            AggregateField::Pages => Decimal::from(*book.pages().as_ref()),
        }
    }
}

/// Sum, average, count, minimum and maximum of one field over the whole catalog.
///
/// Every statistic except `count` is `None` when the catalog is empty.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Aggregation {
    sum: Option<Decimal>,
    average: Option<Decimal>,
    count: i64,
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl Aggregation {
    pub fn new(
        sum: Option<Decimal>,
        average: Option<Decimal>,
        count: i64,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> Self {
        Self {
            sum,
            average,
            count,
            min,
            max,
        }
    }

    /// Fails with [`KernelError::Internal`] when the running sum leaves the `Decimal` range.
    pub fn over<I>(values: I) -> error_stack::Result<Self, KernelError>
    where
        I: IntoIterator<Item = Decimal>,
    {
        let mut values = values.into_iter();
        let Some(first) = values.next() else {
            return Ok(Self::new(None, None, 0, None, None));
        };
        let (sum, count, min, max) = values.try_fold(
            (first, 1i64, first, first),
            |(sum, count, min, max), value| {
                let sum = sum.checked_add(value).ok_or_else(|| {
                    Report::new(KernelError::Internal)
                        .attach_printable(format!("sum overflowed after {count} values"))
                })?;
                Ok::<_, Report<KernelError>>((sum, count + 1, min.min(value), max.max(value)))
            },
        )?;
        let average = sum / Decimal::from(count);
        Ok(Self::new(Some(sum), Some(average), count, Some(min), Some(max)))
    }
}
