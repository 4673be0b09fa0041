use error_stack::Report;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use kernel::interface::query::{Aggregation, DestructAggregation};
use kernel::KernelError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PriceStatsDto {
    pub total_price: Option<Decimal>,
    pub average_price: Option<Decimal>,
    pub total_books: i64,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl From<Aggregation> for PriceStatsDto {
    fn from(value: Aggregation) -> Self {
        let DestructAggregation {
            sum,
            average,
            count,
            min,
            max,
        } = value.into_destruct();
        Self {
            total_price: sum,
            average_price: average,
            total_books: count,
            min_price: min,
            max_price: max,
        }
    }
}

/// Page statistics keep integer semantics except for the average.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PagesStatsDto {
    pub total_pages: Option<i64>,
    pub average_pages: Option<Decimal>,
    pub total_books: i64,
    pub min_pages: Option<i32>,
    pub max_pages: Option<i32>,
}

impl TryFrom<Aggregation> for PagesStatsDto {
    type Error = Report<KernelError>;
    fn try_from(value: Aggregation) -> Result<Self, Self::Error> {
        let DestructAggregation {
            sum,
            average,
            count,
            min,
            max,
        } = value.into_destruct();
        Ok(Self {
            total_pages: integral("totalPages", sum, Decimal::to_i64)?,
            average_pages: average,
            total_books: count,
            min_pages: integral("minPages", min, Decimal::to_i32)?,
            max_pages: integral("maxPages", max, Decimal::to_i32)?,
        })
    }
}

fn integral<T>(
    name: &str,
    value: Option<Decimal>,
    convert: impl Fn(&Decimal) -> Option<T>,
) -> Result<Option<T>, Report<KernelError>> {
    value
        .map(|value| {
            Some(value)
                .filter(|value| value.fract().is_zero())
                .and_then(|value| convert(&value))
                .ok_or_else(|| {
                    Report::new(KernelError::Internal)
                        .attach_printable(format!("{name} is not an integer: {value}"))
                })
        })
        .transpose()
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use kernel::interface::query::Aggregation;
    use kernel::KernelError;

    use super::{PagesStatsDto, PriceStatsDto};

    #[test]
    fn empty_price_stats_are_null() {
        let stats = PriceStatsDto::from(Aggregation::over(Vec::new()).unwrap());
        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.total_price, None);
        assert_eq!(stats.average_price, None);
        assert_eq!(stats.min_price, None);
        assert_eq!(stats.max_price, None);
    }

    #[test]
    fn pages_stats_are_integers() {
        let aggregation =
            Aggregation::over(vec![Decimal::from(120), Decimal::from(301)]).unwrap();
        let stats = PagesStatsDto::try_from(aggregation).unwrap();
        assert_eq!(stats.total_pages, Some(421));
        assert_eq!(stats.average_pages, Some(Decimal::new(2105, 1)));
        assert_eq!(stats.total_books, 2);
        assert_eq!(stats.min_pages, Some(120));
        assert_eq!(stats.max_pages, Some(301));
    }

    #[test]
    fn fractional_page_total_is_internal_error() {
        let aggregation = Aggregation::new(Some(Decimal::new(15, 1)), None, 1, None, None);
        let report = PagesStatsDto::try_from(aggregation).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
