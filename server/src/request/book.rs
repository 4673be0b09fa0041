use crate::controller::{Intake, TryIntake};
use crate::error::RequestRejection;
use application::transfer::{
    CreateBookDto, DeleteBookDto, GetBookDto, SearchBookDto, UpdateBookDto,
};
use rust_decimal::Decimal;
use serde::Deserialize;

// Every field is optional so that a missing one is reported by the catalog as a constraint
// violation instead of being rejected by the JSON extractor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    publication_year: Option<i32>,
    pages: Option<i32>,
    price: Option<Decimal>,
    genre: Option<String>,
    publisher: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    publication_year: Option<i32>,
    pages: Option<i32>,
    price: Option<Decimal>,
    genre: Option<String>,
    publisher: Option<String>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: i32,
}

impl GetBookRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i32,
}

impl DeleteBookRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

// Values stay as strings here so that a bad number is answered with the envelope shape.
#[derive(Debug, Deserialize)]
pub struct SearchByYearRequest {
    year: Option<String>,
    operator: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchByPagesRequest {
    pages: Option<String>,
    operator: Option<String>,
}

fn numeric_parameter(name: &str, raw: Option<String>) -> Result<i32, RequestRejection> {
    let raw = raw.ok_or_else(|| {
        RequestRejection::new(format!("Query parameter `{name}` is required"))
    })?;
    raw.trim().parse::<i32>().map_err(|_| {
        RequestRejection::new(format!(
            "Query parameter `{name}` must be an integer, got `{raw}`"
        ))
    })
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            publication_year: input.publication_year,
            pages: input.pages,
            price: input.price,
            genre: input.genre,
            publisher: input.publisher,
        }
    }
}

impl Intake<(i32, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, input: (i32, UpdateBookRequest)) -> Self::To {
        let (id, input) = input;
        UpdateBookDto {
            id,
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            publication_year: input.publication_year,
            pages: input.pages,
            price: input.price,
            genre: input.genre,
            publisher: input.publisher,
        }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

impl TryIntake<SearchByYearRequest> for BookTransformer {
    type To = SearchBookDto;
    type Error = RequestRejection;
    fn emit(&self, input: SearchByYearRequest) -> Result<Self::To, Self::Error> {
        Ok(SearchBookDto {
            value: numeric_parameter("year", input.year)?,
            operator: input.operator,
        })
    }
}

impl TryIntake<SearchByPagesRequest> for BookTransformer {
    type To = SearchBookDto;
    type Error = RequestRejection;
    fn emit(&self, input: SearchByPagesRequest) -> Result<Self::To, Self::Error> {
        Ok(SearchBookDto {
            value: numeric_parameter("pages", input.pages)?,
            operator: input.operator,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{numeric_parameter, BookTransformer, SearchByYearRequest};
    use crate::controller::TryIntake;

    #[test]
    fn numeric_parameters() {
        assert_eq!(numeric_parameter("year", Some(" 2020 ".to_string())).unwrap(), 2020);
        assert!(numeric_parameter("year", None).is_err());
        assert!(numeric_parameter("year", Some("twenty".to_string())).is_err());
        assert!(numeric_parameter("year", Some("20.5".to_string())).is_err());
    }

    #[test]
    fn operator_passes_through_untouched() {
        let request = SearchByYearRequest {
            year: Some("2019".to_string()),
            operator: Some("whatever".to_string()),
        };
        let dto = TryIntake::emit(&BookTransformer, request).unwrap();
        assert_eq!(dto.value, 2019);
        assert_eq!(dto.operator.as_deref(), Some("whatever"));
    }
}
