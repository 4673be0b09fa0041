use crate::controller::Controller;
use crate::error::RequestRejection;
use crate::handler::AppModule;
use crate::request::{
    BookTransformer, CreateBookRequest, DeleteBookRequest, GetBookRequest, SearchByPagesRequest,
    SearchByYearRequest, UpdateBookRequest,
};
use crate::response::{BookPresenter, CreatedBookPresenter, UpdatedBookPresenter};
use application::service::{
    BookStatsService, CatalogService, CreateBookService, DeleteBookService, GetBookService,
    SearchBookService, UpdateBookService,
};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Extractor whose failure is answered with the envelope shape.
type Checked<E> = WithRejection<E, RequestRejection>;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D: CatalogService> BookRouter for Router<AppModule<D>> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| async move { module.database().get_all_books().await })
                    .await
            })
            .post(
                |State(module): State<AppModule<D>>,
                 WithRejection(Json(req), _): Checked<Json<CreateBookRequest>>| async move {
                    Controller::new(BookTransformer, CreatedBookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().create_book(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Checked<Path<i32>>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBookRequest::new(id))
                        .handle(|dto| async move { module.database().get_book(dto).await })
                        .await
                },
            )
            .put(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Checked<Path<i32>>,
                 WithRejection(Json(req), _): Checked<Json<UpdateBookRequest>>| async move {
                    Controller::new(BookTransformer, UpdatedBookPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.database().update_book(dto).await })
                        .await
                },
            )
            .delete(
                |State(module): State<AppModule<D>>,
                 WithRejection(Path(id), _): Checked<Path<i32>>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(DeleteBookRequest::new(id))
                        .handle(|dto| async move { module.database().delete_book(dto).await })
                        .await
                },
            ),
        )
        .route(
            "/books/search/year",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(req), _): Checked<Query<SearchByYearRequest>>| async move {
                    let transformed =
                        Controller::new(BookTransformer, BookPresenter).try_intake(req)?;
                    Ok::<_, RequestRejection>(
                        transformed
                            .handle(|dto| async move { module.database().find_by_year(dto).await })
                            .await,
                    )
                },
            ),
        )
        .route(
            "/books/search/pages",
            get(
                |State(module): State<AppModule<D>>,
                 WithRejection(Query(req), _): Checked<Query<SearchByPagesRequest>>| async move {
                    let transformed =
                        Controller::new(BookTransformer, BookPresenter).try_intake(req)?;
                    Ok::<_, RequestRejection>(
                        transformed
                            .handle(|dto| async move { module.database().find_by_pages(dto).await })
                            .await,
                    )
                },
            ),
        )
        .route(
            "/books/stats/price",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| async move { module.database().price_stats().await })
                    .await
            }),
        )
        .route(
            "/books/stats/pages",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| async move { module.database().pages_stats().await })
                    .await
            }),
        )
    }
}

/// The full HTTP surface, mounted under `/api`.
pub fn router<D: CatalogService>(module: AppModule<D>) -> Router {
    Router::new()
        .nest("/api", Router::<AppModule<D>>::new().route_book())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(module)
}
