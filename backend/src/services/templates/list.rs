use crate::services::ApiError;
use crate::storage::TemplateStore;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::template::CATEGORIES;
use common::requests::ListTemplatesQuery;

/// Actix web handler for `GET /api/templates`.
///
/// Without a query string every template is returned, ordered by name.
/// `?category=Financial%20Fraud` restricts the list to one category and
/// `?search=invoice` to templates whose name or subject contains the term,
/// ignoring case. Both can be combined.
pub async fn process(
    query: web::Query<ListTemplatesQuery>,
    store: web::Data<dyn TemplateStore>,
) -> impl Responder {
    match store.find(&query) {
        Ok(templates) => HttpResponse::Ok().json(templates),
        Err(e) => ApiError::from(e).error_response(),
    }
}

/// Actix web handler for `GET /api/templates/categories`.
///
/// The categories offered by the settings form plus any other category in
/// use, sorted.
pub async fn categories(store: web::Data<dyn TemplateStore>) -> impl Responder {
    match all_categories(store.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => e.error_response(),
    }
}

fn all_categories(store: &dyn TemplateStore) -> Result<Vec<String>, ApiError> {
    let mut categories: Vec<String> = CATEGORIES.iter().map(|c| c.to_string()).collect();
    categories.extend(store.categories()?);
    categories.sort();
    categories.dedup();
    Ok(categories)
}
