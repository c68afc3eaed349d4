use crate::services::ApiError;
use crate::storage::TemplateStore;
use actix_web::{web, HttpResponse, Responder, ResponseError};

/// Actix web handler for `DELETE /api/templates/{template_id}`.
///
/// Returns `204 No Content` on success and `404 Not Found` for unknown ids.
/// Editing sessions opened from the template keep their draft; saving one of
/// them afterwards stores it as a new template.
pub async fn process(
    template_id: web::Path<String>,
    store: web::Data<dyn TemplateStore>,
) -> impl Responder {
    match delete_template(&template_id, store.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}

fn delete_template(template_id: &str, store: &dyn TemplateStore) -> Result<(), ApiError> {
    store.delete(template_id)?;
    Ok(())
}
