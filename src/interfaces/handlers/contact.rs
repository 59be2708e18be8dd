use actix_web::{
    http::{header::ContentType, StatusCode},
    web, Error, HttpResponse, ResponseError,
};
use tracing::instrument;

use crate::{entities::contact::ContactForm, views, AppState};

const UNREADABLE_FORM: &str = "Data formulir tidak dapat dibaca. Silakan coba lagi.";

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(ContentType::html())
        .body(body)
}

pub async fn contact_form() -> HttpResponse {
    html(StatusCode::OK, views::contact_page(None, &ContactForm::default()))
}

pub async fn contact_after() -> HttpResponse {
    html(StatusCode::OK, views::contact_after_page())
}

/// Stores the message and renders the confirmation page. Failures re-render
/// the form with the submitted values filled back in.
#[instrument(skip(state, form))]
pub async fn submit_contact(
    state: web::Data<AppState>,
    form: Result<web::Form<ContactForm>, Error>,
) -> HttpResponse {
    // oversized or non-form bodies never reach the use case
    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            let status = e.as_response_error().status_code();
            tracing::info!(reason = %e, "Unreadable contact form");
            return html(status, views::contact_page(Some(UNREADABLE_FORM), &ContactForm::default()));
        }
    };

    match state.contact_handler.submit_contact_message(form.clone()).await {
        Ok(_) => html(StatusCode::OK, views::contact_after_page()),
        Err(e) => {
            if e.status_code().is_server_error() {
                tracing::error!(detail = e.detail().unwrap_or(""), "Failed to store contact message");
            } else {
                tracing::info!(reason = %e, email = %form.email, "Contact form rejected");
            }
            html(e.status_code(), views::contact_page(Some(&e.to_string()), &form))
        }
    }
}
