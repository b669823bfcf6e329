use actix_web::dev::HttpServiceFactory;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse, ResponseError};

use askama::Template;

use serde::{Deserialize, Serialize};

use thiserror::Error;

use crate::client::{WaitlistClient, WaitlistStore};
use crate::controller::submission::{Phase, SubmitRejected, Submission};
use crate::domain::WaitlistEntry;
use crate::error::ErrorKind;
use crate::view::LandingPage;

/// Inline message for input the form guard rejects
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";

/// Form and JSON body for joining the waitlist
#[derive(Debug, Deserialize)]
pub struct JoinForm {
    #[serde(default)]
    email: String,
}

/// JSON error body of the waitlist API
#[derive(Debug, Serialize)]
struct FailureBody {
    error: &'static str,
    kind: String,
}

/// Landing page in its initial state
#[tracing::instrument(name = "Render landing page")]
#[get("/")]
async fn index() -> Result<HttpResponse, LandingError> {
    let submission = Submission::new();

    render(StatusCode::OK, LandingPage::new(&submission))
}

/// Form endpoint, re-renders the page with the outcome of the submission
#[tracing::instrument(name = "Join the waitlist from the form", skip(form, client))]
#[post("/waitlist")]
async fn join(
    client: web::Data<WaitlistClient>,
    form: web::Form<JoinForm>,
) -> Result<HttpResponse, LandingError> {
    let (submission, outcome) = submit_once(client.get_ref(), form.into_inner().email).await;

    match outcome {
        Outcome::Joined(_) => render(StatusCode::OK, LandingPage::new(&submission)),
        Outcome::Failed(kind) => render(status_for(kind), LandingPage::new(&submission)),
        Outcome::Invalid(reason) => {
            tracing::debug!(%reason, "Rejected waitlist form");
            render(
                StatusCode::BAD_REQUEST,
                LandingPage::new(&submission).with_error(INVALID_EMAIL),
            )
        }
    }
}

/// JSON endpoint, `201` with the stored entry
#[tracing::instrument(name = "Join the waitlist from the API", skip(body, client))]
#[post("/api/waitlist")]
async fn join_api(
    client: web::Data<WaitlistClient>,
    body: web::Json<JoinForm>,
) -> Result<HttpResponse, LandingError> {
    let (_, outcome) = submit_once(client.get_ref(), body.into_inner().email).await;

    match outcome {
        Outcome::Joined(entry) => Ok(HttpResponse::Created().json(entry)),
        Outcome::Failed(kind) => Ok(HttpResponse::build(status_for(kind)).json(FailureBody {
            error: kind.message(),
            kind: kind.to_string(),
        })),
        Outcome::Invalid(reason) => Err(LandingError::ParseError(reason)),
    }
}

/// How one request's submission settled
#[derive(Debug, PartialEq)]
enum Outcome {
    Joined(WaitlistEntry),
    Failed(ErrorKind),
    Invalid(String),
}

/// Run a fresh submission of `email` against `store` to completion
async fn submit_once<S>(store: &S, email: String) -> (Submission, Outcome)
where
    S: WaitlistStore + ?Sized,
{
    let mut submission = Submission::new();
    submission.input(email);

    let submitted = submission.submit(store).await;

    let outcome = match submitted {
        Err(SubmitRejected::Invalid(reason)) => Outcome::Invalid(reason),
        // A fresh submission is never in flight, and a settled one is never idle
        Ok(()) | Err(SubmitRejected::InFlight) => match submission.phase() {
            Phase::Success(entry) => Outcome::Joined(entry.clone()),
            Phase::Failed(kind) => Outcome::Failed(*kind),
            Phase::Idle | Phase::Submitting => Outcome::Failed(ErrorKind::Unknown),
        },
    };
    (submission, outcome)
}

fn render(status: StatusCode, page: LandingPage<'_>) -> Result<HttpResponse, LandingError> {
    let html = page.render()?;

    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(html))
}

/// Response status for a failed store call
fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::DuplicateEmail => StatusCode::CONFLICT,
        ErrorKind::Unknown | ErrorKind::ConfigurationMissing => StatusCode::BAD_GATEWAY,
    }
}

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("{0}")]
    ParseError(String),

    #[error("Internal Server Error")]
    RenderError(#[from] askama::Error),
}

impl ResponseError for LandingError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ParseError(_) => StatusCode::BAD_REQUEST,
            Self::RenderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Landing page and waitlist endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("")
        .service(index)
        .service(join)
        .service(join_api)
}
