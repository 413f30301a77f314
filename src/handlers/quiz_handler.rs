use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use parking_lot::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::domain::SessionProgression,
    models::dto::request::{SelectQuizRequest, SubmitAnswerRequest},
    models::dto::response::{AckResponse, QuizListResponse},
};

pub const SESSION_COOKIE: &str = "quizboard_session";

struct SessionHandle {
    id: String,
    is_new: bool,
    progression: Arc<Mutex<SessionProgression>>,
}

fn find_session(state: &AppState, req: &HttpRequest) -> Option<SessionHandle> {
    let cookie = req.cookie(SESSION_COOKIE)?;
    let progression = state.sessions.get(cookie.value())?;
    Some(SessionHandle {
        id: cookie.value().to_string(),
        is_new: false,
        progression,
    })
}

fn create_session(state: &AppState, progression: SessionProgression) -> SessionHandle {
    let id = Uuid::new_v4().to_string();
    let progression = state.sessions.insert(&id, progression);
    SessionHandle {
        id,
        is_new: true,
        progression,
    }
}

/// Resolves the request's session, creating one on the first available
/// source when the cookie is absent or unknown. A new session is flagged so
/// the response can set the cookie.
fn obtain_session(state: &AppState, req: &HttpRequest) -> AppResult<SessionHandle> {
    match find_session(state, req) {
        Some(session) => Ok(session),
        None => Ok(create_session(
            state,
            state.session_service.new_progression()?,
        )),
    }
}

fn session_cookie(session_id: &str) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, session_id.to_string())
        .path("/")
        .http_only(true)
        .finish()
}

fn json_with_session<T: serde::Serialize>(session: &SessionHandle, payload: &T) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    if session.is_new {
        builder.cookie(session_cookie(&session.id));
    }
    builder.json(payload)
}

#[get("/api/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let files = state.session_service.list_sources()?;
    // Reported without creating a session, so the selection stays null
    // until the client actually starts playing.
    let selected = find_session(state.get_ref(), &req)
        .map(|session| session.progression.lock().bank_key().to_string());

    Ok(HttpResponse::Ok().json(QuizListResponse { files, selected }))
}

#[post("/api/select_quiz")]
pub async fn select_quiz(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<SelectQuizRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    // A fresh session starts directly on the requested source instead of
    // bootstrapping the default one first.
    let session = match find_session(state.get_ref(), &req) {
        Some(session) => session,
        None => create_session(
            state.get_ref(),
            state.session_service.progression_for(&request.filename)?,
        ),
    };
    let response = {
        let mut progression = session.progression.lock();
        state
            .session_service
            .select_source(&mut progression, &request.filename)?
    };
    Ok(json_with_session(&session, &response))
}

#[get("/api/question")]
pub async fn get_question(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = obtain_session(state.get_ref(), &req)?;
    let view = {
        let mut progression = session.progression.lock();
        state.session_service.current_view(&mut progression)?
    };
    Ok(json_with_session(&session, &view))
}

#[post("/api/answer")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let session = obtain_session(state.get_ref(), &req)?;
    let response = {
        let mut progression = session.progression.lock();
        state.session_service.submit_answer(
            &mut progression,
            &request.id,
            request.choice_index,
            request.participant(),
        )?
    };
    Ok(json_with_session(&session, &response))
}

#[post("/api/next")]
pub async fn advance(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let session = obtain_session(state.get_ref(), &req)?;
    {
        let mut progression = session.progression.lock();
        state.session_service.advance(&mut progression)?;
    }
    Ok(json_with_session(&session, &AckResponse { ok: true }))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
