use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::{
    Form,
    cookie::{Cookie, CookieJar},
};
use karte_flow::{
    GeneratedContent, InMemorySessionStorage, Session, SessionStorage, ShopDirectory,
    TreatmentInfo, WizardState, compose_message, token,
};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{config::AppConfig, dify::GenerationClient, templates::render_page};

/// Name of the session cookie
const SESSION_COOKIE: &str = "karte_session";

#[derive(Clone)]
pub struct AppState {
    pub shops: Arc<ShopDirectory>,
    pub sessions: Arc<dyn SessionStorage>,
    pub generator: Arc<GenerationClient>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            shops: Arc::new(ShopDirectory::builtin()),
            sessions: Arc::new(InMemorySessionStorage::new()),
            generator: Arc::new(GenerationClient::new(&config)),
            config: Arc::new(config),
        }
    }
}

/// Build the wizard router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(select_shop_page))
        .route("/set_shop", post(set_shop))
        .route("/input", get(input_page))
        .route("/generate", post(generate))
        .route("/result", get(result_page))
        .route("/update_shop_url", post(update_shop_url))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SetShopForm {
    #[serde(default)]
    shop_id: Option<String>,
}

/// Treatment-input form fields. All optional; empty submissions are
/// tolerated and flow through as empty strings.
#[derive(Debug, Deserialize)]
struct GenerateForm {
    #[serde(default)]
    services: Vec<String>,
    #[serde(default)]
    style_request: String,
    #[serde(default)]
    special_tech: String,
    #[serde(default)]
    hair_length: String,
    #[serde(default)]
    hair_firmness: String,
    #[serde(default)]
    stylist_name: String,
}

#[derive(Debug, Deserialize)]
struct UpdateShopUrlRequest {
    #[serde(default)]
    shop_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct UpdateShopUrlResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    salon_name: Option<String>,
}

async fn health_check() -> &'static str {
    "OK"
}

/// Step 1: shop selection.
async fn select_shop_page(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    render_page("select_shop.html", context! { shops => state.shops.all() })
}

/// Bind the selected shop to the session and move to the input step.
async fn set_shop(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SetShopForm>,
) -> Result<(CookieJar, Redirect), StatusCode> {
    let Some(shop) = form
        .shop_id
        .as_deref()
        .and_then(|id| state.shops.get(id))
        .cloned()
    else {
        info!(shop_id = ?form.shop_id, "unknown shop id selected, returning to shop list");
        return Ok((jar, Redirect::to("/")));
    };

    let (jar, mut session) = load_or_create_session(&state, jar).await?;
    info!(session_id = %session.id, shop_id = %shop.id, "shop selected");
    session.select_shop(shop);
    save_session(&state, session).await?;
    Ok((jar, Redirect::to("/input")))
}

/// Step 2: treatment input. Retreats to shop selection without a bound shop.
async fn input_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let session = match guard_step(&state, &jar, WizardState::ShopSelected).await {
        Ok(StepGuard::Granted(session)) => session,
        Ok(StepGuard::Retreat(redirect)) => return redirect.into_response(),
        Err(status) => return status.into_response(),
    };
    render_page("input_info.html", context! { shop => session.shop }).into_response()
}

/// Run generation over the submitted treatment fields and store the result.
async fn generate(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<GenerateForm>,
) -> Response {
    let mut session = match guard_step(&state, &jar, WizardState::ShopSelected).await {
        Ok(StepGuard::Granted(session)) => session,
        Ok(StepGuard::Retreat(redirect)) => return redirect.into_response(),
        Err(status) => return status.into_response(),
    };

    let treatment_info = TreatmentInfo {
        services: form.services,
        style: form.style_request,
        tech: form.special_tech,
        hair_type: format!("{}, {}", form.hair_length, form.hair_firmness),
        stylist: form.stylist_name,
    };

    info!(
        session_id = %session.id,
        services = %treatment_info.services_display(),
        "generating proposal"
    );
    let ai_proposal = state.generator.propose(&treatment_info).await;

    session.store_content(GeneratedContent {
        treatment_info,
        ai_proposal,
    });
    if let Err(status) = save_session(&state, session).await {
        return status.into_response();
    }
    Redirect::to("/result").into_response()
}

/// Step 3: show the composed message for editing and copying.
async fn result_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let session = match guard_step(&state, &jar, WizardState::ContentGenerated).await {
        Ok(StepGuard::Granted(session)) => session,
        Ok(StepGuard::Retreat(redirect)) => return redirect.into_response(),
        Err(status) => return status.into_response(),
    };
    let (Some(shop), Some(content)) = (session.shop.as_ref(), session.content.as_ref()) else {
        return Redirect::to("/").into_response();
    };

    let full_text = compose_message(shop, content);
    render_page(
        "result.html",
        context! { shop, shops => state.shops.all(), full_text },
    )
    .into_response()
}

/// JSON helper for the result page: switch the session's shop and return
/// the new review URL.
async fn update_shop_url(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<UpdateShopUrlRequest>,
) -> Result<(CookieJar, (StatusCode, Json<UpdateShopUrlResponse>)), StatusCode> {
    let Some(shop) = request
        .shop_id
        .as_deref()
        .and_then(|id| state.shops.get(id))
        .cloned()
    else {
        info!(shop_id = ?request.shop_id, "update_shop_url with unknown shop id");
        return Ok((
            jar,
            (
                StatusCode::BAD_REQUEST,
                Json(UpdateShopUrlResponse {
                    success: false,
                    url: None,
                    salon_name: None,
                }),
            ),
        ));
    };

    // Keep the session consistent so a reload shows the same shop
    let (jar, mut session) = load_or_create_session(&state, jar).await?;
    session.select_shop(shop.clone());
    save_session(&state, session).await?;

    Ok((
        jar,
        (
            StatusCode::OK,
            Json(UpdateShopUrlResponse {
                success: true,
                url: Some(shop.url),
                salon_name: Some(shop.salon_name),
            }),
        ),
    ))
}

/// Result of the wizard-state check at the top of a step handler
enum StepGuard {
    /// The session has reached the required step
    Granted(Session),
    /// Required session data is missing; retreat to shop selection
    Retreat(Redirect),
}

async fn guard_step(
    state: &AppState,
    jar: &CookieJar,
    required: WizardState,
) -> Result<StepGuard, StatusCode> {
    let Some(session) = load_session(state, jar).await? else {
        return Ok(StepGuard::Retreat(Redirect::to("/")));
    };
    if session.wizard_state() >= required {
        Ok(StepGuard::Granted(session))
    } else {
        Ok(StepGuard::Retreat(Redirect::to("/")))
    }
}

async fn load_session(state: &AppState, jar: &CookieJar) -> Result<Option<Session>, StatusCode> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    let Some(session_id) = token::verify(&state.config.session_secret, cookie.value()) else {
        return Ok(None);
    };
    state.sessions.get(session_id).await.map_err(|e| {
        error!(error = %e, "failed to load session");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn load_or_create_session(
    state: &AppState,
    jar: CookieJar,
) -> Result<(CookieJar, Session), StatusCode> {
    if let Some(session) = load_session(state, &jar).await? {
        return Ok((jar, session));
    }
    let (session_id, cookie_value) = token::issue(&state.config.session_secret);
    let cookie = Cookie::build((SESSION_COOKIE, cookie_value))
        .path("/")
        .http_only(true)
        .build();
    Ok((jar.add(cookie), Session::new(session_id)))
}

async fn save_session(state: &AppState, session: Session) -> Result<(), StatusCode> {
    state.sessions.save(session).await.map_err(|e| {
        error!(error = %e, "failed to save session");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
