use axum::{
    Router,
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::content::{
    CatalogError, GuideError, GuideRepository, LoanCatalog, StateCatalog, author_by_slug,
    loan_type_by_slug,
};
use crate::core::{APR_BOUNDS, LoanQuote, PRINCIPAL_BOUNDS, TERM_BOUNDS};
use crate::seo::{build_sitemap, render_robots_txt, render_sitemap_xml};

mod pages;

use pages::{InfoPage, Page};

const STYLES_CSS: &str = include_str!("../../web/styles.css");
const CALCULATOR_JS: &str = include_str!("../../web/calculator.js");

const PAGE_CACHE: &str = "public, max-age=300";
const ASSET_CACHE: &str = "public, max-age=86400";
const NO_STORE: &str = "no-store";

/// Quote shown by `/calculator` before the visitor touches the sliders.
pub const DEFAULT_PRINCIPAL: f64 = 500.0;
pub const DEFAULT_APR: f64 = 200.0;
pub const DEFAULT_TERM_MONTHS: u32 = 6;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Guides(#[from] GuideError),
}

/// Read-only data shared by every request.
#[derive(Debug)]
pub struct AppState {
    pub config: SiteConfig,
    pub loans: LoanCatalog,
    pub states: StateCatalog,
    pub guides: GuideRepository,
}

impl AppState {
    pub fn load(config: SiteConfig) -> Result<Self, StartupError> {
        let loans = LoanCatalog::bundled(&config.site_name)?;
        let states = StateCatalog::bundled()?;
        let guides = GuideRepository::load(&config.guides_dir)?;
        info!(
            loan_amounts = loans.all().len(),
            states = states.all().len(),
            guides = guides.all().len(),
            "site content loaded"
        );
        Ok(Self {
            config,
            loans,
            states,
            guides,
        })
    }
}

type SharedState = State<Arc<AppState>>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RepaymentPayload {
    principal: Option<f64>,
    apr: Option<f64>,
    term_months: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CalculatorQuery {
    principal: Option<f64>,
    apr: Option<f64>,
    term_months: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApplyQuery {
    amount: Option<String>,
    state: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router: Router<Arc<AppState>> = Router::new()
        .route("/", get(home_handler))
        .route("/borrow", get(borrow_index_handler))
        .route("/borrow/:amount", get(amount_handler))
        .route("/borrow/:amount/:state", get(amount_state_handler))
        .route("/states", get(states_index_handler))
        .route("/states/:state", get(state_hub_handler))
        .route("/loans", get(loan_types_handler))
        .route("/loans/:loan_type", get(loan_type_handler))
        .route("/guides", get(guides_index_handler))
        .route("/guides/:slug", get(guide_handler))
        .route("/authors/:slug", get(author_handler))
        .route("/calculator", get(calculator_handler))
        .route("/apply", get(apply_handler))
        .route(
            "/api/repayment",
            get(repayment_get_handler).post(repayment_post_handler),
        )
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/robots.txt", get(robots_handler))
        .route("/styles.css", get(styles_handler))
        .route("/calculator.js", get(calculator_js_handler));

    for page in InfoPage::ALL {
        router = router.route(
            page.path(),
            get(move |State(state): SharedState| async move {
                page_response(&state, pages::info_page(&state.config, page))
            }),
        );
    }

    router.fallback(not_found_handler).with_state(state)
}

pub async fn run_http_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = build_router(Arc::new(state));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "FundingZest listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("could not register signal handlers, waiting for ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn home_handler(State(state): SharedState) -> Response {
    let guides = state.guides.published(today());
    page_response(
        &state,
        pages::home(&state.config, &state.loans, &state.states, &guides),
    )
}

async fn borrow_index_handler(State(state): SharedState) -> Response {
    page_response(&state, pages::borrow_index(&state.config, &state.loans))
}

async fn amount_handler(State(state): SharedState, Path(amount): Path<String>) -> Response {
    match state.loans.published_by_slug(&amount) {
        Some(loan) => page_response(
            &state,
            pages::amount_page(&state.config, loan, &state.states),
        ),
        None => not_found_page(&state),
    }
}

async fn amount_state_handler(
    State(state): SharedState,
    Path((amount, state_slug)): Path<(String, String)>,
) -> Response {
    let loan = state.loans.published_by_slug(&amount);
    let region = state.states.published_by_slug(&state_slug);
    match (loan, region) {
        (Some(loan), Some(region)) => page_response(
            &state,
            pages::amount_state_page(&state.config, loan, region),
        ),
        _ => not_found_page(&state),
    }
}

async fn states_index_handler(State(state): SharedState) -> Response {
    page_response(&state, pages::states_index(&state.config, &state.states))
}

async fn state_hub_handler(State(state): SharedState, Path(slug): Path<String>) -> Response {
    match state.states.by_slug(&slug) {
        Some(region) => page_response(
            &state,
            pages::state_hub(&state.config, region, &state.loans),
        ),
        None => not_found_page(&state),
    }
}

async fn loan_types_handler(State(state): SharedState) -> Response {
    page_response(&state, pages::loan_types_index(&state.config))
}

async fn loan_type_handler(State(state): SharedState, Path(slug): Path<String>) -> Response {
    match loan_type_by_slug(&slug) {
        Some(loan_type) => page_response(
            &state,
            pages::loan_type_page(&state.config, loan_type, &state.loans),
        ),
        None => not_found_page(&state),
    }
}

async fn guides_index_handler(State(state): SharedState) -> Response {
    let guides = state.guides.published(today());
    page_response(&state, pages::guides_index(&state.config, &guides))
}

async fn guide_handler(State(state): SharedState, Path(slug): Path<String>) -> Response {
    match state.guides.published_by_slug(&slug, today()) {
        Some(guide) => page_response(&state, pages::guide_page(&state.config, guide)),
        None => not_found_page(&state),
    }
}

async fn author_handler(State(state): SharedState, Path(slug): Path<String>) -> Response {
    match author_by_slug(&slug) {
        Some(author) => {
            let guides = state.guides.published(today());
            page_response(&state, pages::author_page(&state.config, author, &guides))
        }
        None => not_found_page(&state),
    }
}

/// Slider values from the query are clamped to the UI bounds; an unreadable
/// query falls back to the default quote.
async fn calculator_handler(
    State(state): SharedState,
    query: Result<Query<CalculatorQuery>, QueryRejection>,
) -> Response {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let principal = PRINCIPAL_BOUNDS.clamp(query.principal.unwrap_or(DEFAULT_PRINCIPAL));
    let apr = APR_BOUNDS.clamp(query.apr.unwrap_or(DEFAULT_APR));
    let term = TERM_BOUNDS
        .clamp(query.term_months.unwrap_or(f64::from(DEFAULT_TERM_MONTHS)))
        .round() as u32;
    page_response(
        &state,
        pages::calculator(&state.config, principal, apr, term),
    )
}

async fn apply_handler(
    State(state): SharedState,
    query: Result<Query<ApplyQuery>, QueryRejection>,
) -> Response {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let loan = query.amount.as_deref().and_then(|amount| {
        amount
            .parse::<u32>()
            .ok()
            .and_then(|dollars| state.loans.by_amount(dollars))
            .or_else(|| state.loans.by_slug(amount))
    });
    let region = query.state.as_deref().and_then(|code| {
        state
            .states
            .by_abbreviation(code)
            .or_else(|| state.states.by_slug(code))
    });
    page_response(&state, pages::apply(&state.config, loan, region))
}

async fn sitemap_handler(State(state): SharedState) -> Response {
    let entries = build_sitemap(
        &state.config,
        &state.loans,
        &state.states,
        &state.guides,
        today(),
    );
    with_cache_control(
        (
            [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
            render_sitemap_xml(&entries),
        ),
        PAGE_CACHE,
    )
}

async fn robots_handler(State(state): SharedState) -> Response {
    with_cache_control(
        (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_robots_txt(&state.config),
        ),
        PAGE_CACHE,
    )
}

async fn styles_handler() -> Response {
    with_cache_control(
        (
            [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
            STYLES_CSS,
        ),
        ASSET_CACHE,
    )
}

async fn calculator_js_handler() -> Response {
    with_cache_control(
        (
            [(
                header::CONTENT_TYPE,
                "application/javascript; charset=utf-8",
            )],
            CALCULATOR_JS,
        ),
        ASSET_CACHE,
    )
}

async fn not_found_handler(State(state): SharedState) -> Response {
    not_found_page(&state)
}

async fn repayment_get_handler(
    query: Result<Query<RepaymentPayload>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(payload)) => repayment_handler_impl(payload),
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

async fn repayment_post_handler(payload: Result<Json<RepaymentPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => repayment_handler_impl(payload),
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

fn repayment_handler_impl(payload: RepaymentPayload) -> Response {
    match quote_from_payload(payload) {
        Ok(quote) => json_response(StatusCode::OK, quote.repayment()),
        Err(msg) => {
            debug!(error = %msg, "rejected repayment request");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

fn quote_from_payload(payload: RepaymentPayload) -> Result<LoanQuote, String> {
    let principal = payload.principal.ok_or("principal is required")?;
    let apr = payload.apr.ok_or("apr is required")?;
    let term_months = payload.term_months.ok_or("termMonths is required")?;
    LoanQuote::from_raw_term(principal, apr, term_months).map_err(|err| err.to_string())
}

fn page_response(state: &AppState, page: Page) -> Response {
    with_cache_control(Html(page.render(&state.config, today())), PAGE_CACHE)
}

fn not_found_page(state: &AppState) -> Response {
    let html = pages::not_found(&state.config).render(&state.config, today());
    with_cache_control((StatusCode::NOT_FOUND, Html(html)), NO_STORE)
}

fn with_cache_control<R: IntoResponse>(response: R, policy: &'static str) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static(policy));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)), NO_STORE)
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn test_state() -> Arc<AppState> {
        let config = SiteConfig::default();
        Arc::new(AppState {
            loans: LoanCatalog::bundled(&config.site_name).expect("bundled loan amounts parse"),
            states: StateCatalog::bundled().expect("bundled states parse"),
            guides: GuideRepository::default(),
            config,
        })
    }

    fn payload_from_json(json: &str) -> RepaymentPayload {
        serde_json::from_str(json).expect("valid payload json")
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[test]
    fn payload_parses_web_keys() {
        let payload = payload_from_json(r#"{"principal":500,"apr":200,"termMonths":6}"#);
        let quote = quote_from_payload(payload).expect("valid quote");
        assert_approx(quote.principal(), 500.0);
        assert_approx(quote.apr_percent(), 200.0);
        assert_eq!(quote.term_months(), 6);
    }

    #[test]
    fn payload_reports_missing_and_invalid_fields() {
        let missing = quote_from_payload(payload_from_json(r#"{"principal":500,"apr":10}"#));
        assert_eq!(missing.unwrap_err(), "termMonths is required");

        let fractional =
            quote_from_payload(payload_from_json(r#"{"principal":500,"apr":10,"termMonths":2.5}"#));
        assert!(fractional.unwrap_err().contains("term"));

        let negative =
            quote_from_payload(payload_from_json(r#"{"principal":-5,"apr":10,"termMonths":3}"#));
        assert!(negative.unwrap_err().contains("principal"));
    }

    #[tokio::test]
    async fn repayment_post_returns_camel_case_result() {
        let payload = payload_from_json(r#"{"principal":1000,"apr":0,"termMonths":10}"#);
        let response = repayment_post_handler(Ok(Json(payload))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );

        let json: Value = serde_json::from_str(&body_text(response).await).expect("json body");
        assert_eq!(json["monthlyPayment"], 100.0);
        assert_eq!(json["totalCost"], 1000.0);
        assert_eq!(json["totalInterest"], 0.0);
    }

    #[tokio::test]
    async fn repayment_rejects_zero_term_with_error_body() {
        let payload = payload_from_json(r#"{"principal":500,"apr":200,"termMonths":0}"#);
        let response = repayment_post_handler(Ok(Json(payload))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_str(&body_text(response).await).expect("json body");
        assert!(json["error"].as_str().is_some_and(|msg| msg.contains("term")));
    }

    #[tokio::test]
    async fn unpublished_amounts_and_states_are_not_found() {
        let state = test_state();

        let response = amount_handler(State(state.clone()), Path("400-dollar-loan".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = amount_state_handler(
            State(state.clone()),
            Path(("500-dollar-loan".to_string(), "colorado".to_string())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = state_hub_handler(State(state), Path("colorado".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn calculator_clamps_query_values() {
        let state = test_state();
        let query = CalculatorQuery {
            principal: Some(50.0),
            apr: Some(0.0),
            term_months: Some(1.0),
        };
        let response = calculator_handler(State(state), Ok(Query(query))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("id=\"principal\" name=\"principal\" min=\"100\" max=\"35000\" step=\"100\" value=\"100\""));
        assert!(html.contains("id=\"apr\" name=\"apr\" min=\"1\" max=\"700\" step=\"1\" value=\"1\""));
    }

    #[tokio::test]
    async fn apply_prefills_from_amount_and_state_code() {
        let state = Arc::new(AppState {
            config: SiteConfig {
                lead_form_script: Some("https://forms.example.net/widget.js".to_string()),
                ..SiteConfig::default()
            },
            ..Arc::try_unwrap(test_state()).expect("sole owner")
        });
        let query = ApplyQuery {
            amount: Some("1000".to_string()),
            state: Some("tx".to_string()),
        };
        let html = body_text(apply_handler(State(state), Ok(Query(query))).await).await;
        assert!(html.contains("data-amount=\"1000\" data-state=\"TX\""));
        assert!(html.contains("noindex, nofollow"));
    }
}
