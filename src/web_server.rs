use crate::config::AppConfig;
use crate::error::{AppError, AppResult, I18nError};
use crate::i18n_manager::TranslationRegistry;
use crate::models::{LanguageResponse, Locale, ReportKind, SalesFilter, StockFilter};
use crate::paginator::PageRequest;
use crate::report_processor::{ReportFilter, ReportProcessor, ReportRequest};
use crate::report_store::{ReportStore, StockGenerator};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

#[derive(Clone)]
pub struct AppState {
    processor: Arc<ReportProcessor>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, I18nError> {
        let registry = match &config.locales_path {
            Some(path) => TranslationRegistry::from_dir(path)?,
            None => TranslationRegistry::builtin()?,
        };

        let stock = match config.stock_seed {
            Some(seed) => {
                info!("库存数据使用固定种子: {}", seed);
                StockGenerator::seeded(seed)
            }
            None => StockGenerator::random(),
        };

        let mut processor = ReportProcessor::new(Arc::new(ReportStore::new(stock)), Arc::new(registry));
        if config.cache_enabled {
            processor = processor.with_cache(config.cache_expire);
            debug!("响应缓存已启用，过期时间: {:?}", config.cache_expire);
        }

        Ok(Self {
            processor: Arc::new(processor),
            config: Arc::new(config),
        })
    }
}

/// 报表查询参数，全部按字符串接收后再校验
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    locale: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
    search_char: Option<String>,
    filter: Option<String>,
    date: Option<String>,
    #[serde(rename = "type", alias = "reportType")]
    report_type: Option<String>,
}

impl ReportQuery {
    /// 校验参数并生成报表请求，其他报表类型的筛选参数被忽略
    pub fn into_request(self, kind: ReportKind, config: &AppConfig) -> AppResult<ReportRequest> {
        let locale = match non_empty(self.locale) {
            Some(locale) => locale.parse::<Locale>()?,
            None => Locale::default(),
        };

        let page = PageRequest::parse(
            self.page.as_deref(),
            self.page_size.as_deref(),
            config.default_page_size,
            config.max_page_size,
        )?;

        let filter = match kind {
            ReportKind::Stock => ReportFilter::Stock(StockFilter {
                search_char: non_empty(self.search_char)
                    .or_else(|| non_empty(self.filter))
                    .unwrap_or_default(),
            }),
            // 日期与类型原样保留，未知类型返回全部记录
            ReportKind::Sales => {
                let defaults = SalesFilter::default();
                ReportFilter::Sales(SalesFilter::new(
                    non_empty(self.date),
                    non_empty(self.report_type).unwrap_or(defaults.report_type),
                ))
            }
            ReportKind::Financial | ReportKind::LowStock => ReportFilter::None,
        };

        Ok(ReportRequest::new(kind, locale, page).with_filter(filter))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/reports/{kind}", get(report_handler))
        .route("/api/i18n/languages", get(get_languages_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(app_state)
}

pub async fn start_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.port;

    info!("初始化报表服务...");
    let app_state = AppState::new(config)?;

    if app_state.config.cache_enabled {
        let processor = app_state.processor.clone();
        let period = app_state.config.cache_expire.max(Duration::from_secs(1));
        let mut interval = tokio::time::interval(period);
        tokio::spawn(async move {
            loop {
                interval.tick().await;
                processor.cleanup_cache();
            }
        });
    }

    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("🚀 报表服务正在启动，监听地址: {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    debug!("地址绑定成功，开始监听请求...");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn report_handler(
    State(app_state): State<AppState>,
    Path(kind): Path<String>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> AppResult<Json<Value>> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;
    let kind = kind.parse::<ReportKind>()?;
    let request = query.into_request(kind, &app_state.config)?;

    debug!("报表请求: {:?}", request);
    let report = app_state.processor.generate(&request)?;
    Ok(Json(report))
}

async fn get_languages_handler(State(app_state): State<AppState>) -> Json<Vec<LanguageResponse>> {
    let languages = app_state
        .processor
        .registry()
        .get_supported_languages()
        .into_iter()
        .map(|lang_info| LanguageResponse {
            code: lang_info.code,
            name: lang_info.name,
            native_name: lang_info.native_name,
            is_rtl: lang_info.is_rtl,
        })
        .collect();
    Json(languages)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(format!("请求处理发生 panic: {}", detail)).into_response()
}
