use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::i18n_manager::TranslationRegistry;
use crate::models::{
    FinancialRecord, Locale, LowStockRecord, NoFilter, ReportEnvelope, ReportKind, ReportRecord,
    SalesFilter, SalesRecord, StockFilter, StockRecord,
};
use crate::paginator::{paginate, PageRequest};
use crate::report_store::{RecordSource, ReportStore};
use crate::response_cache::ResponseCache;

/// 按报表类型区分的筛选条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ReportFilter {
    #[default]
    None,
    Stock(StockFilter),
    Sales(SalesFilter),
}

/// 已校验的报表请求，也是缓存键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub locale: Locale,
    pub filter: ReportFilter,
    pub page: PageRequest,
}

impl ReportRequest {
    pub fn new(kind: ReportKind, locale: Locale, page: PageRequest) -> Self {
        Self {
            kind,
            locale,
            filter: ReportFilter::None,
            page,
        }
    }

    pub fn with_filter(mut self, filter: ReportFilter) -> Self {
        self.filter = filter;
        self
    }

    fn stock_filter(&self) -> StockFilter {
        match &self.filter {
            ReportFilter::Stock(filter) => filter.clone(),
            _ => StockFilter::default(),
        }
    }

    fn sales_filter(&self) -> SalesFilter {
        match &self.filter {
            ReportFilter::Sales(filter) => filter.clone(),
            _ => SalesFilter::default(),
        }
    }
}

/// 报表处理器：筛选 -> 分页 -> 翻译 -> 组装
pub struct ReportProcessor {
    store: Arc<ReportStore>,
    registry: Arc<TranslationRegistry>,
    cache: Option<ResponseCache<ReportRequest>>,
}

impl ReportProcessor {
    pub fn new(store: Arc<ReportStore>, registry: Arc<TranslationRegistry>) -> Self {
        Self {
            store,
            registry,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache_duration: Duration) -> Self {
        self.cache = Some(ResponseCache::new(cache_duration));
        self
    }

    pub fn registry(&self) -> &TranslationRegistry {
        &self.registry
    }

    /// 生成一份报表
    ///
    /// 筛选基于原始字段值，因此任意语言下命中的 id 集合相同；
    /// 翻译不改变记录数量与顺序，所以只翻译当前页。
    pub fn build_report<R>(
        &self,
        locale: Locale,
        filter: R::Filter,
        page: PageRequest,
    ) -> ReportEnvelope<R, R::Filter>
    where
        R: ReportRecord,
        ReportStore: RecordSource<R>,
    {
        let records = <ReportStore as RecordSource<R>>::records(&self.store);
        let filtered: Vec<&R> = records
            .iter()
            .filter(|record| record.matches(&filter))
            .take(R::record_limit(&filter).unwrap_or(usize::MAX))
            .collect();
        let page = paginate(filtered, page);

        let data: Vec<R> = page
            .items
            .into_iter()
            .map(|record| self.registry.translate(record, locale))
            .collect();

        debug!(
            "{} 报表: 语言 {}, 第 {} 页, 本页 {} 条, 共 {} 条",
            R::KIND,
            locale,
            page.pagination.current_page,
            data.len(),
            page.pagination.total_items
        );

        ReportEnvelope {
            data,
            pagination: page.pagination,
            filters: R::ECHO_FILTERS.then_some(filter),
        }
    }

    /// 生成报表并序列化为 JSON，库存报表每次读取都会变化，不走缓存
    pub fn generate(&self, request: &ReportRequest) -> AppResult<Value> {
        let cache = self.cache.as_ref().filter(|_| request.kind != ReportKind::Stock);

        if let Some(cached) = cache.and_then(|cache| cache.get(request)) {
            debug!("返回缓存的 {} 报表", request.kind);
            return Ok(cached);
        }

        let value = match request.kind {
            ReportKind::Financial => self.render::<FinancialRecord>(request, NoFilter)?,
            ReportKind::Sales => self.render::<SalesRecord>(request, request.sales_filter())?,
            ReportKind::Stock => self.render::<StockRecord>(request, request.stock_filter())?,
            ReportKind::LowStock => self.render::<LowStockRecord>(request, NoFilter)?,
        };

        if let Some(cache) = cache {
            cache.insert(request.clone(), value.clone());
        }

        Ok(value)
    }

    fn render<R>(&self, request: &ReportRequest, filter: R::Filter) -> AppResult<Value>
    where
        R: ReportRecord,
        ReportStore: RecordSource<R>,
    {
        let envelope = self.build_report::<R>(request.locale, filter, request.page);
        serde_json::to_value(envelope).map_err(|e| AppError::report(R::KIND, e))
    }

    /// 清理过期的缓存项
    pub fn cleanup_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.cleanup();
        }
    }
}
