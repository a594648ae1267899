mod financial;
mod low_stock;
mod sales;
mod stock;

pub use financial::FinancialRecord;
pub use low_stock::LowStockRecord;
pub use sales::SalesRecord;
pub use stock::StockRecord;

use serde::Serialize;
use std::fmt::Debug;

use super::ReportKind;

/// 报表记录
///
/// 每种报表的记录类型声明自己的筛选条件与可翻译字段。
/// `id` 从 1 开始，构造后不再改变，是分页的排序依据。
pub trait ReportRecord: Clone + Debug + Serialize + Send + Sync + 'static {
    const KIND: ReportKind;

    /// 筛选条件，同时也是响应中回显的 `filters`
    type Filter: Clone + Debug + Default + Serialize + Send + Sync;

    /// 是否在响应中回显筛选参数
    const ECHO_FILTERS: bool;

    fn id(&self) -> u32;

    /// 基于原始（英文）字段值判断是否命中筛选
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// 按 id 顺序只保留命中记录中的前几条，`None` 表示不限制
    fn record_limit(_filter: &Self::Filter) -> Option<usize> {
        None
    }

    /// 可翻译的字符串字段：(字段名, 字段值)
    fn translatable_fields(&mut self) -> Vec<(&'static str, &mut String)>;
}
