pub mod entity;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

pub use entity::{FinancialRecord, LowStockRecord, ReportRecord, SalesRecord, StockRecord};

/// 报表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Financial,
    Sales,
    Stock,
    LowStock,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Financial,
        ReportKind::Sales,
        ReportKind::Stock,
        ReportKind::LowStock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Financial => "financial",
            ReportKind::Sales => "sales",
            ReportKind::Stock => "stock",
            ReportKind::LowStock => "lowstock",
        }
    }

    /// 错误消息中使用的名称
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportKind::Financial => "financial",
            ReportKind::Sales => "sales",
            ReportKind::Stock => "stock",
            ReportKind::LowStock => "low stock",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Unknown report kind '{}', expected one of: financial, sales, stock, lowstock",
                    s
                ))
            })
    }
}

/// 支持的语言，`En` 为原始语言
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ku,
    Ar,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Ku, Locale::Ar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ku => "ku",
            Locale::Ar => "ar",
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, Locale::En)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.as_str() == s)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Unsupported locale '{}', expected one of: en, ku, ar",
                    s
                ))
            })
    }
}

/// 分页元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: usize,
}

/// 报表响应
#[derive(Debug, Clone, Serialize)]
pub struct ReportEnvelope<R, F> {
    pub data: Vec<R>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<F>,
}

/// 不接受筛选参数的报表
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NoFilter;

/// 库存报表筛选：名称前缀
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockFilter {
    pub search_char: String,
}

/// 销售报表周期
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SalesPeriod {
    #[default]
    Weekly,
    Monthly,
    Yearly,
}

impl SalesPeriod {
    /// 识别报表类型，未知类型返回 `None`
    pub fn from_type(report_type: &str) -> Option<Self> {
        match report_type {
            "weekly" => Some(SalesPeriod::Weekly),
            "monthly" => Some(SalesPeriod::Monthly),
            "yearly" => Some(SalesPeriod::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SalesPeriod::Weekly => "weekly",
            SalesPeriod::Monthly => "monthly",
            SalesPeriod::Yearly => "yearly",
        }
    }

    /// 该周期包含的前几条记录，`None` 表示全部
    pub fn record_limit(&self) -> Option<usize> {
        match self {
            SalesPeriod::Weekly => Some(3),
            SalesPeriod::Monthly => Some(5),
            SalesPeriod::Yearly => None,
        }
    }
}

/// 销售报表筛选，`type` 与 `date` 按原样回显
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SalesFilter {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub report_type: String,
}

impl SalesFilter {
    pub fn new(date: Option<String>, report_type: impl Into<String>) -> Self {
        Self {
            date,
            report_type: report_type.into(),
        }
    }

    /// 前几条记录的上限；未知类型取全部
    pub fn record_limit(&self) -> Option<usize> {
        SalesPeriod::from_type(&self.report_type).and_then(|period| period.record_limit())
    }
}

impl Default for SalesFilter {
    fn default() -> Self {
        Self::new(None, SalesPeriod::default().as_str())
    }
}

/// 语言响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResponse {
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub is_rtl: bool,
}
