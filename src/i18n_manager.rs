use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::I18nError;
use crate::models::{Locale, ReportKind, ReportRecord};

const EMBEDDED_PACKS: [(Locale, &str); 2] = [
    (Locale::Ku, include_str!("../locales/ku.json")),
    (Locale::Ar, include_str!("../locales/ar.json")),
];

/// 通配符，`"Item *"` 匹配以 `"Item "` 开头的值
const WILDCARD: char = '*';

/// 语言信息结构
#[derive(Debug, Clone)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub is_rtl: bool,
}

/// 翻译查找结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation<'a> {
    /// 命中翻译表
    Exact(Cow<'a, str>),
    /// 未命中，保留原始值
    Fallback(&'a str),
}

impl Translation<'_> {
    pub fn is_exact(&self) -> bool {
        matches!(self, Translation::Exact(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Translation::Exact(value) => value,
            Translation::Fallback(value) => value,
        }
    }

    pub fn into_owned(self) -> String {
        match self {
            Translation::Exact(value) => value.into_owned(),
            Translation::Fallback(value) => value.to_string(),
        }
    }
}

/// 单个 (报表, 字段, 语言) 的翻译表
#[derive(Debug, Default)]
struct TranslationTable {
    exact: HashMap<String, String>,
    /// (原始前缀, 带通配符的译文)
    patterns: Vec<(String, String)>,
}

impl TranslationTable {
    fn insert(&mut self, canonical: String, localized: String) {
        match canonical.strip_suffix(WILDCARD) {
            Some(prefix) => self.patterns.push((prefix.to_string(), localized)),
            None => {
                self.exact.insert(canonical, localized);
            }
        }
    }

    fn lookup<'a>(&'a self, value: &'a str) -> Translation<'a> {
        if let Some(localized) = self.exact.get(value) {
            return Translation::Exact(Cow::Borrowed(localized));
        }

        for (prefix, localized) in &self.patterns {
            if let Some(rest) = value.strip_prefix(prefix.as_str()) {
                if !rest.is_empty() {
                    return Translation::Exact(Cow::Owned(localized.replacen(WILDCARD, rest, 1)));
                }
            }
        }

        Translation::Fallback(value)
    }

    fn len(&self) -> usize {
        self.exact.len() + self.patterns.len()
    }
}

/// 语言包文件结构：报表 -> 字段 -> 原文 -> 译文
type LanguagePack = HashMap<String, HashMap<String, HashMap<String, String>>>;

/// 报表翻译注册表
///
/// 以 (报表类型, 语言) 分组，组内按字段名查找翻译表。
/// `en` 是原始语言，不需要也不会注册翻译表。
pub struct TranslationRegistry {
    tables: HashMap<(ReportKind, Locale), HashMap<String, TranslationTable>>,
    language_info: HashMap<Locale, LanguageInfo>,
}

impl TranslationRegistry {
    /// 使用编译时内嵌的语言包
    pub fn builtin() -> Result<Self, I18nError> {
        let mut registry = Self::empty();
        for (locale, content) in EMBEDDED_PACKS {
            registry.load_language_pack(locale, content)?;
        }
        info!(
            "翻译注册表初始化完成（内嵌语言包），共 {} 条翻译",
            registry.total_translations()
        );
        Ok(registry)
    }

    /// 从目录加载 `{locale}.json`，缺失的文件退回内嵌语言包
    pub fn from_dir(locales_path: impl AsRef<Path>) -> Result<Self, I18nError> {
        let locales_path = locales_path.as_ref();
        let mut registry = Self::empty();

        for (locale, embedded) in EMBEDDED_PACKS {
            let file_path = locales_path.join(format!("{}.json", locale));
            if !file_path.exists() {
                warn!("语言包文件不存在: {}，使用内嵌语言包", file_path.display());
                registry.load_language_pack(locale, embedded)?;
                continue;
            }

            let content = fs::read_to_string(&file_path).map_err(|source| I18nError::Io {
                path: file_path.display().to_string(),
                source,
            })?;
            registry.load_language_pack(locale, &content)?;
            debug!("成功加载语言包: {}", file_path.display());
        }

        info!(
            "翻译注册表初始化完成（{}），共 {} 条翻译",
            locales_path.display(),
            registry.total_translations()
        );
        Ok(registry)
    }

    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
            language_info: Self::init_language_info(),
        }
    }

    fn init_language_info() -> HashMap<Locale, LanguageInfo> {
        let mut info = HashMap::new();

        info.insert(Locale::En, LanguageInfo {
            code: "en".to_string(),
            name: "English".to_string(),
            native_name: "English".to_string(),
            is_rtl: false,
        });

        info.insert(Locale::Ku, LanguageInfo {
            code: "ku".to_string(),
            name: "Kurdish".to_string(),
            native_name: "کوردی".to_string(),
            is_rtl: true,
        });

        info.insert(Locale::Ar, LanguageInfo {
            code: "ar".to_string(),
            name: "Arabic".to_string(),
            native_name: "العربية".to_string(),
            is_rtl: true,
        });

        info
    }

    /// 解析并注册一个语言包，覆盖该语言已有的同名条目
    pub fn load_language_pack(&mut self, locale: Locale, content: &str) -> Result<(), I18nError> {
        let pack: LanguagePack = serde_json::from_str(content).map_err(|source| I18nError::Parse {
            locale: locale.to_string(),
            source,
        })?;

        for (kind_key, fields) in pack {
            let kind = kind_key.parse::<ReportKind>().map_err(|_| I18nError::UnknownKind {
                locale: locale.to_string(),
                kind: kind_key.clone(),
            })?;

            let kind_tables = self.tables.entry((kind, locale)).or_default();
            for (field, entries) in fields {
                let table = kind_tables.entry(field).or_default();
                for (canonical, localized) in entries {
                    table.insert(canonical, localized);
                }
            }
        }

        Ok(())
    }

    /// 查找单个字段值的翻译
    pub fn lookup<'a>(
        &'a self,
        kind: ReportKind,
        field: &str,
        locale: Locale,
        value: &'a str,
    ) -> Translation<'a> {
        if locale.is_canonical() {
            return Translation::Fallback(value);
        }

        match self
            .tables
            .get(&(kind, locale))
            .and_then(|fields| fields.get(field))
        {
            Some(table) => table.lookup(value),
            None => Translation::Fallback(value),
        }
    }

    /// 翻译一条记录，返回新记录，原记录不变
    pub fn translate<R: ReportRecord>(&self, record: &R, locale: Locale) -> R {
        let mut translated = record.clone();
        if locale.is_canonical() {
            return translated;
        }

        for (field, value) in translated.translatable_fields() {
            let localized = match self.lookup(R::KIND, field, locale, value.as_str()) {
                Translation::Exact(localized) => Some(localized.into_owned()),
                Translation::Fallback(_) => None,
            };
            if let Some(localized) = localized {
                *value = localized;
            }
        }

        translated
    }

    /// 获取支持的语言列表
    pub fn get_supported_languages(&self) -> Vec<LanguageInfo> {
        Locale::ALL
            .iter()
            .filter_map(|locale| self.language_info.get(locale).cloned())
            .collect()
    }

    /// 获取翻译总数
    pub fn total_translations(&self) -> usize {
        self.tables
            .values()
            .flat_map(|fields| fields.values())
            .map(TranslationTable::len)
            .sum()
    }
}
