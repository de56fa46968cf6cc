//! Label translation through an exact-match lookup table.

use crate::error::ConvertError;
use crate::error::ResultMessage;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Source label → English label. Multi-line variants are listed as they
/// appear in the source cells; keys are normalised when the table is built.
const BUILTIN_TRANSLATIONS: &[(&str, &str)] = &[
    ("Товары", "Product"),
    ("Категория 1 уровня", "Category L1"),
    ("Категория 2 уровня", "Category L2"),
    ("Категория 3 уровня", "Category L3"),
    ("Бренд", "Brand"),
    ("Модель", "Model"),
    ("Схема продаж", "Fulfillment (FBO/FBS)"),
    ("SKU", "SKU"),
    ("Артикул", "Vendor Code"),
    ("Продажи", "Sales"),
    ("ABC-анализ по сумме заказов", "ABC by Order Value"),
    ("ABC-анализ по количеству заказов", "ABC by Order Count"),
    ("ABC-анализ по\nсумме заказов", "ABC by Order Value"),
    ("ABC-анализ по\nколичеству заказов", "ABC by Order Count"),
    ("Заказано на сумму", "Order Value"),
    ("Заказано на\nсумму", "Order Value"),
    ("Динамика", "Change vs prior period"),
    ("Доля в общей сумме заказов", "Share of Total Order Value"),
    ("Доля в общей\nсумме заказов", "Share of Total Order Value"),
    ("Воронка продаж", "Funnel"),
    ("Позиция в поиске и каталоге", "Avg Listing Rank"),
    ("Позиция в поиске\nи каталоге", "Avg Listing Rank"),
    ("Клики/показы (CTR)", "CTR"),
    ("Клики/показы\n(CTR)", "CTR"),
    ("Доля показов", "Share of Impressions"),
    ("Просмотры карточки", "Product Page Views"),
    ("В корзине", "Added to Cart"),
    ("Добавили в корзину", "Add-to-Cart Users"),
    ("Конверсия в корзину", "Add-to-Cart Rate"),
    ("Конверсия в корзину\nиз просмотров", "Add-to-Cart Rate"),
    ("Заказы", "Orders"),
    ("Количество заказов", "Order Count"),
    ("Конверсия из корзины в заказ", "Cart-to-Order Conversion"),
    ("Конверсия из\nкорзины в заказ", "Cart-to-Order Conversion"),
    ("Процент отмен", "Cancel Rate"),
    ("Процент возврата", "Return Rate"),
    ("Факторы продаж", "Sales Factors"),
    ("Средняя цена", "Average Price"),
    ("Скидка от вашей\nцены", "Discount vs Your Price"),
    ("Индекс цен", "Price Index"),
    ("Дней в акциях", "Days on Promotion"),
    ("Общая ДРР", "Total ACoS (Ad Cost Ratio)"),
    ("Дней с\nпродвижением\n(трафареты)", "Days with Ads (Placements)"),
    ("Дней без остатка", "Days Out of Stock"),
    ("Дней без остатка\n19.07.2025 –\n15.08.2025", "Days Out of Stock"),
    ("Остаток на конец\nпериода", "Ending Inventory"),
    ("Рекомендация по поставке на FBO", "FBO Restock Recommendation"),
    ("Сколько товаров поставить", "Units to Restock"),
    ("Среднее время доставки", "Avg Delivery Time"),
    ("Среднее время\nдоставки\n19.07.2025 –\n15.08.2025", "Avg Delivery Time"),
    ("Отзывы", "Reviews"),
    ("Рейтинг товара", "Product Rating"),
    ("Итого и среднее", "Total & Average"),
    ("–", ""),
];

static BUILTIN: Lazy<HashMap<String, String>> = Lazy::new(|| {
    BUILTIN_TRANSLATIONS
        .iter()
        .map(|(source, target)| (normalize(source), target.to_string()))
        .collect()
});

/// Replaces line breaks with spaces and trims surrounding whitespace.
pub fn normalize(label: &str) -> String {
    label.replace("\r\n", " ").replace(['\n', '\r'], " ").trim().to_owned()
}

/// Exact-match label translator.
///
/// Lookups go to the override table first, then the built-in table; labels
/// found in neither come back normalised but otherwise unchanged.
#[derive(Clone, Debug, Default)]
pub struct Translator {
    overrides: HashMap<String, String>,
}

impl Translator {
    /// Translator backed by the built-in table only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Adds entries on top of the built-in table; later entries win.
    pub fn with_overrides<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (source, target) in entries {
            self.overrides.insert(normalize(source.as_ref()), target.into());
        }
        self
    }

    /// Layers a flat JSON object (`{"source": "target"}`) over the built-in table.
    pub fn from_json_file(path: &Path) -> Result<Self, ConvertError> {
        let name = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(ConvertError::from)
            .with_prefix(&name)?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)
            .map_err(ConvertError::from)
            .with_prefix(&name)?;
        debug!(file = %name, count = entries.len(), "loaded translation overrides");
        Ok(Self::builtin().with_overrides(entries))
    }

    /// Translates one label.
    pub fn translate(&self, label: &str) -> String {
        let normalized = normalize(label);
        self.overrides
            .get(&normalized)
            .or_else(|| BUILTIN.get(&normalized))
            .cloned()
            .unwrap_or(normalized)
    }
}
