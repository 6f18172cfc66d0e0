use crate::tools::{join_list, split_list, trim_entries};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// 側車檔中發行日期的格式（`yyyy-MM-dd`）
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// 影片的描述資料，與側車檔一對一
///
/// 讀取時逐欄位容錯：缺少或型別錯誤的欄位退回空字串、空清單或未設定的日期，
/// 不會讓整份資料讀取失敗。寫入時所有欄位都會輸出。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(rename = "image", default, deserialize_with = "lenient_string")]
    pub image_path: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub md5sum: String,
    #[serde(
        default,
        serialize_with = "serialize_release_date",
        deserialize_with = "lenient_release_date"
    )]
    pub release_date: Option<NaiveDate>,
    #[serde(
        default,
        serialize_with = "serialize_trimmed",
        deserialize_with = "lenient_string_list"
    )]
    pub actors: Vec<String>,
    #[serde(
        default,
        serialize_with = "serialize_trimmed",
        deserialize_with = "lenient_string_list"
    )]
    pub categories: Vec<String>,
}

impl VideoMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 演員清單的編輯用文字（`"A, B"`）
    #[must_use]
    pub fn actors_text(&self) -> String {
        join_list(&self.actors)
    }

    pub fn set_actors_from_text(&mut self, text: &str) {
        self.actors = split_list(text);
    }

    #[must_use]
    pub fn categories_text(&self) -> String {
        join_list(&self.categories)
    }

    pub fn set_categories_from_text(&mut self, text: &str) {
        self.categories = split_list(text);
    }

    #[must_use]
    pub fn release_date_text(&self) -> String {
        format_release_date(self.release_date)
    }

    /// 設定發行日期，格式不符時視為未設定
    pub fn set_release_date_from_text(&mut self, text: &str) {
        self.release_date = parse_release_date(text.trim());
    }
}

/// 嚴格解析 `yyyy-MM-dd`，其他寫法一律回傳 `None`
#[must_use]
pub fn parse_release_date(text: &str) -> Option<NaiveDate> {
    let well_formed = text.len() == 10
        && text.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(text, RELEASE_DATE_FORMAT).ok()
}

#[must_use]
pub fn format_release_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(RELEASE_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string).unwrap_or_default())
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|item| !item.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Ok(items)
}

fn lenient_release_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_release_date))
}

#[allow(clippy::ref_option)]
fn serialize_release_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_release_date(*date))
}

#[allow(clippy::ptr_arg)]
fn serialize_trimmed<S>(items: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    trim_entries(items).serialize(serializer)
}
