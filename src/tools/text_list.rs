//! 逗號分隔清單的轉換
//!
//! 演員與分類在編輯時是一行以逗號分隔的文字，寫入側車檔時則是字串陣列。

use regex::Regex;
use std::sync::LazyLock;

static REGEX_MULTIPLE_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// 去除前後空白，並把中間連續的空白合併成單一空格
#[must_use]
pub fn simplify(text: &str) -> String {
    REGEX_MULTIPLE_SPACES
        .replace_all(text.trim(), " ")
        .into_owned()
}

/// 將 `"Jane Doe,  John   Smith"` 拆成 `["Jane Doe", "John Smith"]`
///
/// 保留輸入順序與重複項目，清理後為空的項目會被丟棄。
#[must_use]
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(simplify)
        .filter(|item| !item.is_empty())
        .collect()
}

/// 以 `", "` 串接，供編輯欄位顯示
#[must_use]
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

/// 寫入前的清理：去除前後空白並移除空項目
#[must_use]
pub fn trim_entries(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify() {
        assert_eq!(simplify("  Jane   Doe \t"), "Jane Doe");
        assert_eq!(simplify("   "), "");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" Jane Doe ,John   Smith,, "),
            vec!["Jane Doe", "John Smith"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_split_list_keeps_order_and_duplicates() {
        assert_eq!(split_list("b, a, b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_join_list() {
        let items = vec!["Drama".to_string(), "Comedy".to_string()];
        assert_eq!(join_list(&items), "Drama, Comedy");
        assert_eq!(split_list(&join_list(&items)), items);
    }

    #[test]
    fn test_trim_entries() {
        let items = vec!["  Jane Doe ".to_string(), " ".to_string(), "John Smith".to_string()];
        assert_eq!(trim_entries(&items), vec!["Jane Doe", "John Smith"]);
    }
}
