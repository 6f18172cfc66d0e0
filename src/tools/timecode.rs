use crate::error::{ReviewError, Result};

/// 將毫秒位置轉換為截圖程式的 seek 時間（`秒.毫秒`）
///
/// 秒數以整數除法取得、不四捨五入，毫秒固定補零到三位。
/// 小於 1000 ms 時秒數部分至少保留一個 `0`，例如 `999 -> "0.999"`。
#[must_use]
pub fn to_seek_time(position_ms: u64) -> String {
    format!("{}.{:03}", position_ms / 1000, position_ms % 1000)
}

/// 播放器回報的位置是有號整數，負數直接拒絕
pub fn seek_time_from_signed(position_ms: i64) -> Result<String> {
    u64::try_from(position_ms)
        .map(to_seek_time)
        .map_err(|_| ReviewError::NegativePosition(position_ms))
}

/// 顯示用的時鐘格式 `HH:MM:SS.mmm`
#[must_use]
pub fn format_clock(position_ms: u64) -> String {
    let secs = position_ms / 1000;
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}.{:03}", h, m, s, position_ms % 1000)
}

/// 解析使用者輸入的播放位置
///
/// 接受：
/// - 純數字：毫秒（`61234`）
/// - `秒.小數`（`61.234`）
/// - `M:SS(.mmm)` 或 `H:MM:SS(.mmm)`
#[must_use]
pub fn parse_clock(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if !raw.contains([':', '.']) {
        return raw.parse::<u64>().ok();
    }

    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() > 3 {
        return None;
    }
    let (last, units) = parts.split_last()?;

    let (sec_str, frac_str) = last.split_once('.').unwrap_or((*last, ""));
    let seconds = sec_str.parse::<u64>().ok()?;
    let millis = parse_fraction_ms(frac_str)?;

    let values = units
        .iter()
        .map(|unit| unit.parse::<u64>().ok())
        .collect::<Option<Vec<u64>>>()?;

    // 有更大的單位時，秒與分不得超過 59
    if !values.is_empty() && seconds >= 60 {
        return None;
    }
    let (hours, minutes) = match values.as_slice() {
        [] => (0, 0),
        [m] => (0, *m),
        [h, m] if *m < 60 => (*h, *m),
        _ => return None,
    };

    // 數值過大時視為無效輸入
    hours
        .checked_mul(3600)
        .zip(minutes.checked_mul(60))
        .and_then(|(hour_secs, minute_secs)| hour_secs.checked_add(minute_secs))
        .and_then(|total| total.checked_add(seconds))
        .and_then(|total| total.checked_mul(1000))
        .and_then(|total| total.checked_add(millis))
}

/// 小數部分轉為毫秒，超過三位直接截斷
fn parse_fraction_ms(frac: &str) -> Option<u64> {
    if frac.is_empty() {
        return Some(0);
    }
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits: String = frac.chars().chain("000".chars()).take(3).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_seek_time() {
        assert_eq!(to_seek_time(1500), "1.500");
        assert_eq!(to_seek_time(61234), "61.234");
        assert_eq!(to_seek_time(5000), "5.000");
        assert_eq!(to_seek_time(1001), "1.001");
        assert_eq!(to_seek_time(3_600_007), "3600.007");
    }

    #[test]
    fn test_to_seek_time_below_one_second() {
        assert_eq!(to_seek_time(999), "0.999");
        assert_eq!(to_seek_time(42), "0.042");
        assert_eq!(to_seek_time(0), "0.000");
    }

    #[test]
    fn test_seek_time_from_signed() {
        assert_eq!(seek_time_from_signed(1500).unwrap(), "1.500");
        assert!(matches!(
            seek_time_from_signed(-1),
            Err(ReviewError::NegativePosition(-1))
        ));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00:00.000");
        assert_eq!(format_clock(61_234), "00:01:01.234");
        assert_eq!(format_clock(3_723_045), "01:02:03.045");
    }

    #[test]
    fn test_parse_clock_millis_and_seconds() {
        assert_eq!(parse_clock("61234"), Some(61_234));
        assert_eq!(parse_clock(" 5000 "), Some(5_000));
        assert_eq!(parse_clock("61.234"), Some(61_234));
        assert_eq!(parse_clock("1.5"), Some(1_500));
        assert_eq!(parse_clock("2.12345"), Some(2_123));
    }

    #[test]
    fn test_parse_clock_colon_forms() {
        assert_eq!(parse_clock("1:01"), Some(61_000));
        assert_eq!(parse_clock("1:01.250"), Some(61_250));
        assert_eq!(parse_clock("01:02:03.045"), Some(3_723_045));
        assert_eq!(parse_clock("0:00:00"), Some(0));
    }

    #[test]
    fn test_parse_clock_rejects_overflow() {
        assert_eq!(parse_clock("18446744073709552.000"), None);
        assert_eq!(parse_clock("5124095576030431:00:00"), None);
        assert_eq!(parse_clock("307445734561825861:00"), None);
        assert_eq!(parse_clock("18446744073709551616"), None);
        assert_eq!(parse_clock("18446744073709551.615"), Some(u64::MAX));
    }

    #[test]
    fn test_parse_clock_invalid() {
        assert_eq!(parse_clock(""), None);
        assert_eq!(parse_clock("abc"), None);
        assert_eq!(parse_clock("1:2:3:4"), None);
        assert_eq!(parse_clock("1:75"), None);
        assert_eq!(parse_clock("1:75:00"), None);
        assert_eq!(parse_clock("1.2x"), None);
        assert_eq!(parse_clock("-5"), None);
    }

    #[test]
    fn test_clock_round_trip() {
        for ms in [0, 999, 61_234, 3_723_045] {
            assert_eq!(parse_clock(&format_clock(ms)), Some(ms));
        }
    }
}
