use chrono::{DateTime, Utc};

/// Shortens an address to `TAbc12...wxyz`.
pub fn format_address(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= 10 {
        return addr.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn format_time_ago(deployed_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - deployed_at).num_seconds().max(0);
    if seconds < 60 {
        format!("{}s ago", seconds)
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else {
        format!("{}h ago", seconds / 3600)
    }
}

/// Scales a raw supply string to T/B/M units with one decimal. Anything below a
/// million, or anything that doesn't parse, is returned as is.
pub fn format_supply(supply: &str) -> String {
    let Ok(num) = supply.trim().parse::<f64>() else {
        return supply.to_string();
    };
    if num >= 1e12 {
        format!("{:.1}T", num / 1e12)
    } else if num >= 1e9 {
        format!("{:.1}B", num / 1e9)
    } else if num >= 1e6 {
        format!("{:.1}M", num / 1e6)
    } else {
        supply.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn supply_scales_to_units() {
        assert_eq!(format_supply("1000000000"), "1.0B");
        assert_eq!(format_supply("420690000000"), "420.7B");
        assert_eq!(format_supply("69420000000"), "69.4B");
        assert_eq!(format_supply("1000000000000"), "1.0T");
        assert_eq!(format_supply("777777777777"), "777.8B");
        assert_eq!(format_supply("2500000"), "2.5M");
    }

    #[test]
    fn small_or_garbage_supply_is_untouched() {
        assert_eq!(format_supply("999999"), "999999");
        assert_eq!(format_supply("lots"), "lots");
        assert_eq!(format_supply(""), "");
    }

    #[test]
    fn address_keeps_head_and_tail() {
        assert_eq!(
            format_address("TQn9Y2khEsLJW1ChVWFMSMeRDow5KcbLSE"),
            "TQn9Y2...bLSE"
        );
        assert_eq!(format_address("TShort"), "TShort");
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now, now), "0s ago");
        assert_eq!(format_time_ago(now - Duration::seconds(59), now), "59s ago");
        assert_eq!(format_time_ago(now - Duration::seconds(60), now), "1m ago");
        assert_eq!(format_time_ago(now - Duration::seconds(3599), now), "59m ago");
        assert_eq!(format_time_ago(now - Duration::seconds(7300), now), "2h ago");
    }

    #[test]
    fn future_timestamps_clamp_to_zero() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now + Duration::seconds(30), now), "0s ago");
    }
}
