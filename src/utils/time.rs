//! 时间工具函数 — 业务时区转换
//!
//! 到店时间和营业日期统一按配置的业务时区计算，
//! 避免服务器部署时区与餐厅所在时区不一致。

use chrono_tz::Tz;

/// 当前时刻的到店时间 (HH:MM，业务时区)
pub fn arrival_time(tz: Tz) -> String {
    chrono::Utc::now()
        .with_timezone(&tz)
        .format("%H:%M")
        .to_string()
}

/// 当前营业日期 (YYYY-MM-DD，业务时区)
pub fn business_date(tz: Tz) -> String {
    chrono::Utc::now()
        .with_timezone(&tz)
        .format("%Y-%m-%d")
        .to_string()
}

/// 解析时区字符串，失败时回退到默认业务时区并告警
pub fn parse_timezone(name: &str, fallback: Tz) -> Tz {
    name.parse().unwrap_or_else(|_| {
        tracing::warn!(
            "Failed to parse timezone '{}', falling back to {}",
            name,
            fallback
        );
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Bogota;

    #[test]
    fn arrival_time_is_hour_minute() {
        let t = arrival_time(Bogota);
        assert_eq!(t.len(), 5);
        assert_eq!(t.as_bytes()[2], b':');
    }

    #[test]
    fn business_date_is_iso_day() {
        let d = business_date(Bogota);
        assert_eq!(d.len(), 10);
        assert_eq!(&d[4..5], "-");
        assert_eq!(&d[7..8], "-");
    }

    #[test]
    fn unknown_timezone_falls_back() {
        assert_eq!(parse_timezone("Mars/Olympus", Bogota), Bogota);
        assert_eq!(parse_timezone("Europe/Madrid", Bogota), chrono_tz::Europe::Madrid);
    }
}
