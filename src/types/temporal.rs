use std::{fmt, time::Duration};

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Количество наносекунд в секунде.
pub const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Момент времени с точностью до наносекунды.
///
/// Часовой пояс не хранится: любое значение нормализуется к UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomDateTime(DateTime<Utc>);

/// Неотрицательный промежуток времени.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomDuration(Duration);

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl CustomDateTime {
    /// Текущий момент.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Собирает момент из секунд от эпохи и остатка в наносекундах.
    ///
    /// Возвращает `None`, если `nanoseconds >= 1e9` или момент вне диапазона
    /// `chrono`.
    pub fn from_unix(
        seconds: i64,
        nanoseconds: u32,
    ) -> Option<Self> {
        if i128::from(nanoseconds) >= NANOS_PER_SECOND {
            return None;
        }
        DateTime::from_timestamp(seconds, nanoseconds).map(Self)
    }

    /// Собирает момент из полного числа наносекунд от эпохи.
    pub fn from_unix_nanos(total: i128) -> Option<Self> {
        let seconds = i64::try_from(total.div_euclid(NANOS_PER_SECOND)).ok()?;
        let nanoseconds = total.rem_euclid(NANOS_PER_SECOND) as u32;
        Self::from_unix(seconds, nanoseconds)
    }

    /// Полное число наносекунд от эпохи (отрицательное до 1970 года).
    pub fn unix_nanos(&self) -> i128 {
        // timestamp_subsec_nanos() может превышать 1e9 на секунде координации
        i128::from(self.0.timestamp()) * NANOS_PER_SECOND
            + i128::from(self.0.timestamp_subsec_nanos())
    }

    /// `floor(unix_nanos / 1e9)`.
    pub fn seconds(&self) -> i64 {
        self.unix_nanos().div_euclid(NANOS_PER_SECOND) as i64
    }

    /// `unix_nanos mod 1e9`, всегда в `[0, 999_999_999]`.
    pub fn nanoseconds(&self) -> u32 {
        self.unix_nanos().rem_euclid(NANOS_PER_SECOND) as u32
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl CustomDuration {
    /// Возвращает `None`, если `nanoseconds >= 1e9`.
    pub fn from_parts(
        seconds: u64,
        nanoseconds: u32,
    ) -> Option<Self> {
        if i128::from(nanoseconds) >= NANOS_PER_SECOND {
            return None;
        }
        Some(Self(Duration::new(seconds, nanoseconds)))
    }

    pub fn seconds(&self) -> u64 {
        self.0.as_secs()
    }

    pub fn nanoseconds(&self) -> u32 {
        self.0.subsec_nanos()
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl<Tz: TimeZone> From<DateTime<Tz>> for CustomDateTime {
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt.with_timezone(&Utc))
    }
}

impl From<CustomDateTime> for DateTime<Utc> {
    fn from(dt: CustomDateTime) -> Self {
        dt.0
    }
}

impl fmt::Display for CustomDateTime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl From<Duration> for CustomDuration {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}

impl From<CustomDuration> for Duration {
    fn from(d: CustomDuration) -> Self {
        d.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn test_pre_epoch_split_is_floor() {
        // -1.5 секунды: floor даёт -2 и остаток 0.5
        let dt = CustomDateTime::from_unix_nanos(-1_500_000_000).unwrap();
        assert_eq!(dt.seconds(), -2);
        assert_eq!(dt.nanoseconds(), 500_000_000);
        assert_eq!(dt.unix_nanos(), -1_500_000_000);
    }

    #[test]
    fn test_timezone_is_normalized() {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let dt = CustomDateTime::from(local);
        assert_eq!(
            dt.as_datetime(),
            &Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_from_unix_rejects_overflowing_nanos() {
        assert!(CustomDateTime::from_unix(0, 1_000_000_000).is_none());
        assert!(CustomDuration::from_parts(1, 1_000_000_000).is_none());
        assert_eq!(
            CustomDuration::from_parts(3, 400).unwrap().as_duration(),
            Duration::new(3, 400)
        );
    }
}
