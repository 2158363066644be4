use chrono::{DateTime, Local, Locale, NaiveDate, NaiveDateTime, TimeZone};

/// What a browser prints for a timestamp it cannot parse.
pub const INVALID_DATE: &str = "Invalid Date";

/// Formats an ISO-8601 style timestamp as a local date and time in `locale`.
pub fn format_timestamp(raw: &str, locale: Locale) -> String {
    format_timestamp_in(raw, locale, &Local)
}

pub fn format_timestamp_in<Tz>(raw: &str, locale: Locale, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(raw.trim(), tz) {
        Some(timestamp) => timestamp.format_localized("%x %X", locale).to_string(),
        None => {
            tracing::debug!(raw, "unparseable timestamp");
            INVALID_DATE.to_string()
        }
    }
}

/// Timestamps without an offset are read as wall-clock time in `tz`; a bare
/// date means midnight.
fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(tz));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive).earliest()
}

/// Picks the best supported locale from an `Accept-Language` header value.
///
/// Tags are tried by descending quality. A bare language such as `ja` is
/// resolved to its usual region (`ja_JP`). Falls back to `fallback`, then to
/// `en_US`.
pub fn negotiate_locale(accept_language: Option<&str>, fallback: &str) -> Locale {
    let mut ranges: Vec<(&str, f32)> = accept_language
        .unwrap_or_default()
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let quality = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((tag, quality))
        })
        .filter(|(_, quality)| *quality > 0.0)
        .collect();

    // Stable, so equal weights keep header order.
    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranges
        .into_iter()
        .find_map(|(tag, _)| locale_for_tag(tag))
        .or_else(|| locale_for_tag(fallback))
        .unwrap_or(Locale::en_US)
}

// Languages whose usual region code is not the language code uppercased.
const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("ar", "ar_SA"),
    ("be", "be_BY"),
    ("bn", "bn_BD"),
    ("ca", "ca_ES"),
    ("cs", "cs_CZ"),
    ("da", "da_DK"),
    ("el", "el_GR"),
    ("en", "en_US"),
    ("et", "et_EE"),
    ("fa", "fa_IR"),
    ("ga", "ga_IE"),
    ("he", "he_IL"),
    ("hi", "hi_IN"),
    ("hy", "hy_AM"),
    ("ja", "ja_JP"),
    ("ka", "ka_GE"),
    ("kk", "kk_KZ"),
    ("ko", "ko_KR"),
    ("ms", "ms_MY"),
    ("nb", "nb_NO"),
    ("no", "nb_NO"),
    ("pt", "pt_BR"),
    ("sl", "sl_SI"),
    ("sq", "sq_AL"),
    ("sr", "sr_RS"),
    ("sv", "sv_SE"),
    ("ta", "ta_IN"),
    ("te", "te_IN"),
    ("uk", "uk_UA"),
    ("ur", "ur_PK"),
    ("vi", "vi_VN"),
    ("zh", "zh_CN"),
];

fn locale_for_tag(tag: &str) -> Option<Locale> {
    let normalized = tag.replace('-', "_");
    let mut pieces = normalized.splitn(2, '_');
    let language = pieces.next()?.to_ascii_lowercase();

    let candidate = match pieces.next() {
        Some(region) => format!("{}_{}", language, region.to_ascii_uppercase()),
        None => language.clone(),
    };

    let regional = DEFAULT_REGIONS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, locale)| (*locale).to_string())
        .unwrap_or_else(|| format!("{}_{}", language, language.to_ascii_uppercase()));

    Locale::try_from(candidate.as_str())
        .or_else(|_| Locale::try_from(regional.as_str()))
        .ok()
}
