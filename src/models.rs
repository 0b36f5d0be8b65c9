//! Page Models
//!
//! Small value types shared by the handlers.

/// Color theme applied to the document root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a stored value; anything but `dark`/`light` is rejected
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Aviso counter adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvisoAction {
    Inc,
    Dec,
}

impl AvisoAction {
    /// Path segment used by the verificaciones endpoints
    pub fn as_str(&self) -> &'static str {
        match self {
            AvisoAction::Inc => "inc",
            AvisoAction::Dec => "dec",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "inc" => Some(AvisoAction::Inc),
            "dec" => Some(AvisoAction::Dec),
            _ => None,
        }
    }

    /// Next count after this action; decrement floors at zero
    pub fn apply(&self, count: u32) -> u32 {
        match self {
            AvisoAction::Inc => count.saturating_add(1),
            AvisoAction::Dec => count.saturating_sub(1),
        }
    }
}

/// Badge severity for an aviso count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeLevel {
    Ok,
    Warn,
    Bad,
}

impl BadgeLevel {
    pub const ALL: [BadgeLevel; 3] = [BadgeLevel::Ok, BadgeLevel::Warn, BadgeLevel::Bad];

    pub fn for_count(count: u32) -> Self {
        match count {
            0 | 1 => BadgeLevel::Ok,
            2 => BadgeLevel::Warn,
            _ => BadgeLevel::Bad,
        }
    }
}

/// Parse a badge numeral; garbage and negatives read as 0
pub fn parse_count(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

/// Row ordering requested through `?sort=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// `asc` (any case) selects ascending, everything else the default
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "asc" => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Composite row key: expediente year, month, then sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SortKey {
    pub year: i64,
    pub month: i64,
    pub num: i64,
}

impl SortKey {
    pub fn new(year: i64, month: i64, num: i64) -> Self {
        Self { year, month, num }
    }

    /// Build a key from raw attribute values, missing or non-numeric parts as 0
    pub fn from_attrs(year: Option<&str>, month: Option<&str>, num: Option<&str>) -> Self {
        fn part(raw: Option<&str>) -> i64 {
            raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
        }
        Self::new(part(year), part(month), part(num))
    }
}
