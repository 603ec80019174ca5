use log::LevelFilter;

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        Self {
            full_screen: false,
            log_level: std::env::var("NFLBOARD_LOG").ok().and_then(parse_level),
        }
    }
}

fn parse_level(value: String) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(parse_level("DEBUG".into()), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" info ".into()), Some(LevelFilter::Info));
        assert_eq!(parse_level("verbose".into()), None);
    }
}
