//! INI file configuration adapter.

use crate::domain::error::TraderError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TraderError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| TraderError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, TraderError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| TraderError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const FULL: &str = r#"
[data]
dir = /srv/prices
ticker = 1303
period = 2y

[strategy]
sma_short = 7
sma_long = 10
rsi_threshold = 40.5
adl_short = 19
adl_long = 25

[backtest]
initial_investment = 100000
currency = SAR
"#;

    #[test]
    fn from_string_parses_all_sections() {
        let adapter = FileConfigAdapter::from_string(FULL).unwrap();
        assert_eq!(
            adapter.get_string("data", "dir"),
            Some("/srv/prices".to_string())
        );
        assert_eq!(adapter.get_string("data", "period"), Some("2y".to_string()));
        assert_eq!(
            adapter.get_string("strategy", "rsi_threshold"),
            Some("40.5".to_string())
        );
        assert_eq!(
            adapter.get_string("backtest", "initial_investment"),
            Some("100000".to_string())
        );
    }

    #[test]
    fn section_and_key_names_are_case_insensitive() {
        let adapter = FileConfigAdapter::from_string("[Strategy]\nSMA_Short = 3\n").unwrap();
        assert_eq!(
            adapter.get_string("strategy", "sma_short"),
            Some("3".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[data]\nticker = AAPL\n").unwrap();
        assert_eq!(adapter.get_string("data", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config(FULL);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("data", "ticker"), Some("1303".to_string()));
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(result, Err(TraderError::ConfigParse { .. })));
    }
}
