use portage_configuration::app::{LogLevel, LogStyle};
use tracing::Subscriber;
use tracing_subscriber::{filter::LevelFilter, fmt, registry::LookupSpan, Layer};

/// Convert configuration LogLevel to tracing LevelFilter
pub fn log_level_to_level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Info => LevelFilter::INFO,
    }
}

/// Build a boxed fmt Layer in the configured output style.
///
/// The type params on a fmt Layer follow its formatting mode, so each
/// mode produces a differently-typed `Layered` subscriber once applied.
/// Boxing erases the mode and keeps subscriber assembly legible.
pub fn log_style_layer<S>(style: LogStyle) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static,
{
    match style {
        LogStyle::Full => fmt::layer().boxed(),
        LogStyle::Pretty => fmt::layer().pretty().boxed(),
        LogStyle::Compact => fmt::layer().compact().boxed(),
        LogStyle::Json => fmt::layer().json().boxed(),
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[derive(serde::Deserialize)]
    struct TestStyle {
        style: LogStyle,
    }

    #[test]
    fn it_deserializes_formatting_strings() {
        let case = r#"{"style": "pretty"}"#;
        assert_eq!(
            serde_json::from_str::<TestStyle>(case).unwrap().style,
            LogStyle::Pretty
        );

        let case = r#"{"style": "compact"}"#;
        assert_eq!(
            serde_json::from_str::<TestStyle>(case).unwrap().style,
            LogStyle::Compact
        );

        let case = r#"{"style": "full"}"#;
        assert_eq!(
            serde_json::from_str::<TestStyle>(case).unwrap().style,
            LogStyle::Full
        );

        let case = r#"{"style": "json"}"#;
        assert_eq!(
            serde_json::from_str::<TestStyle>(case).unwrap().style,
            LogStyle::Json
        );

        let case = r#"{"style": "toast"}"#;
        assert_eq!(
            serde_json::from_str::<TestStyle>(case).unwrap().style,
            LogStyle::Full
        );
    }
}
