use log::LevelFilter;
use log4rs::{
    Config,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Root, runtime::ConfigErrors},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use thiserror::Error;

const LOG_SIZE_LIMIT: u64 = 10 * 1024 * 1024; // 10 MB

const LOG_FILE_COUNT: u32 = 3;

const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%S%.3fZ)(utc)} {l} - {m}\n";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid LOG_ARCHIVE_PATTERN: {0}")]
    Roller(String),
    #[error("failed to open log file: {0}")]
    File(#[from] std::io::Error),
    #[error("invalid logger configuration: {0}")]
    Config(#[from] ConfigErrors),
    #[error("logger already initialized: {0}")]
    Init(#[from] log::SetLoggerError),
}

/// Logs info and above to stderr. When `LOG_FILE_PATH` and `LOG_ARCHIVE_PATTERN`
/// are both set, debug and above also go to a size-rolled log file.
pub fn init_logger() -> Result<(), LoggerError> {
    let stderr_level = LevelFilter::Info;
    let file_level = LevelFilter::Debug;

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut config = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(stderr_level)))
            .build("stderr", Box::new(stderr)),
    );
    let mut root = Root::builder().appender("stderr");

    if let (Ok(file_path), Ok(archive_pattern)) = (
        std::env::var("LOG_FILE_PATH"),
        std::env::var("LOG_ARCHIVE_PATTERN"),
    ) {
        let trigger = SizeTrigger::new(LOG_SIZE_LIMIT);
        let roller = FixedWindowRoller::builder()
            .build(&archive_pattern, LOG_FILE_COUNT)
            .map_err(|e| LoggerError::Roller(e.to_string()))?;
        let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

        let logfile = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(file_path, Box::new(policy))?;

        config = config.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(file_level)))
                .build("logfile", Box::new(logfile)),
        );
        root = root.appender("logfile");
    }

    let config = config.build(root.build(LevelFilter::Trace))?;
    let _handle = log4rs::init_config(config)?;
    Ok(())
}
