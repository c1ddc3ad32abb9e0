use ::log::{Level, LevelFilter, Log, Metadata, Record};

// [LEVEL](file:line) message の形式で標準エラー出力に書き出すロガー
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        eprintln!(
            "[{}]({}:{}) {}",
            tag,
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            record.args()
        );
    }

    fn flush(&self) {}
}

// 二回目以降の呼び出しは無視される
pub fn init(level: LevelFilter) {
    let logger = Box::new(StderrLogger { level });
    if ::log::set_boxed_logger(logger).is_ok() {
        ::log::set_max_level(level);
    }
}
