// src/logger.rs

// `log` クレートのマクロ (info! とか warn! とか) の出力先を、ブラウザのコンソールにつなぐよ！
// レベルに合わせて console.error / warn / info / debug を使い分けるので、
// DevTools のフィルタがそのまま効く。

use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger {
    level: Level,
}

static LOGGER: ConsoleLogger = ConsoleLogger { level: Level::Debug };

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        let message = wasm_bindgen::JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}", record.target(), record.args())
}

/// 一回だけ登録する。二回目以降は何もしない。
pub fn init(max_level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_carries_its_target() {
        let line = format_record(
            &Record::builder()
                .args(format_args!("drag start #3"))
                .target("map_recall::systems")
                .level(Level::Debug)
                .build(),
        );
        assert_eq!(line, "[map_recall::systems] drag start #3");
    }

    #[test]
    fn trace_is_filtered_out() {
        let trace = Metadata::builder().level(Level::Trace).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!LOGGER.enabled(&trace));
        assert!(LOGGER.enabled(&warn));
    }
}
