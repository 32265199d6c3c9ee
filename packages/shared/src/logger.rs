//! Logging setup utilities for the Boardroom binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events are enabled by the default filter.
const LOG_TARGETS: [&str; 4] = [
    "boardroom_server",
    "boardroom_client",
    "boardroom_shared",
    "tower_http",
];

/// Build the default filter directive for the given binary and level.
///
/// The binary name is normalised the same way Rust normalises crate names
/// (`-` becomes `_`), so `boardroom-server` and `boardroom_server` are equal.
pub fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut directives: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect();

    if !LOG_TARGETS.contains(&binary_target.as_str()) {
        directives.push(format!("{}={}", binary_target, default_log_level));
    }

    directives.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "boardroom-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn")
///
/// # Examples
///
/// ```no_run
/// use boardroom_shared::logger::setup_logger;
///
/// setup_logger("boardroom-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_contains_all_workspace_crates() {
        // テスト項目: 既定のフィルタにワークスペースの全クレートが含まれる
        // given (前提条件):
        let binary_name = "boardroom-server";

        // when (操作):
        let directive = default_directive(binary_name, "debug");

        // then (期待する結果):
        assert!(directive.contains("boardroom_server=debug"));
        assert!(directive.contains("boardroom_client=debug"));
        assert!(directive.contains("tower_http=debug"));
        // binary と crate 名が同じなので重複しない
        assert_eq!(directive.matches("boardroom_server=").count(), 1);
    }

    #[test]
    fn test_default_directive_appends_unknown_binary() {
        // テスト項目: ワークスペース外の binary 名はフィルタに追加される
        // given (前提条件):
        let binary_name = "load-tester";

        // when (操作):
        let directive = default_directive(binary_name, "warn");

        // then (期待する結果):
        assert!(directive.ends_with("load_tester=warn"));
    }
}
