//! Block-attempt logging and the optional debug logger.
//!
//! All of this is best-effort: a logging failure must never change the
//! decision or delay the hook past the host's timeout window.

use std::io::Write;
use std::path::PathBuf;

use crate::config::SharedSettings;
use crate::eval::RuleMatch;

/// Turn on the file-backed debug logger when `CC_CMDGUARD_DEBUG` names a
/// path. The hot path stays silent otherwise — the hook runs on every Bash
/// command.
pub fn init_debug_logger() {
    let Some(path) = std::env::var_os("CC_CMDGUARD_DEBUG") else {
        return;
    };
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    else {
        return;
    };
    let _ = simplelog::WriteLogger::init(
        log::LevelFilter::Debug,
        simplelog::Config::default(),
        file,
    );
}

/// Append one line per blocked attempt, timestamp-prefixed and
/// tab-separated. Append-only so concurrent invocations interleave whole
/// lines instead of corrupting each other.
pub fn log_blocked(settings: &SharedSettings, command: &str, result: &RuleMatch) {
    if !settings.log_blocked_attempts {
        return;
    }
    let Some(path) = resolve_log_path(settings) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    else {
        return;
    };

    let command_short: String = command.chars().take(200).collect();
    let message_oneline = result.message.replace('\n', "; ");
    let _ = writeln!(
        file,
        "{ts}\t{label}\t{fragment}\t{command_short}\t{message_oneline}",
        ts = utc_timestamp(),
        label = result.decision.label(),
        fragment = result.fragment,
    );
}

fn resolve_log_path(settings: &SharedSettings) -> Option<PathBuf> {
    if let Some(configured) = &settings.log_path {
        return Some(PathBuf::from(
            shellexpand::tilde(configured).into_owned(),
        ));
    }
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".claude/logs/cmdguard.log"))
}

/// Best-effort desktop notification on block. Failures and missing
/// notify-send binaries are ignored.
pub fn notify_block(message: &str) {
    let summary = message.lines().next().unwrap_or("command blocked");
    let _ = std::process::Command::new("notify-send")
        .arg("cc-cmdguard")
        .arg(summary)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn();
}

/// UTC timestamp without pulling in a date-time crate.
fn utc_timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let rem = secs % 86400;
    let (h, m, s) = (rem / 3600, (rem % 3600) / 60, rem % 60);
    let (year, month, day) = civil_from_days(secs / 86400);
    format!("{year:04}-{month:02}-{day:02}T{h:02}:{m:02}:{s:02}Z")
}

/// Days since the Unix epoch to (year, month, day).
/// Howard Hinnant's civil-from-days algorithm.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
