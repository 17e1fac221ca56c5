//! cc-cmdguard: PreToolUse hook for Claude Code.
//!
//! Reads the hook payload from stdin, classifies the Bash command, and
//! signals the decision through the process exit status:
//!   0 — allow (warnings, if any, on stderr)
//!   2 — block, with an actionable diagnostic on stderr
//!
//! Every failure path exits 0: the hook is advisory and must never strand
//! the user's command on an internal error.

use std::io::Read;
use std::path::PathBuf;

use cc_cmdguard::config::Settings;
use cc_cmdguard::eval::{Decision, GuardRegistry, RuleMatch};
use cc_cmdguard::hook::HookEvent;
use cc_cmdguard::logging;
use cc_cmdguard::probe::PathProbe;

fn evaluate(command: &str) -> RuleMatch {
    let settings = Settings::load();
    let project_dir = std::env::var_os("CLAUDE_PROJECT_DIR")
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default();

    let registry = GuardRegistry::from_settings(&settings, &PathProbe, project_dir);
    let result = registry.evaluate(command);

    if result.decision == Decision::Block {
        logging::log_blocked(&settings.command_guards, command, &result);
        if settings.command_guards.notify_on_block {
            logging::notify_block(&result.message);
        }
    }
    result
}

fn main() {
    logging::init_debug_logger();

    let mut payload = String::new();
    if std::io::stdin().read_to_string(&mut payload).is_err() {
        // Unreadable stdin is the same as no command
        std::process::exit(0);
    }

    let event = HookEvent::from_json(&payload);
    if !event.is_bash() || event.command().is_empty() {
        std::process::exit(0);
    }
    let command = event.command();

    // A panic anywhere in evaluation collapses to allow: the host would
    // read a crash as noise, and a false block costs more than a miss.
    // The hook is silenced so a panic message can't leak to stderr.
    std::panic::set_hook(Box::new(|_| {}));
    let verdict =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| evaluate(command)));

    match verdict {
        Ok(result) => {
            if !result.message.is_empty()
                && matches!(result.decision, Decision::Warn | Decision::Block)
            {
                eprintln!("{}", result.message);
            }
            std::process::exit(result.decision.exit_code());
        }
        Err(_) => std::process::exit(0),
    }
}
