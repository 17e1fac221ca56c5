use std::fs;
use std::path::{Path, PathBuf};

use crate::eval::{CommandLine, Decision, RuleMatch, SegmentContext};
use crate::guards::Guard;

/// Managers whose bootstrap invocations (`python -m <manager> ...`) are
/// always allowed — that is how the manager gets installed in the first
/// place.
const BOOTSTRAP_MODULES: &[&str] = &[
    "poetry", "uv", "pdm", "hatch", "rye", "pixi", "pip", "conda", "mamba",
];

/// pyproject.toml `[tool.*]` sections that identify a manager.
const PYPROJECT_SECTIONS: &[(&str, &str)] = &[
    ("poetry", "poetry"),
    ("pdm", "pdm"),
    ("hatch", "hatch"),
    ("uv", "uv"),
];

/// Blocks direct `python`/`python3` invocations when the project carries a
/// package-manager marker, suggesting the manager's run command instead.
pub struct PythonManagerGuard {
    project_dir: PathBuf,
}

impl PythonManagerGuard {
    pub fn new(project_dir: PathBuf) -> Self {
        Self { project_dir }
    }
}

/// Whether a leading token is a python interpreter: `python`, `python2`,
/// `python3`, or a versioned variant like `python3.12`.
fn is_python(word: &str) -> bool {
    match word.strip_prefix("python") {
        Some("") => true,
        Some(rest) => {
            rest.chars().next().is_some_and(|c| c.is_ascii_digit())
                && rest.chars().all(|c| c.is_ascii_digit() || c == '.')
        }
        None => false,
    }
}

/// `python -m <manager>` bootstrap invocations pass through.
fn is_bootstrap(segment: &SegmentContext) -> bool {
    let args = segment.args();
    args.first().is_some_and(|w| w == "-m")
        && args
            .get(1)
            .is_some_and(|module| BOOTSTRAP_MODULES.contains(&module.as_str()))
}

/// The manager's run prefix.
fn run_command(manager: &str) -> &'static str {
    match manager {
        "poetry" => "poetry run",
        "uv" => "uv run",
        "pdm" => "pdm run",
        "hatch" => "hatch run",
        "rye" => "rye run",
        "pixi" => "pixi run",
        "conda" => "conda run -n <env_name>",
        "mamba" => "mamba run -n <env_name>",
        _ => "run",
    }
}

/// Detect every package manager the project directory carries markers for.
/// Filesystem errors read as "marker absent" — this layer fails open.
fn detect_managers(dir: &Path) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();
    let has = |name: &str| dir.join(name).exists();

    if has("poetry.lock") {
        found.push("poetry");
    }
    if let Ok(text) = fs::read_to_string(dir.join("pyproject.toml"))
        && let Ok(doc) = text.parse::<toml::Table>()
        && let Some(tool) = doc.get("tool").and_then(|t| t.as_table())
    {
        for &(section, manager) in PYPROJECT_SECTIONS {
            if tool.contains_key(section) {
                found.push(manager);
            }
        }
    }
    if has("uv.lock") {
        found.push("uv");
    }
    if has("rye.lock") || has(".rye") {
        found.push("rye");
    }
    if let Ok(text) = fs::read_to_string(dir.join(".python-version")) {
        // A bare .python-version usually means uv; rye leaves its name in it
        if text.to_lowercase().contains("rye") {
            found.push("rye");
        } else {
            found.push("uv");
        }
    }
    if has("pdm.lock") {
        found.push("pdm");
    }
    if has("pixi.lock") || has("pixi.toml") {
        found.push("pixi");
    }
    if has("environment.yml") || has("conda.yml") {
        found.push("conda");
    }

    let mut unique = Vec::new();
    for manager in found {
        if !unique.contains(&manager) {
            unique.push(manager);
        }
    }
    unique
}

impl Guard for PythonManagerGuard {
    fn name(&self) -> &'static str {
        "python-manager-enforcer"
    }

    fn evaluate(&self, line: &CommandLine) -> Option<RuleMatch> {
        for segment in &line.segments {
            if !is_python(&segment.leading) || is_bootstrap(segment) {
                continue;
            }
            let managers = detect_managers(&self.project_dir);
            match managers.as_slice() {
                [] => continue,
                [manager] => {
                    let suggestion =
                        format!("{} {}", run_command(manager), segment.command_text());
                    return Some(RuleMatch {
                        message: format!(
                            "❌ Direct {} blocked. Project uses {manager}: {suggestion}",
                            segment.leading
                        ),
                        decision: Decision::Block,
                        fragment: segment.leading.clone(),
                        suggestion,
                    });
                }
                many => {
                    // More than one marker present: report the conflict
                    // instead of silently picking a manager.
                    let names = many.join(", ");
                    let runs = many
                        .iter()
                        .map(|m| run_command(m))
                        .collect::<Vec<_>>()
                        .join(" / ");
                    return Some(RuleMatch {
                        message: format!(
                            "⚠️ Conflicting Python manager markers ({names}); \
                             not rewriting '{}'. Pick one explicitly: {runs}",
                            segment.raw
                        ),
                        decision: Decision::Warn,
                        fragment: segment.leading.clone(),
                        suggestion: runs,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let mut f = File::create(dir.path().join(name)).unwrap();
            write!(f, "{content}").unwrap();
        }
        dir
    }

    fn eval_in(dir: &TempDir, cmd: &str) -> Option<RuleMatch> {
        PythonManagerGuard::new(dir.path().to_path_buf())
            .evaluate(&CommandLine::parse(cmd))
    }

    #[test]
    fn python_name_forms() {
        assert!(is_python("python"));
        assert!(is_python("python2"));
        assert!(is_python("python3"));
        assert!(is_python("python3.12"));
        assert!(!is_python("pythonic"));
        assert!(!is_python("ipython"));
    }

    #[test]
    fn no_marker_allows() {
        let dir = project(&[]);
        assert!(eval_in(&dir, "python x.py").is_none());
    }

    #[test]
    fn poetry_lock_blocks() {
        let dir = project(&[("poetry.lock", "")]);
        let m = eval_in(&dir, "python x.py").unwrap();
        assert_eq!(m.decision, Decision::Block);
        assert!(m.suggestion.starts_with("poetry run"));
        assert!(m.message.contains("python x.py"));
    }

    #[test]
    fn pyproject_section_blocks() {
        let dir = project(&[("pyproject.toml", "[tool.uv]\ndev-dependencies = []\n")]);
        let m = eval_in(&dir, "python3 -c 'print(1)'").unwrap();
        assert!(m.suggestion.starts_with("uv run"));
    }

    #[test]
    fn pyproject_unrelated_sections_ignored() {
        let dir = project(&[("pyproject.toml", "[build-system]\nrequires = []\n")]);
        assert!(eval_in(&dir, "python x.py").is_none());
    }

    #[test]
    fn malformed_pyproject_fails_open() {
        let dir = project(&[("pyproject.toml", "not [valid toml")]);
        assert!(eval_in(&dir, "python x.py").is_none());
    }

    #[test]
    fn python_version_file_means_uv() {
        let dir = project(&[(".python-version", "3.12\n")]);
        let m = eval_in(&dir, "python x.py").unwrap();
        assert!(m.suggestion.starts_with("uv run"));
    }

    #[test]
    fn python_version_with_rye_marker() {
        let dir = project(&[(".python-version", "rye@3.12\n")]);
        let m = eval_in(&dir, "python x.py").unwrap();
        assert!(m.suggestion.starts_with("rye run"));
    }

    #[test]
    fn conda_yml_blocks() {
        let dir = project(&[("conda.yml", "name: env\n")]);
        let m = eval_in(&dir, "python3 train.py").unwrap();
        assert!(m.suggestion.contains("conda run"));
    }

    #[test]
    fn conflict_warns_and_names_all() {
        let dir = project(&[("poetry.lock", ""), ("uv.lock", "")]);
        let m = eval_in(&dir, "python x.py").unwrap();
        assert_eq!(m.decision, Decision::Warn);
        assert!(m.message.contains("poetry"));
        assert!(m.message.contains("uv"));
    }

    #[test]
    fn bootstrap_allows() {
        let dir = project(&[("poetry.lock", "")]);
        assert!(eval_in(&dir, "python -m pip install poetry").is_none());
        assert!(eval_in(&dir, "python3 -m uv sync").is_none());
    }

    #[test]
    fn non_bootstrap_module_still_blocks() {
        let dir = project(&[("poetry.lock", "")]);
        assert!(eval_in(&dir, "python -m http.server").is_some());
    }

    #[test]
    fn python_in_chain_blocks() {
        let dir = project(&[("poetry.lock", "")]);
        let m = eval_in(&dir, "cd sub && python x.py").unwrap();
        assert_eq!(m.decision, Decision::Block);
    }

    #[test]
    fn env_assignment_left_out_of_rewrite() {
        let dir = project(&[("poetry.lock", "")]);
        let m = eval_in(&dir, "FOO=1 python x.py").unwrap();
        assert_eq!(m.suggestion, "poetry run python x.py");
    }

    #[test]
    fn versioned_interpreter_blocks() {
        let dir = project(&[("uv.lock", "")]);
        assert!(eval_in(&dir, "python3.12 x.py").is_some());
    }
}
