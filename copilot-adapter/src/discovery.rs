//! Locates the Copilot CLI binary on the host system.
//!
//! Copilot ships through npm (`@github/copilot`), Homebrew (`copilot-cli`),
//! winget (`GitHub.Copilot`) and an install script that drops the binary in
//! `~/.local/bin`. When the executable is not on `PATH` those install roots
//! are searched directly.

use crate::error::CopilotError;
use std::path::{Path, PathBuf};
use which::which;

/// Environment variable that overrides the default Copilot CLI binary path.
pub const COPILOT_BIN_ENV_VAR: &str = "COPILOT_ADAPTER_BIN";

const INSTALL_HINT: &str = "Install one of:\n  \
    npm install -g @github/copilot\n  \
    brew install copilot-cli\n  \
    winget install GitHub.Copilot";

/// Locates the Copilot CLI executable.
///
/// Resolution order:
/// 1. `explicit_path`, which must be an executable file. No fallback is tried.
/// 2. The path in `COPILOT_ADAPTER_BIN`, if it names an executable file.
/// 3. `copilot` resolved via `$PATH`.
/// 4. npm, Homebrew, winget and install-script locations.
///
/// # Errors
///
/// Returns `CopilotError::ExecutableNotFound` when the explicit path is not
/// an executable file or nothing else turns one up.
pub fn discover_copilot(explicit_path: Option<PathBuf>) -> Result<PathBuf, CopilotError> {
    if let Some(path) = explicit_path {
        return check_explicit(path);
    }

    let env_override = std::env::var_os(COPILOT_BIN_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);

    resolve(env_override, || which("copilot").ok(), fallback_locations)
}

fn check_explicit(path: PathBuf) -> Result<PathBuf, CopilotError> {
    if is_executable(&path) {
        return Ok(path);
    }
    let problem = if path.exists() {
        "is not an executable file"
    } else {
        "does not exist"
    };
    Err(CopilotError::ExecutableNotFound(format!(
        "Explicit path {problem}: {}",
        path.display()
    )))
}

/// Steps 2-4 of [`discover_copilot`], with the lookups passed in.
fn resolve(
    env_override: Option<PathBuf>,
    on_path: impl FnOnce() -> Option<PathBuf>,
    fallbacks: impl FnOnce() -> Vec<PathBuf>,
) -> Result<PathBuf, CopilotError> {
    if let Some(path) = env_override {
        if is_executable(&path) {
            return Ok(path);
        }
        tracing::warn!(
            path = %path.display(),
            "{} is not an executable file, falling back to PATH",
            COPILOT_BIN_ENV_VAR
        );
    }

    if let Some(path) = on_path() {
        return Ok(path);
    }

    let candidates = fallbacks();
    if let Some(found) = candidates.iter().find(|p| is_executable(p)) {
        tracing::debug!(path = %found.display(), "copilot found outside PATH");
        return Ok(found.clone());
    }

    let searched: Vec<String> = candidates
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect();
    Err(CopilotError::ExecutableNotFound(format!(
        "copilot not found on PATH or in:\n{}\n{INSTALL_HINT}",
        searched.join("\n")
    )))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(unix)]
fn fallback_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(prefix) = std::env::var_os("NPM_CONFIG_PREFIX") {
        locations.push(PathBuf::from(prefix).join("bin/copilot"));
    }
    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".npm-global/bin/copilot"));
        // install script default
        locations.push(home.join(".local/bin/copilot"));
    }
    // Homebrew on Apple silicon, Linuxbrew, then Intel Homebrew / npm default prefix
    locations.push(PathBuf::from("/opt/homebrew/bin/copilot"));
    locations.push(PathBuf::from("/home/linuxbrew/.linuxbrew/bin/copilot"));
    locations.push(PathBuf::from("/usr/local/bin/copilot"));
    locations
}

#[cfg(windows)]
fn fallback_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(prefix) = std::env::var_os("NPM_CONFIG_PREFIX") {
        locations.push(PathBuf::from(prefix).join("copilot.cmd"));
    }
    if let Some(local) = dirs::data_local_dir() {
        locations.push(local.join(r"Microsoft\WinGet\Links\copilot.exe"));
    }
    if let Some(roaming) = dirs::data_dir() {
        locations.push(roaming.join(r"npm\copilot.cmd"));
    }
    locations
}
