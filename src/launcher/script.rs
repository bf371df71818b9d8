use crate::core::error::{InstallerError, Result};
use crate::python::Venv;
use std::path::{Path, PathBuf};

/// Owner read/write/execute only.
pub const LAUNCHER_MODE: u32 = 0o700;

/// The generated wrapper: activates a fixed virtual environment, then
/// hands all arguments to a command inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherScript {
    target: PathBuf,
    venv_path: PathBuf,
    activate: String,
    command: String,
    interpreter: String,
}

impl LauncherScript {
    /// Fails with [`InstallerError::Config`] when the activation path is not
    /// valid UTF-8, since the launcher could not name it exactly.
    pub fn new(
        target: PathBuf,
        source_dir: PathBuf,
        venv_dir: impl Into<String>,
        command: impl Into<String>,
        interpreter: impl Into<String>,
    ) -> Result<Self> {
        let venv_path = source_dir.join(venv_dir.into());
        let activate = Venv::new(venv_path.clone()).activate_script();
        let activate = activate
            .to_str()
            .ok_or_else(|| {
                InstallerError::Config(format!(
                    "Virtual environment path is not valid UTF-8: {}",
                    venv_path.display()
                ))
            })?
            .to_string();

        Ok(Self {
            target,
            venv_path,
            activate,
            command: command.into(),
            interpreter: interpreter.into(),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn venv_path(&self) -> &Path {
        &self.venv_path
    }

    pub fn activate_path(&self) -> &str {
        &self.activate
    }

    pub fn render(&self) -> String {
        format!(
            "#!{}\n. {}\nexec {} \"$@\"\n",
            self.interpreter,
            shell_quote(&self.activate),
            self.command
        )
    }
}

/// What can be recovered from a launcher already on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLauncher {
    pub interpreter: String,
    pub venv_path: PathBuf,
    pub command: String,
}

/// Parses a launcher produced by [`LauncherScript::render`]. Anything else,
/// including a hand-edited launcher, returns `None`.
pub fn parse_launcher(content: &str) -> Option<ParsedLauncher> {
    let mut lines = content.lines();

    let interpreter = lines.next()?.strip_prefix("#!")?.to_string();

    let activate = PathBuf::from(shell_unquote(lines.next()?.strip_prefix(". ")?)?);
    let venv_path = activate.parent()?.parent()?.to_path_buf();
    if Venv::new(venv_path.clone()).activate_script() != activate {
        return None;
    }

    let command = lines
        .next()?
        .strip_prefix("exec ")?
        .strip_suffix(" \"$@\"")?
        .to_string();

    if lines.next().is_some() || !content.ends_with('\n') {
        return None;
    }
    if command.is_empty() || command.contains(char::is_whitespace) {
        return None;
    }

    Some(ParsedLauncher {
        interpreter,
        venv_path,
        command,
    })
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "/._-+:,@%=".contains(c)
}

/// Leaves shell-safe words untouched and single-quotes everything else.
pub fn shell_quote(word: &str) -> String {
    if !word.is_empty() && word.chars().all(is_shell_safe) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', "'\\''"))
}

fn shell_unquote(word: &str) -> Option<String> {
    if !word.starts_with('\'') {
        return word.chars().all(is_shell_safe).then(|| word.to_string());
    }

    let mut out = String::new();
    let mut rest = word;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("\\'") {
            out.push('\'');
            rest = after;
            continue;
        }
        let inner = rest.strip_prefix('\'')?;
        let end = inner.find('\'')?;
        out.push_str(&inner[..end]);
        rest = &inner[end + 1..];
    }
    Some(out)
}
