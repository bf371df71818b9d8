pub mod script;

pub use script::{parse_launcher, shell_quote, LauncherScript, ParsedLauncher, LAUNCHER_MODE};

use crate::core::error::Result;
use crate::core::{file_mode, resolve_write_target, set_mode, write_atomic};
use std::io::ErrorKind;

/// What an install did to the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Unchanged,
    Replaced,
    /// The previous file was not a launcher this tool would generate.
    ReplacedForeign,
}

impl LauncherScript {
    /// Writes the launcher over whatever is at the target and sets its mode.
    /// A symlinked target is written through, leaving the link in place.
    pub async fn install(&self) -> Result<WriteOutcome> {
        let rendered = self.render();
        let target = resolve_write_target(self.target()).await?;
        let target = target.as_path();

        let outcome = match tokio::fs::read(target).await {
            Ok(previous) if previous == rendered.as_bytes() => WriteOutcome::Unchanged,
            Ok(previous) => {
                let recognized = std::str::from_utf8(&previous)
                    .ok()
                    .and_then(parse_launcher)
                    .is_some();
                if recognized {
                    WriteOutcome::Replaced
                } else {
                    WriteOutcome::ReplacedForeign
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => WriteOutcome::Created,
            Err(e) => {
                tracing::debug!("could not read existing {}: {}", target.display(), e);
                WriteOutcome::ReplacedForeign
            }
        };

        if outcome == WriteOutcome::ReplacedForeign {
            tracing::warn!(
                "{} was not generated by this installer; overwriting it",
                target.display()
            );
        }

        write_atomic(target, rendered.as_bytes(), LAUNCHER_MODE).await?;

        if file_mode(target).await? != LAUNCHER_MODE {
            set_mode(target, LAUNCHER_MODE).await?;
        }

        Ok(outcome)
    }
}
