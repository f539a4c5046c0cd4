//! Evaluates `.ts`/`.js` translations files through an external command.

use anyhow::{Context as _, bail};
use colocale::{BoxError, FragmentMessages, ScriptLoader};
use std::path::Path;
use std::process::Command;

/// Runs `<command> <file>` through the platform shell and parses its stdout as JSON.
#[derive(Debug, Clone)]
pub struct CommandScriptLoader {
    command: String,
}

impl CommandScriptLoader {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn shell(&self, file: &Path) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C");
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };
        // On Unix the file path reaches the command as `$1`.
        if cfg!(windows) {
            cmd.arg(format!("{} \"{}\"", self.command, file.display()));
        } else {
            cmd.arg(format!("{} \"$1\"", self.command))
                .arg("colocale")
                .arg(file);
        }
        cmd
    }

    fn run(&self, file: &Path) -> anyhow::Result<FragmentMessages> {
        tracing::debug!("Running script loader `{}` for {}", self.command, file.display());

        let output = self
            .shell(file)
            .output()
            .with_context(|| format!("failed to run `{}`", self.command))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "`{}` exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            );
        }

        serde_json::from_slice(&output.stdout)
            .with_context(|| format!("`{}` did not print a translations object", self.command))
    }
}

impl ScriptLoader for CommandScriptLoader {
    fn load(&self, path: &Path) -> Result<FragmentMessages, BoxError> {
        self.run(path).map_err(Into::into)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[test]
    fn test_command_output_is_parsed() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("translations.ts");
        file.write_str(r#"{"en": {"title": "Hi"}}"#).unwrap();

        let loader = CommandScriptLoader::new("cat");
        let messages = loader.load(file.path()).unwrap();

        assert_eq!(messages["en"]["title"], colocale::MessageNode::from("Hi"));
    }

    #[test]
    fn test_non_zero_exit_is_an_error() {
        let temp = TempDir::new().unwrap();
        let loader = CommandScriptLoader::new("cat");

        let err = loader.load(&temp.path().join("missing.ts")).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }

    #[test]
    fn test_non_json_output_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("translations.js");
        file.write_str("export default {}").unwrap();

        let err = CommandScriptLoader::new("cat").load(file.path()).unwrap_err();
        assert!(err.to_string().contains("did not print a translations object"));
    }
}
