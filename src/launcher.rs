use crate::command::Command;
use crate::error::LaunchError;
use std::io::ErrorKind;
use std::process::Command as Process;
use tracing::{debug, info, warn};

/// Run `command` against `input` and wait for it.
///
/// Only a missing executable is reported distinctly; the child's exit status is
/// logged and otherwise ignored.
pub fn launch(command: &Command, input: &str) -> Result<(), LaunchError> {
    let argv = command.invocation(input);
    info!(command = %command.name, argv = ?argv, "launching");
    let status = Process::new(&argv[0])
        .args(&argv[1..])
        .status()
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound => LaunchError::ExecutableMissing {
                program: command.executable.clone(),
            },
            _ => LaunchError::Spawn {
                program: command.executable.clone(),
                source,
            },
        })?;
    if status.success() {
        debug!(command = %command.name, "exited cleanly");
    } else {
        warn!(command = %command.name, %status, "handler exited unsuccessfully");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_is_reported() {
        let c = Command::new(None, "/nonexistent/turmyx-test-handler", vec![], ["txt"]);
        match launch(&c, "notes.txt") {
            Err(LaunchError::ExecutableMissing { program }) => {
                assert_eq!(program, "/nonexistent/turmyx-test-handler")
            }
            other => panic!("expected ExecutableMissing, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn runs_handler_with_arguments_then_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        let c = Command::new(
            Some("sh"),
            "sh",
            vec!["-c".into(), format!("printf '%s' \"$0\" > '{}'", out.display())],
            ["txt"],
        );
        launch(&c, "notes.txt").unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "notes.txt");
    }
}
