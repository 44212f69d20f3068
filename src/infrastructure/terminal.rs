//! Streamed, cancellable subprocess execution
//!
//! Output is logged line by line as it arrives: stdout at `info`, stderr at
//! `error`.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::cancel::CancelToken;
use crate::domain::ports::{CommandRunner, ProcessError};

/// How often a running child is checked for exit
const WAIT_INTERVAL: Duration = Duration::from_millis(50);

/// Run `command` to completion, killing it if `cancel` fires.
pub fn run_streamed(mut command: Command, cancel: &CancelToken) -> Result<(), ProcessError> {
    let program = command.get_program().to_string_lossy().into_owned();
    debug!("Running {:?}", command);

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;

    let readers: Vec<JoinHandle<()>> = [
        child.stdout.take().map(|out| stream_lines(out, false)),
        child.stderr.take().map(|err| stream_lines(err, true)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let result = wait_for(&mut child, cancel);
    if matches!(result, Err(ProcessError::Cancelled)) {
        return result;
    }
    drain(readers, cancel)?;
    result
}

/// Wait for the output readers to reach end of file.
///
/// Background grandchildren inherit the pipes and can keep them open long
/// after the child exits; cancellation abandons the readers.
fn drain(readers: Vec<JoinHandle<()>>, cancel: &CancelToken) -> Result<(), ProcessError> {
    while !readers.iter().all(JoinHandle::is_finished) {
        if cancel.wait_timeout(WAIT_INTERVAL) {
            debug!("Abandoning output still held open by a background process");
            return Err(ProcessError::Cancelled);
        }
    }
    for reader in readers {
        let _ = reader.join();
    }
    Ok(())
}

fn stream_lines<R: Read + Send + 'static>(source: R, is_stderr: bool) -> JoinHandle<()> {
    thread::spawn(move || {
        for line in BufReader::new(source).lines().map_while(Result::ok) {
            if is_stderr {
                error!("{}", line);
            } else {
                info!("{}", line);
            }
        }
    })
}

fn wait_for(child: &mut Child, cancel: &CancelToken) -> Result<(), ProcessError> {
    loop {
        if let Some(status) = child.try_wait().map_err(ProcessError::Io)? {
            return if status.success() {
                Ok(())
            } else {
                Err(ProcessError::Exit {
                    code: status.code(),
                })
            };
        }
        if cancel.wait_timeout(WAIT_INTERVAL) {
            debug!("Killing process {}", child.id());
            let _ = child.kill();
            let _ = child.wait();
            return Err(ProcessError::Cancelled);
        }
    }
}

/// Runs command triggers through the platform shell
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    fn shell(command: &str) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        }
        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command: &str, working_dir: &Path, cancel: &CancelToken) -> Result<(), ProcessError> {
        let mut cmd = Self::shell(command);
        cmd.current_dir(working_dir);
        run_streamed(cmd, cancel)
    }
}
