use std::io;
use std::process::Command;

use crate::types::{ExitOutcome, Invocation};

/// Runs an external program to completion.
///
/// An `Err` means the program could not be started at all; a started program
/// that fails is reported through the returned [`ExitOutcome`].
pub trait ProcessLauncher {
    fn run(&mut self, invocation: &Invocation) -> io::Result<ExitOutcome>;
}

/// Spawns real child processes with inherited stdio and blocks until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn run(&mut self, invocation: &Invocation) -> io::Result<ExitOutcome> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()?;
        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}
