use std::io::Write;

use anyhow::Result;
use tracing::{debug, info};

use crate::clock::{Clock, elapsed_secs};
use crate::config::Config;
use crate::errors::BenchError;
use crate::launcher::ProcessLauncher;
use crate::report::{Report, Samples, format_run_line, format_summary_line};

/// Run the configured build command once and block until it exits.
pub fn build<L: ProcessLauncher>(config: &Config, launcher: &mut L) -> Result<()> {
    let invocation = config.build_invocation();
    info!(command = %invocation, "building subject binary");

    let status = launcher
        .run(&invocation)
        .map_err(|source| BenchError::BuildLaunch {
            program: invocation.program.display().to_string(),
            source,
        })?;

    if !status.success() {
        info!(%status, "build failed");
        return Err(BenchError::BuildFailed { status }.into());
    }

    debug!("build finished");
    Ok(())
}

/// Time `config.runs` sequential invocations of the subject binary, writing
/// one line per run to `out`.
///
/// The first failing iteration aborts the loop; later iterations are never
/// started and no summary is produced.
pub fn run_benchmark<L, C, W>(
    config: &Config,
    launcher: &mut L,
    clock: &C,
    out: &mut W,
) -> Result<Report>
where
    L: ProcessLauncher,
    C: Clock,
    W: Write,
{
    let runs = config.runs;
    if runs < 1 {
        return Err(BenchError::InvalidRunCount { runs }.into());
    }

    let invocation = config.subject_invocation();
    let mut samples = Samples::with_capacity(runs);

    for iteration in 1..=runs {
        debug!(iteration, runs, command = %invocation, "starting run");

        let start = clock.now();
        let result = launcher.run(&invocation);
        let end = clock.now();

        let status = result.map_err(|source| BenchError::RunLaunch {
            iteration,
            runs,
            source,
        })?;
        if !status.success() {
            info!(iteration, %status, "subject binary failed");
            return Err(BenchError::RunFailed {
                iteration,
                runs,
                status,
            }
            .into());
        }

        let elapsed = elapsed_secs(start, end);
        debug!(iteration, elapsed_secs = elapsed, "run finished");
        samples.push(elapsed);

        writeln!(out, "{}", format_run_line(iteration, runs, elapsed, config.unit))?;
    }

    let summary = samples
        .summarize()
        .ok_or(BenchError::InvalidRunCount { runs })?;
    Ok(Report { samples, summary })
}

/// Build, time every run, then print the average after a blank line.
pub fn run<L, C, W>(config: &Config, launcher: &mut L, clock: &C, out: &mut W) -> Result<Report>
where
    L: ProcessLauncher,
    C: Clock,
    W: Write,
{
    build(config, launcher)?;

    let report = run_benchmark(config, launcher, clock, out)?;

    debug!(runs = report.summary.runs, "reporting");
    writeln!(out)?;
    writeln!(out, "{}", format_summary_line(&report.summary, config.unit))?;
    out.flush()?;

    Ok(report)
}
