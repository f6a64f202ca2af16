use crate::utils::error::{ErrorSeverity, EtlError, Result};

/// Jobs whose failures are reported by the binaries instead of propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Import,
    Enrich,
}

/// What a binary prints and how it exits after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub stdout: Option<String>,
    pub stderr: Vec<String>,
    pub exit_code: i32,
}

impl RunOutcome {
    fn printed(line: String) -> Self {
        Self {
            stdout: Some(line),
            stderr: Vec::new(),
            exit_code: 0,
        }
    }

    /// Prints the outcome and returns the exit code.
    pub fn emit(&self) -> i32 {
        if let Some(line) = &self.stdout {
            println!("{}", line);
        }
        for line in &self.stderr {
            eprintln!("{}", line);
        }
        self.exit_code
    }
}

pub fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// Turns a job result into console output and an exit code.
///
/// The importer never fails the process. The enricher exits 0 on a missing
/// registry and by severity otherwise.
pub fn resolve(job: Job, result: Result<String>) -> RunOutcome {
    let e = match result {
        Ok(message) => return RunOutcome::printed(message),
        Err(e) if e.is_missing_input() => return RunOutcome::printed(e.user_friendly_message()),
        Err(e) => e,
    };

    match job {
        Job::Import => {
            tracing::error!("Import failed: {} (severity: {:?})", e, e.severity());
            RunOutcome::printed(format!("An error occurred: {}", e))
        }
        Job::Enrich => enrich_failure(&e),
    }
}

fn enrich_failure(e: &EtlError) -> RunOutcome {
    tracing::error!("Enrichment failed: {} (severity: {:?})", e, e.severity());
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
    RunOutcome {
        stdout: None,
        stderr: vec![
            format!("❌ {}", e.user_friendly_message()),
            format!("💡 {}", e.recovery_suggestion()),
        ],
        exit_code: exit_code(e.severity()),
    }
}
