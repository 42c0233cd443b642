use serde::Serialize;
use std::fmt;

/// Outcome of one check in one round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Error,
}

impl CheckStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "✓",
            CheckStatus::Fail => "✗",
            CheckStatus::Error => "!",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub path: &'static str,
    pub round: u32,
    pub status: CheckStatus,
    pub observed_status: Option<u16>,
    pub duration_ms: u64,
    pub message: Option<String>,
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} GET {} [round {}, {}ms]",
            self.status.symbol(),
            self.name,
            self.path,
            self.round,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {}", msg)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct VerificationReport {
    pub target: String,
    pub outcomes: Vec<CheckOutcome>,
}

impl VerificationReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status == CheckStatus::Pass).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        !self.outcomes.is_empty() && self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| o.status != CheckStatus::Pass)
    }

    /// Pretty-printed JSON form for CI consumers
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Fails when any check did not pass, so the process exits non-zero
    pub fn ensure_passed(&self) -> anyhow::Result<()> {
        if self.all_passed() {
            return Ok(());
        }
        anyhow::bail!("{} contract check(s) failed against {}", self.failed(), self.target)
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Contract verification against {}", self.target)?;
        for outcome in &self.outcomes {
            writeln!(f, "  {}", outcome)?;
        }
        write!(f, "{} passed, {} failed", self.passed(), self.failed())
    }
}
