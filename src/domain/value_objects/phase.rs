//! Pipeline phase of an asset within one run
//!
//! `Pending → Loading → Tagged → Pushed`, or `Failed`, or `Skipped`.

/// In-run state of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Pending,
    Loading,
    Tagged,
    Pushed,
    Failed,
    Skipped,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Pending => "PENDING",
            Phase::Loading => "LOADING",
            Phase::Tagged => "TAGGED",
            Phase::Pushed => "PUSHED",
            Phase::Failed => "FAILED",
            Phase::Skipped => "SKIPPED",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline step that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `docker load` or archive digest
    Load,
    /// `docker tag` or object key resolution
    Tag,
    /// `docker push` or object storage copy
    Push,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Load => "load",
            Step::Tag => "tag",
            Step::Push => "push",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
