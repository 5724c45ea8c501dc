//! Bootstrap run stages.

use std::fmt;

/// Position of a bootstrap run in its fixed step sequence.
///
/// Runs move strictly forward through [`Stage::SEQUENCE`]. Any failure jumps
/// straight to [`Stage::Failed`], which is terminal like [`Stage::Done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CheckingPrerequisite,
    CreatingDirectories,
    ValidatingManifest,
    Building,
    EnsuringConfig,
    Done,
    Failed,
}

impl Stage {
    /// Working stages in run order.
    pub const SEQUENCE: [Stage; 5] = [
        Stage::CheckingPrerequisite,
        Stage::CreatingDirectories,
        Stage::ValidatingManifest,
        Stage::Building,
        Stage::EnsuringConfig,
    ];

    /// The stage that follows a successful `self`.
    #[must_use]
    pub const fn next(self) -> Stage {
        match self {
            Stage::CheckingPrerequisite => Stage::CreatingDirectories,
            Stage::CreatingDirectories => Stage::ValidatingManifest,
            Stage::ValidatingManifest => Stage::Building,
            Stage::Building => Stage::EnsuringConfig,
            Stage::EnsuringConfig | Stage::Done => Stage::Done,
            Stage::Failed => Stage::Failed,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }

    /// Lowercase label used in logs and operator output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Stage::CheckingPrerequisite => "checking prerequisite",
            Stage::CreatingDirectories => "creating directories",
            Stage::ValidatingManifest => "validating manifest",
            Stage::Building => "building image",
            Stage::EnsuringConfig => "ensuring config",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
