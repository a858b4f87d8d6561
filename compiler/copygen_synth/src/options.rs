//! Run-wide synthesis settings.

use crate::DepthArg;

/// How deep generated constructors copy relational fields.
///
/// Selected once for a whole generation run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DepthPolicy {
    /// Constructors take no depth flag and always rebuild nested values.
    #[default]
    AlwaysDeep,

    /// Constructors take a boolean depth flag. `false` shares relational
    /// fields by reference, `true` rebuilds them (and everything below them)
    /// deeply.
    FlagControlled,
}

impl DepthPolicy {
    /// Whether synthesized constructors declare a depth-flag parameter.
    #[inline]
    pub fn takes_flag(self) -> bool {
        matches!(self, DepthPolicy::FlagControlled)
    }

    /// The depth argument generated code passes to a nested constructor.
    ///
    /// Under `FlagControlled` nested calls only happen on the deep path, so
    /// the flag is fixed to deep from there on.
    #[inline]
    pub fn nested_depth(self) -> DepthArg {
        match self {
            DepthPolicy::AlwaysDeep => DepthArg::Omitted,
            DepthPolicy::FlagControlled => DepthArg::Deep,
        }
    }
}

/// Options for [`synthesize`](crate::synthesize).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SynthOptions {
    pub policy: DepthPolicy,
    /// Synthesize class constructors on the rayon pool.
    pub parallel: bool,
}

impl SynthOptions {
    pub fn always_deep() -> Self {
        Self {
            policy: DepthPolicy::AlwaysDeep,
            parallel: false,
        }
    }

    pub fn flag_controlled() -> Self {
        Self {
            policy: DepthPolicy::FlagControlled,
            parallel: false,
        }
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
