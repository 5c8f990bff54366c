/// Binding state of a capture hook.
///
/// ```text
/// idle ──set_source(name)──→ pending ──resolved on a later tick──→ bound
///   ↑                           │                                    │
///   └─────────set_source(None)──┴────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookState {
    /// No source name configured.
    Idle,
    /// A name is configured but no live source by that name exists yet.
    Pending { name: String },
    /// Subscribed to the named source's audio.
    Bound { name: String },
}

impl HookState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound { .. })
    }

    /// The configured source name, if any.
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Pending { name } | Self::Bound { name } => Some(name),
        }
    }
}
