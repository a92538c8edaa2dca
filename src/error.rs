use thiserror::Error;

/// Returned when a [`Variant`](crate::Variant) is read as an alternative that
/// is not the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BadVariantAccess {
    /// Nothing was live.
    #[error("bad variant access: alternative {requested} requested from an empty variant")]
    Empty {
        /// The position that was asked for.
        requested: usize,
    },
    /// A different alternative was live.
    #[error("bad variant access: alternative {requested} requested but alternative {live} is live")]
    Mismatch {
        /// The position that was asked for.
        requested: usize,
        /// The position that was live.
        live: usize,
    },
}

impl BadVariantAccess {
    pub(crate) fn new(requested: u8, live: Option<usize>) -> Self {
        let requested = usize::from(requested);
        match live {
            None => BadVariantAccess::Empty { requested },
            Some(live) => BadVariantAccess::Mismatch { requested, live },
        }
    }

    /// The position that was asked for.
    pub fn requested(&self) -> usize {
        match *self {
            BadVariantAccess::Empty { requested } | BadVariantAccess::Mismatch { requested, .. } => requested,
        }
    }

    /// The position that was live, if any.
    pub fn live(&self) -> Option<usize> {
        match *self {
            BadVariantAccess::Empty { .. } => None,
            BadVariantAccess::Mismatch { live, .. } => Some(live),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            BadVariantAccess::new(1, None).to_string(),
            "bad variant access: alternative 1 requested from an empty variant"
        );
        assert_eq!(
            BadVariantAccess::new(0, Some(2)).to_string(),
            "bad variant access: alternative 0 requested but alternative 2 is live"
        );
    }

    #[test]
    fn accessors() {
        let err = BadVariantAccess::new(3, Some(1));
        assert_eq!(err.requested(), 3);
        assert_eq!(err.live(), Some(1));
        assert_eq!(BadVariantAccess::new(3, None).live(), None);
    }
}
