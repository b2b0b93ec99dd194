use core::fmt;
use core::num::NonZeroU32;

/// Defines a compact, stable identifier for one kind of network object.
///
/// - `u32` keeps memory small
/// - `NonZero` lets `Option<Id>` use the niche
/// - one type per object kind so a link id can't index the node table
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create an id from a 0-based index by storing index+1.
            pub fn from_index(index: usize) -> Self {
                let raw = u32::try_from(index)
                    .ok()
                    .and_then(|i| i.checked_add(1))
                    .and_then(NonZeroU32::new)
                    .expect("id index fits in u32");
                Self(raw)
            }

            /// Recover the 0-based index.
            pub fn index(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $tag, self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.index())
            }
        }
    };
}

define_id!(
    /// Heat storage node (lumped thermal mass).
    HsnId,
    "Hsn"
);
define_id!(
    /// Interface node (contact surface of a heat storage node).
    IfnId,
    "Ifn"
);
define_id!(
    /// Directed link between two interface nodes.
    LinkId,
    "Link"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_usize, 1, 2, 42, 10_000] {
            assert_eq!(HsnId::from_index(i).index(), i);
            assert_eq!(LinkId::from_index(i).index(), i);
        }
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<IfnId>(),
            core::mem::size_of::<Option<IfnId>>()
        );
    }

    #[test]
    fn debug_carries_kind() {
        assert_eq!(format!("{:?}", LinkId::from_index(3)), "Link(3)");
        assert_eq!(format!("{}", HsnId::from_index(3)), "3");
    }
}
