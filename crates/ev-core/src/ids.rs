//! Strongly typed, zero-cost identifier wrappers.
//!
//! District names are the stable external identity; inside a graph they are
//! interned to a dense `DistrictId` so node and edge arrays can be indexed
//! directly.  Ids are only meaningful for the graph that issued them: a
//! filtered copy re-numbers its surviving districts.

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of a district node within one `DistrictGraph`.
    pub struct DistrictId(u32);
}

typed_id! {
    /// Index of an undirected district-to-district edge.
    pub struct EdgeId(u32);
}
