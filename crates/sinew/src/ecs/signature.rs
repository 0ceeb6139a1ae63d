//! # Signature — Which Component Types an Entity Has
//!
//! Every registered component type gets a small [`ComponentId`] at
//! registration time. A [`Signature`] is a fixed-width bitset with one bit per
//! id: bit *i* is set for an entity exactly when the packed store for
//! component *i* holds data for it.
//!
//! Systems carry a signature too: the set of components they require. An
//! entity matches a system when its signature is a *superset* of the system's.
//!
//! ```text
//! entity:  0b1011   (Position, Velocity, Health)
//! system:  0b0011   (Position, Velocity)
//! entity & system == system  → match
//! ```
//!
//! ## Comparison
//!
//! - **bevy_ecs**: `FixedBitSet` of component ids per archetype, growable.
//! - **sinew**: a `Copy` 256-bit array. Comparing two signatures is four
//!   `u64` operations and never allocates.

use std::any::TypeId;
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Upper bound on the number of distinct component types in one world.
pub const MAX_COMPONENTS: usize = 255;

const WORDS: usize = 4;

/// Small integer handle minted by
/// [`World::register_component`](super::world::World::register_component).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ComponentId(pub(crate) u8);

impl ComponentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fixed-width bitset over [`ComponentId`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signature {
    bits: [u64; WORDS],
}

impl Signature {
    /// The empty signature. Matches every entity when used as a system
    /// requirement.
    pub const EMPTY: Signature = Signature { bits: [0; WORDS] };

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn set(&mut self, id: ComponentId) {
        let (word, bit) = locate(id);
        self.bits[word] |= 1 << bit;
    }

    pub fn clear(&mut self, id: ComponentId) {
        let (word, bit) = locate(id);
        self.bits[word] &= !(1 << bit);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, id: ComponentId) -> Self {
        self.set(id);
        self
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        let (word, bit) = locate(id);
        self.bits[word] & (1 << bit) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|w| *w == 0)
    }

    /// Number of set bits.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// `(self & required) == required`.
    pub fn is_superset_of(&self, required: &Signature) -> bool {
        (*self & *required) == *required
    }

    /// Iterate over the set ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
        (0..MAX_COMPONENTS)
            .map(|i| ComponentId(i as u8))
            .filter(move |id| self.contains(*id))
    }
}

fn locate(id: ComponentId) -> (usize, u32) {
    let index = id.index();
    (index / 64, (index % 64) as u32)
}

impl BitAnd for Signature {
    type Output = Signature;

    fn bitand(self, rhs: Signature) -> Signature {
        let mut bits = self.bits;
        for (word, other) in bits.iter_mut().zip(rhs.bits) {
            *word &= other;
        }
        Signature { bits }
    }
}

impl BitOr for Signature {
    type Output = Signature;

    fn bitor(self, rhs: Signature) -> Signature {
        let mut bits = self.bits;
        for (word, other) in bits.iter_mut().zip(rhs.bits) {
            *word |= other;
        }
        Signature { bits }
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|id| id.0)).finish()
    }
}

/// A fixed set of component types, used to declare what a system requires.
///
/// Implemented for `()` (no requirements) and tuples of up to eight types, so
/// `world.add_system::<Movement, (Position, Velocity)>()` reads naturally.
pub trait ComponentSet {
    /// `(TypeId, type name)` for each member, in declaration order.
    fn type_ids() -> Vec<(TypeId, &'static str)>;
}

impl ComponentSet for () {
    fn type_ids() -> Vec<(TypeId, &'static str)> {
        Vec::new()
    }
}

macro_rules! impl_component_set {
    ($($T:ident),+) => {
        impl<$($T: 'static),+> ComponentSet for ($($T,)+) {
            fn type_ids() -> Vec<(TypeId, &'static str)> {
                vec![$((TypeId::of::<$T>(), std::any::type_name::<$T>())),+]
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(ids: &[u8]) -> Signature {
        ids.iter().fold(Signature::new(), |s, &i| s.with(ComponentId(i)))
    }

    #[test]
    fn set_clear_contains() {
        let mut s = Signature::new();
        s.set(ComponentId(3));
        s.set(ComponentId(200));
        assert!(s.contains(ComponentId(3)));
        assert!(s.contains(ComponentId(200)));
        assert!(!s.contains(ComponentId(4)));
        assert_eq!(s.len(), 2);

        s.clear(ComponentId(3));
        assert!(!s.contains(ComponentId(3)));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn highest_id_fits() {
        let s = sig(&[254]);
        assert!(s.contains(ComponentId(254)));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![ComponentId(254)]);
    }

    #[test]
    fn superset_not_equality() {
        let ab = sig(&[0, 1]);
        let abc = sig(&[0, 1, 2]);
        let a = sig(&[0]);
        assert!(abc.is_superset_of(&ab));
        assert!(ab.is_superset_of(&ab));
        assert!(!a.is_superset_of(&ab));
        assert!(!sig(&[0, 2]).is_superset_of(&ab));
    }

    #[test]
    fn empty_requirement_matches_everything() {
        assert!(Signature::EMPTY.is_superset_of(&Signature::EMPTY));
        assert!(sig(&[5, 70]).is_superset_of(&Signature::EMPTY));
        assert!(Signature::EMPTY.is_empty());
    }

    #[test]
    fn bit_ops_across_words() {
        let x = sig(&[1, 65, 130]);
        let y = sig(&[65, 130, 191]);
        assert_eq!(x & y, sig(&[65, 130]));
        assert_eq!(x | y, sig(&[1, 65, 130, 191]));
    }

    #[test]
    fn debug_lists_ids() {
        assert_eq!(format!("{:?}", sig(&[2, 9])), "{2, 9}");
    }

    #[test]
    fn component_set_type_ids() {
        assert!(<() as ComponentSet>::type_ids().is_empty());
        let ids = <(u32, f32) as ComponentSet>::type_ids();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].0, TypeId::of::<u32>());
        assert_eq!(ids[1].1, "f32");
    }
}
