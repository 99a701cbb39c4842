use std::collections::BTreeSet;

/// Owners of camera animations that gestures must not cancel.
///
/// Every gesture that interrupts running animations passes the current set to
/// [`AnimationDelegate::cancel_all_animators`](crate::delegate::AnimationDelegate::cancel_all_animators).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProtectedAnimationOwners {
    owners: BTreeSet<String>,
}

impl ProtectedAnimationOwners {
    /// Protects animations of the owner. Returns `false` if it was already protected.
    pub fn add(&mut self, owner: impl Into<String>) -> bool {
        self.owners.insert(owner.into())
    }

    /// Removes the protection. Returns `false` if the owner was not protected.
    pub fn remove(&mut self, owner: &str) -> bool {
        self.owners.remove(owner)
    }

    /// True if animations of the owner are protected.
    pub fn contains(&self, owner: &str) -> bool {
        self.owners.contains(owner)
    }

    /// True if nothing is protected.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Protected owners in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.owners.iter().map(String::as_str)
    }

    /// Protected owners in sorted order.
    pub fn to_vec(&self) -> Vec<String> {
        self.owners.iter().cloned().collect()
    }
}
