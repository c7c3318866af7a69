//! Group-vs-group collision checks
//!
//! Pairs are visited A-major, B-minor. Once a callback asks for a discard,
//! both sprites of that pair sit out the rest of the call. Discards are not
//! vanishes: the sprites are back in play on the next check.

use super::Sprite;

/// What a collision callback wants done with the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reaction {
    #[default]
    Keep,
    Discard,
}

impl Reaction {
    /// Discard wins
    #[inline]
    pub fn or(self, other: Reaction) -> Reaction {
        if self == Reaction::Discard || other == Reaction::Discard {
            Reaction::Discard
        } else {
            Reaction::Keep
        }
    }
}

/// Something that owns a sprite and may react to collisions.
///
/// `shot` is called on the member of the first group, `hit` on the member of
/// the second. Both default to doing nothing.
pub trait Collider {
    fn sprite(&self) -> &Sprite;

    fn shot(&mut self, _other: &Sprite) -> Reaction {
        Reaction::Keep
    }

    fn hit(&mut self, _other: &Sprite) -> Reaction {
        Reaction::Keep
    }
}

impl Collider for Sprite {
    fn sprite(&self) -> &Sprite {
        self
    }
}

/// Check every member of `group_a` against every member of `group_b`,
/// calling `shot` / `hit` on overlap. Returns whether anything collided.
pub fn check<A: Collider, B: Collider>(group_a: &mut [A], group_b: &mut [B]) -> bool {
    check_with(group_a, group_b, |a, b| {
        let shot = a.shot(b.sprite());
        let hit = b.hit(a.sprite());
        shot.or(hit)
    })
}

/// `check` with a closure in place of the `shot` / `hit` methods
pub fn check_with<A, B, F>(group_a: &mut [A], group_b: &mut [B], mut on_collide: F) -> bool
where
    A: Collider,
    B: Collider,
    F: FnMut(&mut A, &mut B) -> Reaction,
{
    let mut discarded_a = vec![false; group_a.len()];
    let mut discarded_b = vec![false; group_b.len()];
    let mut collided = false;

    for (i, a) in group_a.iter_mut().enumerate() {
        for (j, b) in group_b.iter_mut().enumerate() {
            if discarded_a[i] {
                break;
            }
            if discarded_b[j] || std::ptr::eq(a.sprite(), b.sprite()) {
                continue;
            }
            if !a.sprite().collides(b.sprite()) {
                continue;
            }
            collided = true;
            if on_collide(a, b) == Reaction::Discard {
                discarded_a[i] = true;
                discarded_b[j] = true;
            }
        }
    }
    collided
}

/// Check a group against itself. Each unordered pair is visited in both
/// orders, skipping a sprite against itself.
pub fn check_within<T: Collider>(group: &mut [T]) -> bool {
    let mut discarded = vec![false; group.len()];
    let mut collided = false;

    for i in 0..group.len() {
        for j in 0..group.len() {
            if discarded[i] {
                break;
            }
            if i == j || discarded[j] {
                continue;
            }
            let (a, b) = pair_mut(group, i, j);
            if std::ptr::eq(a.sprite(), b.sprite()) || !a.sprite().collides(b.sprite()) {
                continue;
            }
            collided = true;
            let shot = a.shot(b.sprite());
            let hit = b.hit(a.sprite());
            if shot.or(hit) == Reaction::Discard {
                discarded[i] = true;
                discarded[j] = true;
            }
        }
    }
    collided
}

/// Two distinct elements of one slice, in the order asked for
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
