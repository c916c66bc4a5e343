//! Random next-track selection

use rand::Rng;

/// Pick a uniformly random index in `0..len`, never `current` when `len > 1`
///
/// # Panics
/// Panics if `len` is zero.
pub fn pick_random_index<R: Rng + ?Sized>(rng: &mut R, len: usize, current: Option<usize>) -> usize {
    match current {
        Some(current) if len > 1 && current < len => {
            // Draw from the other len - 1 slots and skip over `current`
            let pick = rng.gen_range(0..len - 1);
            if pick >= current {
                pick + 1
            } else {
                pick
            }
        }
        _ => rng.gen_range(0..len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_returns_current() {
        let mut rng = StdRng::seed_from_u64(42);
        for current in 0..5 {
            for _ in 0..200 {
                assert_ne!(pick_random_index(&mut rng, 5, Some(current)), current);
            }
        }
    }

    #[test]
    fn reaches_every_other_index() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[pick_random_index(&mut rng, 4, Some(2))] = true;
        }
        assert_eq!(seen, [true, true, false, true]);
    }

    #[test]
    fn single_entry() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_random_index(&mut rng, 1, Some(0)), 0);
        assert_eq!(pick_random_index(&mut rng, 1, None), 0);
    }

    #[test]
    fn no_current_covers_full_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 3];
        for _ in 0..300 {
            seen[pick_random_index(&mut rng, 3, None)] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }
}
