use rand::Rng;

use crate::utils::constants::{GLITCH_CHARS, GLITCH_PROBABILITY};

/// Replaces each character of `text` with a random glitch symbol with
/// probability `GLITCH_PROBABILITY`.
pub fn glitch_text<R: Rng + ?Sized>(rng: &mut R, text: &str) -> String {
    text.chars()
        .map(|c| {
            if rng.gen_bool(GLITCH_PROBABILITY) {
                GLITCH_CHARS[rng.gen_range(0..GLITCH_CHARS.len())] as char
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::BASE_TITLE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn glitch_keeps_length_and_only_swaps_in_glitch_chars() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let glitched = glitch_text(&mut rng, BASE_TITLE);
            assert_eq!(glitched.chars().count(), BASE_TITLE.chars().count());
            for (g, o) in glitched.chars().zip(BASE_TITLE.chars()) {
                assert!(g == o || GLITCH_CHARS.contains(&(g as u8)));
            }
        }
    }

    #[test]
    fn glitch_eventually_changes_something() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..50).any(|_| glitch_text(&mut rng, BASE_TITLE) != BASE_TITLE));
    }
}
