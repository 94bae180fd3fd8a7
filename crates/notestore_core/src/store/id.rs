//! Note identifier generation.
//!
//! Ids are 10 characters drawn uniformly from a 62-symbol alphanumeric
//! alphabet. Plain generation does not look at existing ids; with ~59.5 bits
//! of entropy a collision is unlikely but possible. `NoteStore::add_note_checked`
//! layers a bounded uniqueness check on top.

use rand::Rng;

/// Length of every generated id.
pub const NOTE_ID_LEN: usize = 10;

const NOTE_ID_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generates one id using the thread-local RNG.
pub fn generate_note_id() -> String {
    generate_note_id_with(&mut rand::thread_rng())
}

/// Generates one id from the provided RNG.
pub fn generate_note_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..NOTE_ID_LEN)
        .map(|_| char::from(NOTE_ID_ALPHABET[rng.gen_range(0..NOTE_ID_ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{generate_note_id, generate_note_id_with, NOTE_ID_ALPHABET, NOTE_ID_LEN};
    use rand::rngs::mock::StepRng;
    use std::collections::HashSet;

    #[test]
    fn alphabet_has_62_distinct_symbols() {
        let unique: HashSet<u8> = NOTE_ID_ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), 62);
        assert!(NOTE_ID_ALPHABET.iter().all(u8::is_ascii_alphanumeric));
    }

    #[test]
    fn generated_ids_are_fixed_length_alphanumeric() {
        for _ in 0..200 {
            let id = generate_note_id();
            assert_eq!(id.len(), NOTE_ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn constant_rng_yields_constant_id() {
        let mut rng = StepRng::new(0, 0);
        let first = generate_note_id_with(&mut rng);
        let second = generate_note_id_with(&mut rng);
        assert_eq!(first, "aaaaaaaaaa");
        assert_eq!(first, second);
    }
}
