//! Random test data.
//!
//! Every generator takes the RNG explicitly so callers choose the seed and
//! runs are reproducible.

use rand::Rng;

use crate::domain::PostDraft;
use crate::services::Registration;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

const IMAGES: &[&str] = &[
    "https://i.ibb.co/5Rmp215/monero-min.jpg",
    "https://i.ibb.co/DrhHLJ6/anotha-one-min.jpg",
    "https://i.ibb.co/nz7mRHv/MONE-min.jpg",
    "https://i.ibb.co/0Jy36bX/Monerooo-min.jpg",
];

pub fn random_int<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.gen_range(min..=max)
}

/// Lowercase ASCII string of length `n`.
pub fn random_string<R: Rng>(rng: &mut R, n: usize) -> String {
    (0..n)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

pub fn random_user_name<R: Rng>(rng: &mut R) -> String {
    random_string(rng, 10)
}

pub fn random_email<R: Rng>(rng: &mut R) -> String {
    format!("{}@email.com", random_string(rng, 6))
}

pub fn random_image<R: Rng>(rng: &mut R) -> String {
    IMAGES[rng.gen_range(0..IMAGES.len())].to_string()
}

pub fn random_draft<R: Rng>(rng: &mut R) -> PostDraft {
    PostDraft {
        image: random_image(rng),
        title: random_string(rng, 10),
        subtitle: random_string(rng, 8),
        content: random_string(rng, 30),
    }
}

pub fn random_registration<R: Rng>(rng: &mut R) -> Registration {
    Registration {
        user_name: random_user_name(rng),
        password: random_string(rng, 12),
        full_name: random_string(rng, 10),
        email: random_email(rng),
    }
}
