//! Track feature vectors.
//!
//! A [`FeatureVector`] is the concatenation of three one-hot blocks, in this
//! fixed order:
//!
//! ```text
//! [ genre (GENRE_COUNT) | mood (MOOD_COUNT) | artist bucket (ARTIST_BUCKETS) ]
//! ```
//!
//! Genre and mood labels are matched exactly and case-insensitively against
//! the closed [`Genre`] and [`Mood`] catalogs; a label outside the catalog
//! leaves its whole block at zero. The artist block is a lossy identity
//! signal: the lowercased artist name is hashed with FNV-1a and reduced
//! modulo [`ARTIST_BUCKETS`]. The hash is fixed, so vectors are identical
//! across runs and machines.

use crate::track::Track;
use serde::Serialize;

/// Number of artist identity buckets.
pub const ARTIST_BUCKETS: usize = 50;
/// Number of slots in the genre block.
pub const GENRE_COUNT: usize = Genre::ALL.len();
/// Number of slots in the mood block.
pub const MOOD_COUNT: usize = Mood::ALL.len();
/// Length of every feature vector.
pub const FEATURE_DIM: usize = GENRE_COUNT + MOOD_COUNT + ARTIST_BUCKETS;

/// Closed genre catalog. Variant order is the vector layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Pop,
    Rock,
    Electronic,
    Indie,
    Trance,
    Rap,
    HipHop,
    Metal,
    Jazz,
    Ambient,
    Classical,
    Folk,
    Reggae,
    Funk,
    Blues,
    Dance,
    Country,
    Alternative,
    Punk,
    Soul,
    RnB,
    Unknown,
}

impl Genre {
    pub const ALL: [Genre; 22] = [
        Genre::Pop,
        Genre::Rock,
        Genre::Electronic,
        Genre::Indie,
        Genre::Trance,
        Genre::Rap,
        Genre::HipHop,
        Genre::Metal,
        Genre::Jazz,
        Genre::Ambient,
        Genre::Classical,
        Genre::Folk,
        Genre::Reggae,
        Genre::Funk,
        Genre::Blues,
        Genre::Dance,
        Genre::Country,
        Genre::Alternative,
        Genre::Punk,
        Genre::Soul,
        Genre::RnB,
        Genre::Unknown,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Genre::Pop => "pop",
            Genre::Rock => "rock",
            Genre::Electronic => "electronic",
            Genre::Indie => "indie",
            Genre::Trance => "trance",
            Genre::Rap => "rap",
            Genre::HipHop => "hip-hop",
            Genre::Metal => "metal",
            Genre::Jazz => "jazz",
            Genre::Ambient => "ambient",
            Genre::Classical => "classical",
            Genre::Folk => "folk",
            Genre::Reggae => "reggae",
            Genre::Funk => "funk",
            Genre::Blues => "blues",
            Genre::Dance => "dance",
            Genre::Country => "country",
            Genre::Alternative => "alternative",
            Genre::Punk => "punk",
            Genre::Soul => "soul",
            Genre::RnB => "r&b",
            Genre::Unknown => "Unknown",
        }
    }

    /// Exact, case-insensitive lookup.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.label().eq_ignore_ascii_case(label.trim()))
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Closed mood catalog. Variant order is the vector layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Calm,
    Energetic,
    Neutral,
    Surprise,
    Romantic,
    Melancholy,
    Excited,
    Peaceful,
}

impl Mood {
    pub const ALL: [Mood; 11] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Calm,
        Mood::Energetic,
        Mood::Neutral,
        Mood::Surprise,
        Mood::Romantic,
        Mood::Melancholy,
        Mood::Excited,
        Mood::Peaceful,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Calm => "calm",
            Mood::Energetic => "energetic",
            Mood::Neutral => "neutral",
            Mood::Surprise => "surprise",
            Mood::Romantic => "romantic",
            Mood::Melancholy => "melancholy",
            Mood::Excited => "excited",
            Mood::Peaceful => "peaceful",
        }
    }

    /// Exact, case-insensitive lookup.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mood| mood.label().eq_ignore_ascii_case(label.trim()))
    }

    const fn slot(self) -> usize {
        GENRE_COUNT + self as usize
    }
}

/// Fixed-length numeric embedding of a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// The all-zero vector of canonical length.
    #[must_use]
    pub fn zeros() -> Self {
        Self(vec![0.0; FEATURE_DIM])
    }

    /// Wraps raw components. Returns `None` unless `values` has canonical length.
    #[must_use]
    pub fn from_vec(values: Vec<f32>) -> Option<Self> {
        (values.len() == FEATURE_DIM).then_some(Self(values))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0.0)
    }

    fn set(&mut self, slot: usize) {
        if let Some(value) = self.0.get_mut(slot) {
            *value = 1.0;
        }
    }
}

/// Embeds a track's genre, mood and artist.
///
/// Blank fields are read as "Unknown" (genre), "neutral" (mood) and
/// "Unknown" (artist). Infallible: the result always has length
/// [`FEATURE_DIM`].
#[must_use]
pub fn vectorize(track: &Track) -> FeatureVector {
    let mut vector = FeatureVector::zeros();

    if let Some(genre) = Genre::from_label(track.genre_label()) {
        vector.set(genre.slot());
    }
    if let Some(mood) = Mood::from_label(track.mood_label()) {
        vector.set(mood.slot());
    }
    vector.set(GENRE_COUNT + MOOD_COUNT + artist_bucket(track.artist_label()));

    log::trace!(
        "Vectorized `{}' ({} / {} / {})",
        track.title,
        track.genre_label(),
        track.mood_label(),
        track.artist_label()
    );
    vector
}

/// Bucket index of an artist name, in `0..ARTIST_BUCKETS`.
#[must_use]
pub fn artist_bucket(artist: &str) -> usize {
    let hash = fnv1a_64(artist.to_lowercase().as_bytes());
    // The modulus fits in usize on every target.
    (hash % ARTIST_BUCKETS as u64) as usize
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}
