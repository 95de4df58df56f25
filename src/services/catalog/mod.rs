//! Music catalog abstraction
//!
//! A catalog resolves a recommended (song, artist) pair to playable metadata.
//! Both operations are best-effort: failures come back as `None` and are only
//! logged, so a broken catalog never fails a recommendation request.
use crate::models::{ApiTrack, CatalogToken, TrackMatch};

pub mod spotify;

pub use spotify::SpotifyProvider;

/// Maximum number of search candidates considered per lookup
pub const SEARCH_LIMIT: u32 = 5;

#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Obtains a short-lived bearer token
    ///
    /// Returns `None` without any network I/O when credentials are missing.
    async fn authenticate(&self) -> Option<CatalogToken>;

    /// Finds stream and cover URLs for a song
    ///
    /// Returns `None` immediately when `token` is `None`.
    async fn lookup(
        &self,
        song: &str,
        artist: &str,
        token: Option<&CatalogToken>,
    ) -> Option<TrackMatch>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Picks the search candidate for `artist`
///
/// The first candidate crediting `artist` (case-insensitive) wins, in the
/// order the service returned them. Without such a candidate the first
/// result is used.
pub fn select_candidate<'a>(candidates: &'a [ApiTrack], artist: &str) -> Option<&'a ApiTrack> {
    candidates
        .iter()
        .find(|track| track.has_artist(artist))
        .or_else(|| candidates.first())
}
