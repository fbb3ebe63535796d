//! Catalog data shown by the browsing components.
//!
//! Titles, genres and the row categories of the movie and TV pages, plus the
//! small helpers the pages need: merging the movie and TV genre lists,
//! resolving genre ids to names, building image URLs and choosing the
//! featured title.

use crate::slider::Item;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// Base URL of the image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Whether a title is a movie or a TV show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// A feature film.
    Movie,
    /// A TV series.
    Tv,
}

/// A movie or TV show as listed in a catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    /// Catalog id, unique within its kind.
    pub id: u64,
    /// Movie or TV show.
    pub kind: MediaKind,
    /// Display name (a movie's title or a show's name).
    pub name: String,
    /// Plot summary.
    pub overview: String,
    /// Ids of the genres the title belongs to.
    pub genre_ids: Vec<u64>,
    /// Path of the backdrop image on the CDN, if any.
    pub backdrop_path: Option<String>,
}

impl Title {
    /// Creates a title with no overview, genres or artwork.
    pub fn new(id: u64, kind: MediaKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            overview: String::new(),
            genre_ids: Vec::new(),
            backdrop_path: None,
        }
    }

    /// Sets the overview (builder pattern).
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    /// Sets the genre ids (builder pattern).
    pub fn with_genres(mut self, genre_ids: Vec<u64>) -> Self {
        self.genre_ids = genre_ids;
        self
    }

    /// Sets the backdrop path (builder pattern).
    pub fn with_backdrop(mut self, path: impl Into<String>) -> Self {
        self.backdrop_path = Some(path.into());
        self
    }

    /// URL of the backdrop at the given size, empty if the title has none.
    pub fn backdrop_url(&self, size: Option<&str>) -> String {
        image_url(self.backdrop_path.as_deref(), size)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Item for Title {
    fn key(&self) -> u64 {
        self.id
    }
}

/// A genre as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    /// Genre id.
    pub id: u64,
    /// Display name.
    pub name: String,
}

impl Genre {
    /// Creates a genre.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Merges the movie and TV genre lists into one list without duplicate ids.
///
/// The first occurrence of an id wins, so a movie genre shadows a TV genre
/// with the same id. Order of first appearance is preserved.
///
/// ```rust
/// use bubbletea_carousel::catalog::{merge_genres, Genre};
///
/// let movie = vec![Genre::new(28, "Action"), Genre::new(18, "Drama")];
/// let tv = vec![Genre::new(18, "Drama (TV)"), Genre::new(10759, "Action & Adventure")];
///
/// let merged = merge_genres(movie, tv);
/// let names: Vec<&str> = merged.iter().map(|g| g.name.as_str()).collect();
/// assert_eq!(names, ["Action", "Drama", "Action & Adventure"]);
/// ```
pub fn merge_genres(movie: Vec<Genre>, tv: Vec<Genre>) -> Vec<Genre> {
    let mut seen = HashSet::with_capacity(movie.len() + tv.len());
    let mut merged = Vec::with_capacity(movie.len() + tv.len());
    for genre in movie.into_iter().chain(tv) {
        if seen.insert(genre.id) {
            merged.push(genre);
        }
    }
    merged
}

/// Lookup table from genre id to name.
#[derive(Debug, Clone, Default)]
pub struct GenreIndex {
    names: HashMap<u64, String>,
}

impl GenreIndex {
    /// Builds an index; later duplicates of an id are ignored.
    pub fn new(genres: Vec<Genre>) -> Self {
        let mut names = HashMap::with_capacity(genres.len());
        for genre in genres {
            names.entry(genre.id).or_insert(genre.name);
        }
        Self { names }
    }

    /// Number of known genres.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no genres are known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the genre with `id`.
    pub fn name(&self, id: u64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Names of `ids` in order, skipping ids that are not in the index.
    pub fn names(&self, ids: &[u64]) -> Vec<&str> {
        ids.iter().filter_map(|id| self.name(*id)).collect()
    }

    /// Names of `ids` joined with `" | "`.
    ///
    /// ```rust
    /// use bubbletea_carousel::catalog::{Genre, GenreIndex};
    ///
    /// let index = GenreIndex::new(vec![Genre::new(1, "Comedy"), Genre::new(2, "Crime")]);
    /// assert_eq!(index.label(&[2, 99, 1]), "Crime | Comedy");
    /// ```
    pub fn label(&self, ids: &[u64]) -> String {
        self.names(ids).join(" | ")
    }
}

/// Builds the CDN URL of an image.
///
/// `size` is a CDN size bucket such as `"w500"` and defaults to `"original"`.
/// A missing or empty path gives an empty string.
///
/// ```rust
/// use bubbletea_carousel::catalog::image_url;
///
/// assert_eq!(
///     image_url(Some("/kqjL17yufvn9OVLyXYpvtyrFfak.jpg"), Some("w500")),
///     "https://image.tmdb.org/t/p/w500/kqjL17yufvn9OVLyXYpvtyrFfak.jpg"
/// );
/// assert_eq!(image_url(Some("/a.jpg"), None), "https://image.tmdb.org/t/p/original/a.jpg");
/// assert_eq!(image_url(None, None), "");
/// ```
pub fn image_url(path: Option<&str>, size: Option<&str>) -> String {
    match path.map(|p| p.trim_start_matches('/')) {
        Some(p) if !p.is_empty() => {
            format!("{}/{}/{}", IMAGE_BASE_URL, size.unwrap_or("original"), p)
        }
        _ => String::new(),
    }
}

/// Rotates `items` so `items[index]` comes first and returns that title.
///
/// Returns `None` and leaves `items` untouched when `index` is out of range.
///
/// ```rust
/// use bubbletea_carousel::catalog::{feature, MediaKind, Title};
///
/// let mut row: Vec<Title> = (1..=4).map(|i| Title::new(i, MediaKind::Movie, format!("M{}", i))).collect();
/// let featured = feature(&mut row, 2).unwrap();
/// assert_eq!(featured.id, 3);
/// let ids: Vec<u64> = row.iter().map(|t| t.id).collect();
/// assert_eq!(ids, [3, 4, 1, 2]);
/// ```
pub fn feature(items: &mut [Title], index: usize) -> Option<Title> {
    if index >= items.len() {
        return None;
    }
    items.rotate_left(index);
    items.first().cloned()
}

/// Like [`feature`] with the index drawn from `rng`.
pub fn feature_random<R: Rng + ?Sized>(items: &mut [Title], rng: &mut R) -> Option<Title> {
    if items.is_empty() {
        return None;
    }
    let index = rng.random_range(0..items.len());
    debug!(index, "featured title picked");
    feature(items, index)
}

/// Finds the title with `id` in any of `rows`.
pub fn find_title<'a, R>(rows: R, id: u64) -> Option<&'a Title>
where
    R: IntoIterator<Item = &'a [Title]>,
{
    rows.into_iter().flatten().find(|t| t.id == id)
}

/// Rows of the movie page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieCategory {
    /// In theaters now.
    NowPlaying,
    /// Most popular right now.
    Popular,
    /// Releasing soon.
    Upcoming,
    /// Best rated of all time.
    TopRated,
}

impl MovieCategory {
    /// All categories in page order.
    pub const ALL: [MovieCategory; 4] = [
        MovieCategory::NowPlaying,
        MovieCategory::Popular,
        MovieCategory::Upcoming,
        MovieCategory::TopRated,
    ];
}

/// Rows of the TV page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TvCategory {
    /// Most popular right now.
    Popular,
    /// Trending today.
    Trending,
    /// Episodes airing today.
    AiringToday,
    /// Best rated of all time.
    TopRated,
}

impl TvCategory {
    /// All categories in page order.
    pub const ALL: [TvCategory; 4] = [
        TvCategory::Popular,
        TvCategory::Trending,
        TvCategory::AiringToday,
        TvCategory::TopRated,
    ];
}

/// A row on either page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A movie row.
    Movie(MovieCategory),
    /// A TV row.
    Tv(TvCategory),
}

impl Category {
    /// Heading shown above the row.
    pub fn heading(self) -> &'static str {
        match self {
            Category::Movie(MovieCategory::NowPlaying) => "Now Playing in Theaters",
            Category::Movie(MovieCategory::Popular) => "Popular Movies Right Now",
            Category::Movie(MovieCategory::Upcoming) => "Coming Soon",
            Category::Movie(MovieCategory::TopRated) => "Top Rated Movies of All Time",
            Category::Tv(TvCategory::Popular) => "Popular TV Right Now",
            Category::Tv(TvCategory::Trending) => "Trending TV Today",
            Category::Tv(TvCategory::AiringToday) => "Airing Today",
            Category::Tv(TvCategory::TopRated) => "Top Rated TV of All Time",
        }
    }

    /// Whether the row shows ranking numbers on its cards.
    pub fn ranked(self) -> bool {
        matches!(
            self,
            Category::Movie(MovieCategory::Popular) | Category::Tv(TvCategory::Popular)
        )
    }

    /// The kind of titles in this row.
    pub fn kind(self) -> MediaKind {
        match self {
            Category::Movie(_) => MediaKind::Movie,
            Category::Tv(_) => MediaKind::Tv,
        }
    }
}

impl From<MovieCategory> for Category {
    fn from(c: MovieCategory) -> Self {
        Category::Movie(c)
    }
}

impl From<TvCategory> for Category {
    fn from(c: TvCategory) -> Self {
        Category::Tv(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn row(n: u64) -> Vec<Title> {
        (1..=n)
            .map(|i| Title::new(i, MediaKind::Movie, format!("Movie {}", i)))
            .collect()
    }

    #[test]
    fn test_merge_genres_keeps_first_occurrence() {
        let movie = vec![Genre::new(1, "A"), Genre::new(2, "B"), Genre::new(1, "A again")];
        let tv = vec![Genre::new(3, "C"), Genre::new(2, "B tv")];
        let merged = merge_genres(movie, tv);
        assert_eq!(
            merged,
            vec![Genre::new(1, "A"), Genre::new(2, "B"), Genre::new(3, "C")]
        );
    }

    #[test]
    fn test_merge_genres_empty_inputs() {
        assert!(merge_genres(vec![], vec![]).is_empty());
        assert_eq!(merge_genres(vec![], vec![Genre::new(5, "E")]).len(), 1);
    }

    #[test]
    fn test_genre_index_skips_unknown_ids() {
        let index = GenreIndex::new(vec![Genre::new(1, "Horror"), Genre::new(1, "Other")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.name(1), Some("Horror"));
        assert_eq!(index.names(&[7, 1]), vec!["Horror"]);
        assert_eq!(index.label(&[]), "");
    }

    #[test]
    fn test_backdrop_url() {
        let t = Title::new(1, MediaKind::Tv, "Show").with_backdrop("/b.png");
        assert_eq!(t.backdrop_url(Some("w500")), "https://image.tmdb.org/t/p/w500/b.png");
        assert_eq!(Title::new(2, MediaKind::Tv, "x").backdrop_url(None), "");
        assert_eq!(image_url(Some(""), None), "");
    }

    #[test]
    fn test_feature_out_of_range_is_none() {
        let mut r = row(3);
        assert!(feature(&mut r, 3).is_none());
        assert_eq!(r[0].id, 1);
        assert!(feature(&mut [], 0).is_none());
    }

    #[test]
    fn test_feature_random_rotates_to_pick() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut r = row(20);
        let picked = feature_random(&mut r, &mut rng).unwrap();
        assert_eq!(r[0], picked);
        assert_eq!(r.len(), 20);

        let mut ids: Vec<u64> = r.iter().map(|t| t.id).collect();
        let start = ids[0];
        assert_eq!(ids[1], start % 20 + 1);
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_feature_random_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(feature_random(&mut [], &mut rng).is_none());
    }

    #[test]
    fn test_find_title_across_rows() {
        let a = row(3);
        let b = vec![Title::new(42, MediaKind::Movie, "Answer")];
        let rows = [a.as_slice(), b.as_slice()];
        assert_eq!(find_title(rows, 42).map(|t| t.name.as_str()), Some("Answer"));
        assert!(find_title(rows, 99).is_none());
    }

    #[test]
    fn test_category_flags() {
        assert!(Category::from(MovieCategory::Popular).ranked());
        assert!(Category::from(TvCategory::Popular).ranked());
        assert!(!Category::from(TvCategory::Trending).ranked());
        assert_eq!(Category::from(TvCategory::AiringToday).kind(), MediaKind::Tv);
        assert_eq!(MovieCategory::ALL.len(), 4);
    }
}
