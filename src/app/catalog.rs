//! Song catalog view-model
//!
//! Pure derivation over the current result set: free-text filter,
//! incremental pagination, title splitting and the per-card image
//! fallback. Songs are never modified here.

use crate::api::Song;
use std::collections::HashSet;

/// Shown when a title carries no "artist - song" separator.
pub const UNKNOWN_ARTIST: &str = "Unknown artist";

/// Songs whose title contains `query`, case-insensitively, in original order.
/// Each entry keeps its position in the full result set.
pub fn filter<'a>(songs: &'a [Song], query: &str) -> Vec<(usize, &'a Song)> {
    let needle = query.to_lowercase();
    songs
        .iter()
        .enumerate()
        .filter(|(_, s)| needle.is_empty() || s.title.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    /// Filtered songs not yet revealed.
    pub remaining: usize,
}

/// The first `pages_shown * page_size` entries of `filtered`.
pub fn page<T: Clone>(filtered: &[T], page_size: usize, pages_shown: usize) -> Page<T> {
    let limit = pages_shown.saturating_mul(page_size);
    let end = limit.min(filtered.len());
    Page {
        items: filtered[..end].to_vec(),
        has_more: limit < filtered.len(),
        remaining: filtered.len() - end,
    }
}

/// Split a composite "artist - song" title on the first `-`.
/// Returns `(artist, song)`; never fails, only degrades.
pub fn split_title(title: &str) -> (String, String) {
    match title.split_once('-') {
        Some((artist, song)) => (artist.trim().to_string(), song.trim().to_string()),
        None => (UNKNOWN_ARTIST.to_string(), title.trim().to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardImage<'a> {
    Url(&'a str),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card<'a> {
    /// Position in the full result set.
    pub index: usize,
    pub artist: String,
    pub title: String,
    pub url: &'a str,
    pub image: CardImage<'a>,
}

/// Filter, pagination and selection state for one result set.
#[derive(Debug, Clone)]
pub struct Catalog {
    query: String,
    page_size: usize,
    pages_shown: usize,
    failed_images: HashSet<usize>,
    checked_images: HashSet<usize>,
    /// Cursor within the visible cards.
    selected: usize,
    /// Bumped on every reset so late image checks can be matched to their result set.
    generation: u64,
}

impl Catalog {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            page_size: page_size.max(1),
            pages_shown: 1,
            failed_images: HashSet::new(),
            checked_images: HashSet::new(),
            selected: 0,
            generation: 0,
        }
    }

    /// A new result set replaced the previous one.
    pub fn reset(&mut self) {
        self.query.clear();
        self.pages_shown = 1;
        self.failed_images.clear();
        self.checked_images.clear();
        self.selected = 0;
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    #[cfg(test)]
    pub fn pages_shown(&self) -> usize {
        self.pages_shown
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.pages_shown = 1;
            self.selected = 0;
        }
    }

    pub fn push_query_char(&mut self, c: char) {
        let mut q = self.query.clone();
        q.push(c);
        self.set_query(q);
    }

    pub fn pop_query_char(&mut self) {
        let mut q = self.query.clone();
        q.pop();
        self.set_query(q);
    }

    pub fn load_more(&mut self, songs: &[Song]) {
        if self.page(songs).has_more {
            self.pages_shown += 1;
        }
    }

    pub fn page<'a>(&self, songs: &'a [Song]) -> Page<(usize, &'a Song)> {
        page(&filter(songs, &self.query), self.page_size, self.pages_shown)
    }

    pub fn filtered_len(&self, songs: &[Song]) -> usize {
        filter(songs, &self.query).len()
    }

    pub fn cards<'a>(&self, songs: &'a [Song]) -> Vec<Card<'a>> {
        self.page(songs)
            .items
            .into_iter()
            .map(|(index, song)| {
                let (artist, title) = split_title(&song.title);
                let image = match song.image() {
                    Some(url) if !self.image_failed(index) => CardImage::Url(url),
                    _ => CardImage::Placeholder,
                };
                Card {
                    index,
                    artist,
                    title,
                    url: &song.url,
                    image,
                }
            })
            .collect()
    }

    /// Remember that the image at `index` failed; it is never retried for
    /// this result set.
    pub fn mark_image_failed(&mut self, index: usize) {
        self.failed_images.insert(index);
    }

    pub fn image_failed(&self, index: usize) -> bool {
        self.failed_images.contains(&index)
    }

    /// Visible cards whose image has not been checked yet. Marks them as
    /// checked.
    pub fn take_unchecked_images(&mut self, songs: &[Song]) -> Vec<(usize, String)> {
        let pending: Vec<(usize, String)> = self
            .page(songs)
            .items
            .into_iter()
            .filter(|(i, _)| !self.checked_images.contains(i) && !self.failed_images.contains(i))
            .filter_map(|(i, s)| s.image().map(|u| (i, u.to_string())))
            .collect();
        self.checked_images.extend(pending.iter().map(|(i, _)| *i));
        pending
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_song<'a>(&self, songs: &'a [Song]) -> Option<&'a Song> {
        self.page(songs).items.get(self.selected).map(|(_, s)| *s)
    }

    pub fn select_next(&mut self, songs: &[Song]) {
        let visible = self.page(songs).items.len();
        if visible > 0 {
            self.selected = (self.selected + 1).min(visible - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self, songs: &[Song]) {
        self.selected = self.page(songs).items.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str) -> Song {
        Song {
            title: title.to_string(),
            url: format!("https://genius.com/{}", title.replace(' ', "-")),
            image_url: Some(format!("https://img/{}.jpg", title.len())),
        }
    }

    fn songs(n: usize) -> Vec<Song> {
        (0..n).map(|i| song(&format!("Adele - Song {i}"))).collect()
    }

    #[test]
    fn test_filter_empty_query_keeps_everything_in_order() {
        let s = vec![song("Adele - Hello"), song("Adele - Skyfall"), song("Adele - Easy On Me")];
        let f: Vec<&str> = filter(&s, "").iter().map(|(_, s)| s.title.as_str()).collect();
        assert_eq!(f, ["Adele - Hello", "Adele - Skyfall", "Adele - Easy On Me"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_idempotent() {
        let s = vec![song("Adele - Hello"), song("Adele - Skyfall"), song("Lionel - HELLO")];
        let once: Vec<Song> = filter(&s, "hello").into_iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(once.len(), 2);
        assert_eq!(once[1].title, "Lionel - HELLO");

        let twice: Vec<Song> = filter(&once, "hello").into_iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_keeps_original_positions() {
        let s = vec![song("A - one"), song("B - two"), song("C - one more")];
        let idx: Vec<usize> = filter(&s, "one").iter().map(|(i, _)| *i).collect();
        assert_eq!(idx, [0, 2]);
    }

    #[test]
    fn test_page_is_monotonic() {
        let items: Vec<u32> = (0..30).collect();
        let mut prev: Vec<u32> = Vec::new();
        for pages in 1..=4 {
            let p = page(&items, 12, pages);
            assert!(p.items.starts_with(&prev));
            assert_eq!(p.has_more, p.items.len() < items.len());
            assert_eq!(p.remaining, items.len() - p.items.len());
            prev = p.items;
        }
        assert_eq!(prev.len(), 30);
    }

    #[test]
    fn test_page_exact_multiple_has_no_more() {
        let items: Vec<u32> = (0..24).collect();
        assert!(page(&items, 12, 1).has_more);
        assert!(!page(&items, 12, 2).has_more);
        assert!(!page(&[] as &[u32], 12, 1).has_more);
    }

    #[test]
    fn test_split_title() {
        assert_eq!(split_title("Adele - Hello"), ("Adele".into(), "Hello".into()));
        assert_eq!(
            split_title("Jay-Z - 99 Problems"),
            ("Jay".into(), "Z - 99 Problems".into())
        );
        assert_eq!(split_title("Hello"), (UNKNOWN_ARTIST.into(), "Hello".into()));
        assert_eq!(split_title(""), (UNKNOWN_ARTIST.into(), String::new()));
        assert_eq!(split_title("-"), (String::new(), String::new()));
    }

    #[test]
    fn test_query_change_resets_pagination() {
        let s = songs(30);
        let mut c = Catalog::new(12);
        c.load_more(&s);
        assert_eq!(c.pages_shown(), 2);
        assert_eq!(c.page(&s).items.len(), 24);

        c.set_query("song 1");
        assert_eq!(c.pages_shown(), 1);
        // "Song 1", "Song 10".."Song 19"
        assert_eq!(c.filtered_len(&s), 11);
        assert!(!c.page(&s).has_more);

        // Same query again is not a change.
        c.load_more(&s);
        c.set_query("song 1");
        assert_eq!(c.pages_shown(), 1);
    }

    #[test]
    fn test_load_more_stops_at_end() {
        let s = songs(13);
        let mut c = Catalog::new(12);
        c.load_more(&s);
        c.load_more(&s);
        assert_eq!(c.pages_shown(), 2);
        assert_eq!(c.page(&s).items.len(), 13);
    }

    #[test]
    fn test_failed_image_uses_placeholder_until_reset() {
        let mut s = songs(3);
        s[2].image_url = Some(String::new());
        let mut c = Catalog::new(12);

        let checks = c.take_unchecked_images(&s);
        assert_eq!(checks.len(), 2);
        assert!(c.take_unchecked_images(&s).is_empty());

        c.mark_image_failed(1);
        let cards = c.cards(&s);
        assert!(matches!(cards[0].image, CardImage::Url(_)));
        assert_eq!(cards[1].image, CardImage::Placeholder);
        assert_eq!(cards[2].image, CardImage::Placeholder);

        // Filtering does not move the failure to another song.
        c.set_query("song 1");
        let cards = c.cards(&s);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].index, 1);
        assert_eq!(cards[0].image, CardImage::Placeholder);

        let before = c.generation();
        c.reset();
        assert_ne!(c.generation(), before);
        assert!(!c.image_failed(1));
        assert_eq!(c.take_unchecked_images(&s).len(), 2);
    }

    #[test]
    fn test_selection_stays_within_visible_cards() {
        let s = songs(20);
        let mut c = Catalog::new(12);
        c.select_last(&s);
        assert_eq!(c.selected(), 11);
        c.select_next(&s);
        assert_eq!(c.selected(), 11);
        assert_eq!(c.selected_song(&s).unwrap().title, "Adele - Song 11");

        c.set_query("song 2");
        assert_eq!(c.selected(), 0);
        assert_eq!(c.selected_song(&s).unwrap().title, "Adele - Song 2");
        c.select_prev();
        assert_eq!(c.selected(), 0);
    }
}
