// file: src/api/pager.rs
// description: page-by-page accumulation of beatmap listings

use crate::error::Result;
use crate::models::{Beatmap, BeatmapSummary};
use async_trait::async_trait;
use std::fmt;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    All,
    Popular,
    Recent,
}

impl ListingKind {
    /// Path segment below `/beatmaps`; empty for the full listing.
    pub fn path_segment(self) -> &'static str {
        match self {
            ListingKind::All => "",
            ListingKind::Popular => "popular",
            ListingKind::Recent => "recent",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListingKind::All => "All",
            ListingKind::Popular => "Popular",
            ListingKind::Recent => "Recent",
        };
        f.write_str(name)
    }
}

/// Read-only access to stored beatmaps.
#[async_trait]
pub trait BeatmapCatalog: Send + Sync {
    async fn beatmap(&self, beatmapset_id: u64, beatmap_id: u64) -> Result<Option<Beatmap>>;

    async fn beatmapset(&self, beatmapset_id: u64) -> Result<Vec<BeatmapSummary>>;

    async fn list(&self, kind: ListingKind, page: u32, limit: u32)
    -> Result<Vec<BeatmapSummary>>;
}

/// Accumulates listing pages until the backend returns an empty one.
#[derive(Debug, Clone)]
pub struct BeatmapPager {
    kind: ListingKind,
    limit: u32,
    next_page: u32,
    has_more: bool,
    beatmaps: Vec<BeatmapSummary>,
}

impl BeatmapPager {
    pub fn new(kind: ListingKind, limit: u32) -> Self {
        Self::starting_at(kind, 1, limit)
    }

    pub fn starting_at(kind: ListingKind, page: u32, limit: u32) -> Self {
        Self {
            kind,
            limit: limit.max(1),
            next_page: page.max(1),
            has_more: true,
            beatmaps: Vec::new(),
        }
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn beatmaps(&self) -> &[BeatmapSummary] {
        &self.beatmaps
    }

    /// Fetch the next page and append it. On failure nothing changes.
    pub async fn fetch_next<C>(&mut self, catalog: &C) -> Result<&[BeatmapSummary]>
    where
        C: BeatmapCatalog + ?Sized,
    {
        let page = self.next_page;
        let fetched = match catalog.list(self.kind, page, self.limit).await {
            Ok(fetched) => fetched,
            Err(e) => {
                error!("Failed to fetch {} page {}: {}", self.kind, page, e);
                return Err(e);
            }
        };

        debug!("{} page {}: {} beatmaps", self.kind, page, fetched.len());

        let start = self.beatmaps.len();
        self.has_more = !fetched.is_empty();
        match page.checked_add(1) {
            Some(next) => self.next_page = next,
            None => self.has_more = false,
        }
        self.beatmaps.extend(fetched);

        Ok(&self.beatmaps[start..])
    }
}
