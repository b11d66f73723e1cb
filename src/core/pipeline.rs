use crate::core::aggregator::Aggregator;
use crate::domain::model::{BookQuery, CatalogMatch, SearchReport};
use crate::domain::ports::{AvailabilityCheck, CatalogSearch, Geocoding, LibraryDirectory};
use crate::utils::error::{Result, SkillError};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

/// The lookup pipeline for one voice turn: title → ISBN, postal code →
/// coordinates, coordinates → nearby branches, branches → loanable set.
pub struct SearchPipeline<C, G, L>
where
    C: CatalogSearch,
    G: Geocoding,
    L: LibraryDirectory + AvailabilityCheck,
{
    catalog: C,
    geocoder: G,
    library: L,
    poll_interval: Duration,
}

impl<C, G, L> SearchPipeline<C, G, L>
where
    C: CatalogSearch,
    G: Geocoding,
    L: LibraryDirectory + AvailabilityCheck,
{
    pub fn new(catalog: C, geocoder: G, library: L, poll_interval: Duration) -> Self {
        Self {
            catalog,
            geocoder,
            library,
            poll_interval,
        }
    }

    pub async fn run(&self, query: &BookQuery, postal_code: &str) -> Result<SearchReport> {
        let matched = self.resolve(&query.title).await?;
        tracing::info!("📚 Found in catalog: {}:{}", matched.display_title, matched.isbn);

        let coords = match self.geocoder.search_by_postal(postal_code).await {
            Ok(coords) => coords,
            Err(e) => {
                tracing::warn!("geocoding failed: {}", e);
                return Err(SkillError::GeoUnsupported);
            }
        };

        let branches = match self.library.nearby(&coords).await {
            Ok(branches) => branches,
            Err(e) => {
                tracing::warn!("library directory lookup failed: {}", e);
                return Err(SkillError::DirectoryUnsupported);
            }
        };
        tracing::info!("🏛️ {} branches near {}", branches.len(), coords.to_geocode_param());

        let mut aggregator = Aggregator::new(&self.library, self.poll_interval);
        let loanable = aggregator.collect(&matched.isbn, &branches).await;

        Ok(SearchReport {
            title: matched.display_title,
            loanable,
        })
    }

    /// The first result carrying an all-digit ISBN wins, in response
    /// order. A failed or empty catalog query is terminal; there is no
    /// retry and no ranking beyond response order.
    async fn resolve(&self, title: &str) -> Result<CatalogMatch> {
        let items = match self.catalog.search(title).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("catalog search failed: {}", e);
                return Err(SkillError::CatalogNotFound {
                    title: title.to_string(),
                });
            }
        };

        items
            .into_iter()
            .find_map(|item| {
                let isbn = item.isbn.filter(|isbn| numeric_isbn().is_match(isbn))?;
                Some(CatalogMatch {
                    isbn,
                    // a match without a display title falls back to the
                    // spoken title
                    display_title: item.title.unwrap_or_else(|| title.to_string()),
                })
            })
            .ok_or_else(|| SkillError::CatalogNotFound {
                title: title.to_string(),
            })
    }
}

fn numeric_isbn() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+$").unwrap())
}
