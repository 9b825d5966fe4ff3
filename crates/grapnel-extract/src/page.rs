//! Page-level parsing: whole profile pages and paginated result pages.

use crate::fields::{
    element_present, extract_attr, extract_text, first_element, leading_count, select_items,
};
use crate::record::{ConnectionRecord, ProfileRecord};
use crate::section;
use crate::selectors::SelectorTable;
use chrono::Utc;
use grapnel_core::ProfileSlug;
use scraper::{ElementRef, Html};
use url::Url;

/// Offset added to the shared-connections label count.
///
/// The source UI names two connections inline and the label counts only
/// the remainder ("5 other mutual connections" means 7 in total). This is
/// a heuristic inherited from the observed UI convention, preserved as-is;
/// its correctness against the live site cannot be verified here.
pub const INLINE_NAMED_CONNECTIONS: u64 = 2;

/// The parsed shared-connections link, when the profile page carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionsAffordance {
    /// Absolute URL of the shared-connections search.
    pub search_url: String,
    /// Opaque server-side identifier from the `facetConnectionOf` query
    /// parameter, percent-decoded and stripped of its wrapping quotes.
    pub encoded_id: Option<String>,
    /// Approximate total count: label count plus
    /// [`INLINE_NAMED_CONNECTIONS`].
    pub approx_count: Option<u64>,
    /// The label text, verbatim.
    pub raw_text: String,
}

/// Parses full pages using an externally supplied [`SelectorTable`].
///
/// Parsing is best-effort throughout: selector misses become `None` fields
/// or dropped entries, never errors.
pub struct PageParser {
    table: SelectorTable,
    base_url: Url,
}

impl PageParser {
    /// Create a parser over the given selector table. `base_url` resolves
    /// relative hrefs found in the markup.
    #[must_use]
    pub fn new(table: SelectorTable, base_url: Url) -> Self {
        Self { table, base_url }
    }

    /// Assemble one [`ProfileRecord`] from a profile page document.
    #[must_use]
    pub fn parse_profile(&self, html: &str) -> ProfileRecord {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let profile = &self.table.profile;

        let profile_url = extract_attr(&root, &profile.canonical_link, "href")
            .or_else(|| extract_attr(&root, &profile.canonical_link, "content"));
        let slug = profile_url.as_deref().and_then(ProfileSlug::derive);
        let affordance = self.affordance_from_root(&root);

        ProfileRecord {
            name: extract_text(&root, &profile.name),
            headline: extract_text(&root, &profile.headline),
            location: extract_text(&root, &profile.location),
            image_url: extract_attr(&root, &profile.image, "src"),
            about: extract_text(&root, &profile.about),
            connections_count: extract_text(&root, &profile.connections)
                .as_deref()
                .and_then(leading_count),
            followers_count: extract_text(&root, &profile.followers)
                .as_deref()
                .and_then(leading_count),
            mutual_connections_count: affordance.as_ref().and_then(|a| a.approx_count),
            mutual_connections_url: affordance.map(|a| a.search_url),
            premium: element_present(&root, &profile.premium_badge),
            slug,
            profile_url,
            experience: self.parse_entries(
                &root,
                &profile.experience_section,
                &profile.experience_item,
                |item| section::parse_experience(item, profile),
            ),
            education: self.parse_entries(
                &root,
                &profile.education_section,
                &profile.education_item,
                |item| section::parse_education(item, profile),
            ),
            skills: self.parse_entries(
                &root,
                &profile.skills_section,
                &profile.skills_item,
                |item| section::parse_skill(item, profile),
            ),
            extracted_at: Utc::now(),
        }
    }

    /// Locate and parse the shared-connections link, when present.
    #[must_use]
    pub fn detect_connections_affordance(&self, html: &str) -> Option<ConnectionsAffordance> {
        let document = Html::parse_document(html);
        self.affordance_from_root(&document.root_element())
    }

    /// Whether an enabled next-page control is present.
    #[must_use]
    pub fn has_next_page(&self, html: &str) -> bool {
        let document = Html::parse_document(html);
        element_present(&document.root_element(), &self.table.results.next_button)
    }

    /// Whether the results container has rendered. Used as the bounded-wait
    /// predicate after next-page navigation.
    #[must_use]
    pub fn results_container_present(&self, html: &str) -> bool {
        let document = Html::parse_document(html);
        element_present(
            &document.root_element(),
            &self.table.results.results_container,
        )
    }

    /// Selector list for the enabled next-page control, for callers that
    /// need to click it.
    #[must_use]
    pub fn next_button_selectors(&self) -> &[String] {
        &self.table.results.next_button
    }

    /// Parse a search-results page into connection records.
    ///
    /// Rows failing required-field validation (no name or profile URL) are
    /// dropped. Item lookup is primary-then-fallback: a secondary row
    /// selector is consulted only when the primary matches zero elements.
    #[must_use]
    pub fn parse_result_page(&self, html: &str) -> Vec<ConnectionRecord> {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let results = &self.table.results;

        let records: Vec<ConnectionRecord> = select_items(&root, &results.result_item)
            .iter()
            .filter_map(|item| section::parse_connection_row(item, results, &self.base_url))
            .collect();

        tracing::debug!(rows = records.len(), "parsed result page");
        records
    }

    fn affordance_from_root(&self, root: &ElementRef<'_>) -> Option<ConnectionsAffordance> {
        let link = first_element(root, &self.table.profile.mutual_connections_link)?;
        let href = link.value().attr("href")?;
        let resolved = self.base_url.join(href).ok()?;
        let raw_text = link.text().collect::<String>().trim().to_string();

        let encoded_id = resolved
            .query_pairs()
            .find(|(key, _)| key == "facetConnectionOf")
            .map(|(_, value)| value.trim_matches('"').to_string());
        let approx_count = leading_count(&raw_text).map(|n| n + INLINE_NAMED_CONNECTIONS);

        Some(ConnectionsAffordance {
            search_url: resolved.to_string(),
            encoded_id,
            approx_count,
            raw_text,
        })
    }

    fn parse_entries<T>(
        &self,
        root: &ElementRef<'_>,
        section_candidates: &[String],
        item_candidates: &[String],
        parse: impl Fn(&ElementRef<'_>) -> Option<T>,
    ) -> Vec<T> {
        let Some(container) = first_element(root, section_candidates) else {
            return Vec::new();
        };
        select_items(&container, item_candidates)
            .iter()
            .filter_map(parse)
            .collect()
    }
}
