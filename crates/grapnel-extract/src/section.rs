//! Section parsers: one structured record from one DOM container.
//!
//! Each parser composes the field extractors over a container element and
//! applies the required-field validation from the data model: an entry
//! missing its single required field is discarded (`None`), all other
//! misses become `None` fields on the record.

use crate::fields::{element_present, extract_attr, extract_text, first_element};
use crate::record::{ConnectionRecord, EducationEntry, ExperienceEntry, SkillEntry};
use crate::selectors::{ProfileSelectors, ResultSelectors};
use chrono::Utc;
use scraper::ElementRef;
use url::Url;

/// Parse one experience entry. Discarded when no title is found.
#[must_use]
pub fn parse_experience(
    item: &ElementRef<'_>,
    selectors: &ProfileSelectors,
) -> Option<ExperienceEntry> {
    let title = extract_text(item, &selectors.experience_title)?;
    Some(ExperienceEntry {
        title,
        company: extract_text(item, &selectors.experience_company),
        duration: extract_text(item, &selectors.experience_duration),
        location: extract_text(item, &selectors.experience_location),
        description: extract_text(item, &selectors.experience_description),
    })
}

/// Parse one education entry. Discarded when no school is found.
#[must_use]
pub fn parse_education(
    item: &ElementRef<'_>,
    selectors: &ProfileSelectors,
) -> Option<EducationEntry> {
    let school = extract_text(item, &selectors.education_school)?;
    Some(EducationEntry {
        school,
        degree: extract_text(item, &selectors.education_degree),
        field_of_study: extract_text(item, &selectors.education_field),
        duration: extract_text(item, &selectors.education_duration),
        description: extract_text(item, &selectors.education_description),
    })
}

/// Parse one skill entry. Discarded when no name is found. The endorsement
/// label is kept verbatim ("99+" and friends).
#[must_use]
pub fn parse_skill(item: &ElementRef<'_>, selectors: &ProfileSelectors) -> Option<SkillEntry> {
    let name = extract_text(item, &selectors.skill_name)?;
    Some(SkillEntry {
        name,
        endorsements: extract_text(item, &selectors.skill_endorsements),
    })
}

/// Parse one search-result row into a [`ConnectionRecord`].
///
/// Name and profile URL are essential for downstream identity matching;
/// rows missing either are discarded. The profile URL is resolved against
/// `base_url` and stripped of query/fragment to its canonical form.
#[must_use]
pub fn parse_connection_row(
    item: &ElementRef<'_>,
    selectors: &ResultSelectors,
    base_url: &Url,
) -> Option<ConnectionRecord> {
    let name = extract_text(item, &selectors.name)?;
    let href = first_element(item, &selectors.link)
        .and_then(|el| el.value().attr("href").map(str::trim))
        .filter(|href| !href.is_empty())?;
    let profile_url = canonical_profile_url(base_url, href)?;

    Some(ConnectionRecord {
        name,
        profile_url,
        headline: extract_text(item, &selectors.headline),
        location: extract_text(item, &selectors.location),
        image_url: extract_attr(item, &selectors.image, "src"),
        degree_label: extract_text(item, &selectors.degree_label),
        premium: element_present(item, &selectors.premium_badge),
        extracted_at: Utc::now(),
    })
}

fn canonical_profile_url(base_url: &Url, href: &str) -> Option<String> {
    let mut resolved = base_url.join(href).ok()?;
    resolved.set_query(None);
    resolved.set_fragment(None);
    Some(resolved.to_string())
}
