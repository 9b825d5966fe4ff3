//! Fallback-selector tables.
//!
//! Every logical field maps to an ordered list of candidate selectors: the
//! current markup first, then older or alternate variants so the parser
//! survives redesigns. Tables are serde-deserializable data, supplied to
//! [`crate::PageParser`] at construction; patching selector drift never
//! requires touching parsing code.

use serde::{Deserialize, Serialize};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Full selector configuration for both page variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorTable {
    /// Profile-page selectors.
    pub profile: ProfileSelectors,
    /// Search-result-page selectors.
    pub results: ResultSelectors,
}

/// Selector lists for the profile page and its nested sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ProfileSelectors {
    pub name: Vec<String>,
    pub headline: Vec<String>,
    pub location: Vec<String>,
    pub image: Vec<String>,
    pub canonical_link: Vec<String>,
    pub about: Vec<String>,
    pub connections: Vec<String>,
    pub followers: Vec<String>,
    pub premium_badge: Vec<String>,
    pub mutual_connections_link: Vec<String>,

    pub experience_section: Vec<String>,
    pub experience_item: Vec<String>,
    pub experience_title: Vec<String>,
    pub experience_company: Vec<String>,
    pub experience_duration: Vec<String>,
    pub experience_location: Vec<String>,
    pub experience_description: Vec<String>,

    pub education_section: Vec<String>,
    pub education_item: Vec<String>,
    pub education_school: Vec<String>,
    pub education_degree: Vec<String>,
    pub education_field: Vec<String>,
    pub education_duration: Vec<String>,
    pub education_description: Vec<String>,

    pub skills_section: Vec<String>,
    pub skills_item: Vec<String>,
    pub skill_name: Vec<String>,
    pub skill_endorsements: Vec<String>,
}

impl Default for ProfileSelectors {
    fn default() -> Self {
        Self {
            name: strings(&[
                "h1.text-heading-xlarge",
                ".pv-text-details__left-panel h1",
                ".pv-top-card--list li:first-child",
            ]),
            headline: strings(&[
                "div.text-body-medium.break-words",
                ".pv-text-details__left-panel .text-body-medium",
                ".pv-top-card--list .mt1",
            ]),
            location: strings(&[
                "span.text-body-small.inline.t-black--light.break-words",
                ".pv-text-details__left-panel--bottom .text-body-small",
                ".pv-top-card--list-bullet li:first-child",
            ]),
            image: strings(&[
                "img.pv-top-card-profile-picture__image--show",
                "img.pv-top-card-profile-picture__image",
                ".pv-top-card__photo img",
            ]),
            canonical_link: strings(&["link[rel='canonical']", "meta[property='og:url']"]),
            about: strings(&[
                "#about ~ div.display-flex span[aria-hidden='true']",
                ".pv-about__summary-text",
                "section.summary p",
            ]),
            connections: strings(&[
                "li.text-body-small span.t-bold",
                ".pv-top-card--list-bullet .t-bold",
                ".pv-top-card__connections span",
            ]),
            followers: strings(&[
                "p.pvs-header__optional-link span[aria-hidden='true']",
                ".pv-recent-activity-section__follower-count",
            ]),
            premium_badge: strings(&[
                "li-icon[type='linkedin-premium-gold-icon']",
                ".pv-member-badge--for-top-card",
                ".premium-icon",
            ]),
            mutual_connections_link: strings(&[
                "a[href*='facetConnectionOf']",
                ".pv-highlight-entity__card a",
            ]),

            experience_section: strings(&[
                "#experience ~ div.pvs-list__outer-container",
                "section#experience-section",
                ".experience-section",
            ]),
            experience_item: strings(&[
                "li.artdeco-list__item",
                "li.pv-entity__position-group-pager",
                ".pv-profile-section__list-item",
            ]),
            experience_title: strings(&[
                "div.mr1.t-bold span[aria-hidden='true']",
                ".pv-entity__summary-info h3",
                "h3.t-16",
            ]),
            experience_company: strings(&[
                "span.t-14.t-normal span[aria-hidden='true']",
                ".pv-entity__secondary-title",
            ]),
            experience_duration: strings(&[
                "span.t-14.t-normal.t-black--light span[aria-hidden='true']",
                ".pv-entity__date-range span:nth-child(2)",
            ]),
            experience_location: strings(&[
                "span.t-14.t-normal.t-black--light:nth-of-type(2) span[aria-hidden='true']",
                ".pv-entity__location span:nth-child(2)",
            ]),
            experience_description: strings(&[
                "div.inline-show-more-text span[aria-hidden='true']",
                ".pv-entity__description",
            ]),

            education_section: strings(&[
                "#education ~ div.pvs-list__outer-container",
                "section#education-section",
                ".education-section",
            ]),
            education_item: strings(&[
                "li.artdeco-list__item",
                "li.pv-education-entity",
                ".pv-profile-section__list-item",
            ]),
            education_school: strings(&[
                "div.mr1.hoverable-link-text.t-bold span[aria-hidden='true']",
                "div.mr1.t-bold span[aria-hidden='true']",
                ".pv-entity__school-name",
            ]),
            education_degree: strings(&[
                "span.t-14.t-normal span[aria-hidden='true']",
                ".pv-entity__degree-name .pv-entity__comma-item",
            ]),
            education_field: strings(&[".pv-entity__fos .pv-entity__comma-item"]),
            education_duration: strings(&[
                "span.t-14.t-normal.t-black--light span[aria-hidden='true']",
                ".pv-entity__dates span:nth-child(2)",
            ]),
            education_description: strings(&[
                "div.inline-show-more-text span[aria-hidden='true']",
                ".pv-entity__description",
            ]),

            skills_section: strings(&[
                "#skills ~ div.pvs-list__outer-container",
                "section.pv-skill-categories-section",
            ]),
            skills_item: strings(&[
                "li.artdeco-list__item",
                ".pv-skill-category-entity",
            ]),
            skill_name: strings(&[
                "div.mr1.hoverable-link-text.t-bold span[aria-hidden='true']",
                ".pv-skill-category-entity__name-text",
            ]),
            skill_endorsements: strings(&[
                "span.t-14.t-normal.t-black--light span[aria-hidden='true']",
                ".pv-skill-category-entity__endorsement-count",
            ]),
        }
    }
}

/// Selector lists for the paginated search-results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ResultSelectors {
    /// Results container; the session collector waits for this after
    /// navigating to a new page.
    pub results_container: Vec<String>,
    /// Result row. Ordered primary-then-fallback: later candidates are
    /// consulted only when earlier ones match zero elements.
    pub result_item: Vec<String>,
    pub name: Vec<String>,
    pub link: Vec<String>,
    pub headline: Vec<String>,
    pub location: Vec<String>,
    pub image: Vec<String>,
    pub degree_label: Vec<String>,
    pub premium_badge: Vec<String>,
    /// Enabled next-page control; presence means another page exists.
    pub next_button: Vec<String>,
}

impl Default for ResultSelectors {
    fn default() -> Self {
        Self {
            results_container: strings(&[
                "ul.reusable-search__entity-result-list",
                "div.search-results-container ul",
                ".search-results__list",
            ]),
            result_item: strings(&[
                "li.reusable-search__result-container",
                "div.entity-result",
                "li.search-result",
            ]),
            name: strings(&[
                "span.entity-result__title-text a span[aria-hidden='true']",
                ".entity-result__title-text a",
                ".actor-name",
            ]),
            link: strings(&[
                ".entity-result__title-text a",
                "a.app-aware-link",
                "a.search-result__result-link",
            ]),
            headline: strings(&[
                "div.entity-result__primary-subtitle",
                ".subline-level-1",
            ]),
            location: strings(&[
                "div.entity-result__secondary-subtitle",
                ".subline-level-2",
            ]),
            image: strings(&[
                "img.presence-entity__image",
                ".entity-result__image img",
                ".search-result__image img",
            ]),
            degree_label: strings(&[
                "span.entity-result__badge-text span[aria-hidden='true']",
                ".dist-value",
            ]),
            premium_badge: strings(&[
                "li-icon[type='linkedin-premium-gold-icon']",
                ".premium-icon",
            ]),
            next_button: strings(&[
                "button.artdeco-pagination__button--next:not([disabled])",
                "a.next",
            ]),
        }
    }
}
