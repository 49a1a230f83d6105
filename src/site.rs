//! Fixed vocabulary of the Contracts Finder listing site.
//!
//! The field set and the site's label/selector vocabulary are fixed inputs
//! to this crate, not something it infers. Everything the session and the
//! extractor know about the site's markup lives here.

/// Search results landing page. Filters are applied manually by the
/// operator before harvesting begins.
pub const START_URL: &str = "https://www.contractsfinder.service.gov.uk/Search/Results";

/// Result links inside the notices dashboard on a search results page.
pub const RESULT_LINKS: &str = "[id^='dashboard_notices'] a.govuk-link.search-result-rwh";

/// The "next page" control of the results pagination bar.
pub const NEXT_PAGE: &str = "li.standard-paginate-next-box a.standard-paginate-next";

/// Present once a detail page has rendered its content.
pub const DETAIL_READY: &str = "#all-content-wrapper";

/// Expands the supplier information block on awarded notices.
pub const SUPPLIER_TOGGLE: &str = "#show_supplier_0_information_link > span";

/// Contract title heading.
pub const TITLE: &str = "#all-content-wrapper > h1";

/// Buying organisation, from the breadcrumb description block.
pub const BUYER: &str = "#home-breadcrumb-description > h2";

/// Industry classification list items.
pub const INDUSTRY_ITEMS: &str = "#content-holder-left > div:nth-child(3) > ul > li > p";

/// Label elements of the page's label/value pairs. Each label is a
/// `strong` inside an `h4`; the value is the following sibling `p`.
pub const LABEL_STRONGS: &str = "#content-holder-left h4 strong";

/// Heading that introduces the free-text description paragraphs.
pub const DESCRIPTION_HEADING: &str = "Description";

/// First mailto anchor on the page carries the buyer contact email.
pub const BUYER_EMAIL: &str = "a[href^='mailto:']";

// The supplier name is visible without expanding the disclosure block,
// at one of two structural positions depending on page layout.
pub const SUPPLIER_NAME_PRIMARY: &str =
    "#content-holder-left > div:nth-child(5) > h4:nth-child(12) > strong";
pub const SUPPLIER_NAME_FALLBACK: &str =
    "#content-holder-left > div:nth-child(6) > h4:nth-child(12) > strong";

// Positional lookups inside the expanded supplier block.
pub const SUPPLIER_ADDRESS: &str = "#supplier_block_0 > dl > dd:nth-child(2) > p";
pub const SUPPLIER_REFERENCE: &str = "#supplier_block_0 > dl > dd:nth-child(4) > p";
pub const SUPPLIER_SME: &str = "#supplier_block_0 > dl > dd:nth-child(6) > p";
pub const SUPPLIER_VCSE: &str = "#supplier_block_0 > dl > dd:nth-child(8) > p";
