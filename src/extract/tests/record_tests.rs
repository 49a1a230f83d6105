use crate::extract::DetailPage;

/// A full detail page in the site's structure. `supplier_position`
/// selects which of the two structural positions carries the supplier
/// name heading; `with_supplier_block` controls whether the expanded
/// disclosure block is present.
fn detail_page(supplier_position: Option<usize>, with_supplier_block: bool) -> String {
    let filler = "<p>s</p>".repeat(11);
    let supplier_heading = "<h4><strong>Acme Catering Ltd</strong></h4>";
    let supplier_block = "<div id=\"supplier_block_0\"><dl>\
        <dt>Address</dt><dd><p>1 Supplier Way</p></dd>\
        <dt>Reference</dt><dd><p>SUP-001</p></dd>\
        <dt>SME</dt><dd><p>Yes</p></dd>\
        <dt>VCSE</dt><dd><p>No</p></dd>\
        </dl></div>";

    let position_five = match supplier_position {
        Some(5) => format!(
            "{}{}{}",
            filler,
            supplier_heading,
            if with_supplier_block { supplier_block } else { "" }
        ),
        _ => String::new(),
    };
    let position_six = match supplier_position {
        Some(6) => format!(
            "{}{}{}",
            filler,
            supplier_heading,
            if with_supplier_block { supplier_block } else { "" }
        ),
        _ => String::new(),
    };

    format!(
        "<html><body>\
        <div id=\"all-content-wrapper\">\
        <h1>School Catering Services</h1>\
        <div id=\"home-breadcrumb-description\"><h2>Example Borough Council</h2></div>\
        <div id=\"content-holder-left\">\
          <div>intro</div>\
          <div>summary</div>\
          <div><ul>\
            <li><p>Catering services</p></li>\
            <li><p>School meals</p></li>\
          </ul></div>\
          <div>\
            <h4><strong>Location of contract</strong></h4><p>North West</p>\
            <h4><strong>Total value of contract</strong></h4><p>£12,345 to £20,000</p>\
            <h4><strong>Procurement reference</strong></h4><p>EX-2024-001</p>\
            <h4><strong>Published date</strong></h4><p>1 March 2024</p>\
            <h4><strong>Closing date</strong></h4><p>29 March 2024</p>\
            <h4><strong>Closing time</strong></h4><p>12:00pm</p>\
            <h4><strong>Contract start date</strong></h4><p>1 September 2024</p>\
            <h4><strong>Contract end date</strong></h4><p>31 August 2026</p>\
            <h4><strong>Contract type</strong></h4><p>Service contract</p>\
            <h4><strong>Procedure type</strong></h4><p>Open procedure</p>\
            <h4><strong>Contract is suitable for SMEs?</strong></h4><p>Yes</p>\
            <h4><strong>Contract is suitable for VCSEs?</strong></h4><p>No</p>\
            <div>\
              <h3>Description</h3>\
              <p>Provision of catering services.</p>\
              <p>  </p>\
              <p>Two year initial term.</p>\
            </div>\
            <h4><strong>Awarded date</strong></h4><p>15 April 2024</p>\
            <h4><strong>Contact name</strong></h4><p>J Smith</p>\
            <h4><strong>Address</strong></h4><p>Town Hall<br>High Street<br>EX1 2CD</p>\
            <h4><strong>Website</strong></h4>\
            <p><a href=\"https://www.example.gov.uk/tenders\">tenders</a></p>\
            <p><a href=\"mailto:procurement@example.gov.uk\">procurement@example.gov.uk</a></p>\
          </div>\
          <div>{position_five}</div>\
          <div>{position_six}</div>\
        </div>\
        </div>\
        </body></html>"
    )
}

#[test]
fn test_full_record_assembly() {
    let page = DetailPage::parse(&detail_page(Some(5), true));
    let record = page.record();

    assert_eq!(record.title, "School Catering Services");
    assert_eq!(record.buyer, "Example Borough Council");
    assert_eq!(record.industry, "Catering services, School meals");
    assert_eq!(record.location, "North West");
    assert_eq!(record.value, "12345");
    assert_eq!(record.procurement_reference, "EX-2024-001");
    assert_eq!(record.published_date, "1 March 2024");
    assert_eq!(record.closing_date, "29 March 2024");
    assert_eq!(record.closing_time, "12:00pm");
    assert_eq!(record.contract_start_date, "1 September 2024");
    assert_eq!(record.contract_end_date, "31 August 2026");
    assert_eq!(record.contract_type, "Service contract");
    assert_eq!(record.procedure_type, "Open procedure");
    assert_eq!(record.suitable_for_smes, "Yes");
    assert_eq!(record.suitable_for_vcses, "No");
    assert_eq!(
        record.description,
        "Provision of catering services.\nTwo year initial term."
    );
    assert_eq!(record.awarded_date, "15 April 2024");
    assert_eq!(record.contact_name, "J Smith");
    assert_eq!(record.buyer_address, "Town Hall, High Street, EX1 2CD");
    assert_eq!(record.buyer_email, "procurement@example.gov.uk");
    assert_eq!(record.website, "https://www.example.gov.uk/tenders");
    assert_eq!(record.supplier, "Acme Catering Ltd");
    assert_eq!(record.supplier_address, "1 Supplier Way");
    assert_eq!(record.supplier_reference, "SUP-001");
    assert_eq!(record.supplier_sme, "Yes");
    assert_eq!(record.supplier_vcse, "No");
}

#[test]
fn test_supplier_name_from_fallback_position() {
    // Position A empty, position B populated: the fallback wins.
    let page = DetailPage::parse(&detail_page(Some(6), true));
    let record = page.record();
    assert_eq!(record.supplier, "Acme Catering Ltd");
    assert_eq!(record.supplier_address, "1 Supplier Way");
}

#[test]
fn test_missing_supplier_block_leaves_subfields_empty() {
    // Expected for single-supplier or non-awarded notices: the rest of
    // the record still assembles.
    let page = DetailPage::parse(&detail_page(Some(5), false));
    let record = page.record();

    assert_eq!(record.supplier, "Acme Catering Ltd");
    assert_eq!(record.supplier_address, "");
    assert_eq!(record.supplier_reference, "");
    assert_eq!(record.supplier_sme, "");
    assert_eq!(record.supplier_vcse, "");
    assert_eq!(record.title, "School Catering Services");
    assert_eq!(record.value, "12345");
}

#[test]
fn test_no_supplier_at_all() {
    let page = DetailPage::parse(&detail_page(None, false));
    let record = page.record();
    assert_eq!(record.supplier, "");
    assert_eq!(record.supplier_address, "");
}

#[test]
fn test_sparse_page_yields_empty_fields_not_errors() {
    let page = DetailPage::parse(
        "<html><body><div id=\"all-content-wrapper\"><h1>Bare Notice</h1></div></body></html>",
    );
    let record = page.record();
    assert_eq!(record.title, "Bare Notice");
    assert_eq!(record.buyer, "");
    assert_eq!(record.value, "");
    assert_eq!(record.description, "");
    assert_eq!(record.website, "");
    assert_eq!(record.supplier, "");
}
