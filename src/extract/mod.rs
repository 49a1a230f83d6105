//! Field extraction over a captured detail-page snapshot.
//!
//! The session hands the extractor one fully-rendered page source; the
//! extractor decodes the site's label/value pairing into a
//! [`ContractRecord`]. All 26 fields are computed independently, so a
//! missing field never aborts assembly of the others.

mod fields;

#[cfg(test)]
mod tests;

pub use fields::DetailPage;

use crate::record::ContractRecord;
use crate::site;

impl DetailPage {
    /// Assemble the full record from this page, in persisted field order.
    pub fn record(&self) -> ContractRecord {
        ContractRecord {
            title: self.text_at(site::TITLE),
            buyer: self.text_at(site::BUYER),
            industry: self.industry(),
            location: self.value_by_label("Location of contract"),
            value: self.numeric_value("Total value of contract"),
            procurement_reference: self.value_by_label("Procurement reference"),
            published_date: self.value_by_label("Published date"),
            closing_date: self.value_by_label("Closing date"),
            closing_time: self.value_by_label("Closing time"),
            contract_start_date: self.value_by_label("Contract start date"),
            contract_end_date: self.value_by_label("Contract end date"),
            contract_type: self.value_by_label("Contract type"),
            procedure_type: self.value_by_label("Procedure type"),
            suitable_for_smes: self.value_by_label("Contract is suitable for SMEs?"),
            suitable_for_vcses: self.value_by_label("Contract is suitable for VCSEs?"),
            description: self.description(),
            awarded_date: self.value_by_label("Awarded date"),
            contact_name: self.value_by_label("Contact name"),
            buyer_address: self.value_by_label_joined("Address"),
            buyer_email: self.text_at(site::BUYER_EMAIL),
            website: self.website(),
            supplier: self.supplier_name(),
            supplier_address: self.text_at(site::SUPPLIER_ADDRESS),
            supplier_reference: self.text_at(site::SUPPLIER_REFERENCE),
            supplier_sme: self.text_at(site::SUPPLIER_SME),
            supplier_vcse: self.text_at(site::SUPPLIER_VCSE),
        }
    }
}
