use serde::{Deserialize, Serialize};

/// Column headers of the record store, in persisted order.
///
/// The order is load-bearing: `ContractRecord`'s field declaration order
/// must match this list exactly, because rows are serialized positionally.
pub const HEADERS: [&str; 26] = [
    "Title",
    "Buyer",
    "Industry",
    "Location of contract",
    "Value of contract",
    "Procurement reference",
    "Published date",
    "Closing date",
    "Closing time",
    "Contract start date",
    "Contract end date",
    "Contract type",
    "Procedure type",
    "Contract is suitable for SMEs?",
    "Contract is suitable for VCSEs?",
    "Description",
    "Awarded date",
    "Buyer Contact name",
    "Buyer Address",
    "Buyer Email",
    "Website",
    "Supplier",
    "Supplier Address",
    "Reference",
    "Supplier is SME?",
    "Supplier is VCSE?",
];

/// One extracted contract notice.
///
/// Every field is a string; a missing field is an empty string, never an
/// error. `value` holds the normalized numeric amount (lower bound of a
/// range, currency and thousands separators stripped) or the raw cleaned
/// text when it does not parse as a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub title: String,
    pub buyer: String,
    pub industry: String,
    pub location: String,
    pub value: String,
    pub procurement_reference: String,
    pub published_date: String,
    pub closing_date: String,
    pub closing_time: String,
    pub contract_start_date: String,
    pub contract_end_date: String,
    pub contract_type: String,
    pub procedure_type: String,
    pub suitable_for_smes: String,
    pub suitable_for_vcses: String,
    pub description: String,
    pub awarded_date: String,
    pub contact_name: String,
    pub buyer_address: String,
    pub buyer_email: String,
    pub website: String,
    pub supplier: String,
    pub supplier_address: String,
    pub supplier_reference: String,
    pub supplier_sme: String,
    pub supplier_vcse: String,
}
