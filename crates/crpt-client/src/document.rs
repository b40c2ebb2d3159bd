//! Document model and the canonical submission envelope.

use serde::{Deserialize, Serialize};

/// A goods-introduction document as accepted by the registry.
///
/// Every field except `import_request` is optional; fields left as `None`
/// are omitted from the serialized payload entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Nested description block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    /// Document identifier assigned by the registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    /// Document status, e.g. `DRAFT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_status: Option<String>,
    /// Document type, e.g. `LP_INTRODUCE_GOODS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Whether the goods were imported. Always serialized.
    #[serde(default)]
    pub import_request: bool,
    /// Owner taxpayer identification number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_inn: Option<String>,
    /// Participant taxpayer identification number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_inn: Option<String>,
    /// Producer taxpayer identification number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_inn: Option<String>,
    /// Production date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    /// Production type, e.g. `LOCAL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_type: Option<String>,
    /// Products covered by this document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    /// Registration date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_date: Option<String>,
    /// Registration number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_number: Option<String>,
}

impl Document {
    /// Returns `true` when no field carries a value.
    ///
    /// An empty document is rejected by submission validation the same way
    /// a missing document would be.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            description,
            doc_id,
            doc_status,
            doc_type,
            import_request,
            owner_inn,
            participant_inn,
            producer_inn,
            production_date,
            production_type,
            products,
            reg_date,
            reg_number,
        } = self;
        description.is_none()
            && doc_id.is_none()
            && doc_status.is_none()
            && doc_type.is_none()
            && !import_request
            && owner_inn.is_none()
            && participant_inn.is_none()
            && producer_inn.is_none()
            && production_date.is_none()
            && production_type.is_none()
            && products.is_none()
            && reg_date.is_none()
            && reg_number.is_none()
    }
}

/// Description block nested inside a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    /// Participant taxpayer identification number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_inn: Option<String>,
}

/// A single product entry inside a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Certificate document code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_document: Option<String>,
    /// Certificate document date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_document_date: Option<String>,
    /// Certificate document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_document_number: Option<String>,
    /// Owner taxpayer identification number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_inn: Option<String>,
    /// Producer taxpayer identification number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_inn: Option<String>,
    /// Production date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    /// Commodity classification (TN VED) code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tnved_code: Option<String>,
    /// Unit identification code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uit_code: Option<String>,
    /// Unit package identification code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uitu_code: Option<String>,
}

/// Format of the submitted document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentFormat {
    /// Structured JSON entered manually.
    Manual,
    /// XML payload.
    Xml,
    /// CSV payload.
    Csv,
}

/// Registry operation the submission performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Introduction of domestically produced goods.
    LpIntroduceGoods,
}

/// Submission wrapper POSTed to the registry.
///
/// Field declaration order is the canonical wire order; do not reorder.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<'a> {
    document_format: DocumentFormat,
    product_document: &'a Document,
    product_group: &'static str,
    signature: &'a str,
    #[serde(rename = "type")]
    document_type: DocumentType,
}

impl<'a> Envelope<'a> {
    pub(crate) fn new(document: &'a Document, signature: &'a str) -> Self {
        Self {
            document_format: DocumentFormat::Manual,
            product_document: document,
            product_group: "clothes",
            signature,
            document_type: DocumentType::LpIntroduceGoods,
        }
    }
}
