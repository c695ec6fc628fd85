use crate::{
    descriptors::DescriptorError,
    sdt::{SdtError, TextError},
    section::SectionError,
};

/// Unified codec error covering descriptor, section, table and text layers.
/// - `From<T>` impls let `?` cross layer boundaries.
/// - Table deserialization itself never fails through this type; see
///   [`Sdt::from_sections`](crate::sdt::Sdt::from_sections).
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Descriptor-level error (construction or strict parse).
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Section wire error (validation or parse).
    #[error("section error: {0}")]
    Section(#[from] SectionError),

    /// Section set rejected as an SDT.
    #[error("table error: {0}")]
    Table(#[from] SdtError),

    /// JSON form error.
    #[error("text error: {0}")]
    Text(#[from] TextError),
}
