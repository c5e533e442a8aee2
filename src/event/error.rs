/// Errors raised by an event source
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Error from the XML tokenizer
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute syntax
    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// I/O error from the underlying reader
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 encoding error in names or text
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Prefix used without a namespace declaration in scope
    #[error("Unbound namespace prefix: {0}")]
    UnboundPrefix(String),
}
