//! XML utilities: element tree for reading, streaming emitter for writing

mod buffer;
mod emitter;
mod namespace;
mod node;

pub use buffer::OutputBuffer;
pub use emitter::XmlEmitter;
pub use namespace::*;
pub use node::{parse_on_off, XmlElement, XmlNode};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_constants() {
        assert!(W.contains("wordprocessingml"));
        assert!(R.contains("relationships"));
        assert!(odf::OFFICE.starts_with("urn:oasis:names:tc:opendocument"));
    }
}
