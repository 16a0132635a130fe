//! XML entity: one parse event or one unit of writer output

use crate::error::{CodecError, Result};

/// Kind of an [`XmlEntity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlEntityType {
    /// `<name attr="value">`
    StartElement,
    /// `</name>`
    EndElement,
    /// `<name attr="value"/>`
    CompleteElement,
    /// Text between tags
    CharData,
}

/// An XML entity.
///
/// `name` holds the tag name for element entities and the unescaped text
/// for [`XmlEntityType::CharData`]. Attributes keep insertion order and are
/// only meaningful on start and complete elements. Duplicate names are not
/// rejected; lookups return the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlEntity {
    pub entity_type: XmlEntityType,
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl XmlEntity {
    pub fn new(entity_type: XmlEntityType, name: impl Into<String>) -> Self {
        Self {
            entity_type,
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn start_element(name: impl Into<String>) -> Self {
        Self::new(XmlEntityType::StartElement, name)
    }

    pub fn end_element(name: impl Into<String>) -> Self {
        Self::new(XmlEntityType::EndElement, name)
    }

    pub fn complete_element(name: impl Into<String>) -> Self {
        Self::new(XmlEntityType::CompleteElement, name)
    }

    pub fn char_data(text: impl Into<String>) -> Self {
        Self::new(XmlEntityType::CharData, text)
    }

    /// Builder form of [`XmlEntity::set_attribute`]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Text payload of a character data entity
    pub fn text(&self) -> Option<&str> {
        match self.entity_type {
            XmlEntityType::CharData => Some(&self.name),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.entity_type != XmlEntityType::CharData
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute_exists(&self, name: &str) -> bool {
        self.attributes.iter().any(|(key, _)| key == name)
    }

    /// Value of the first attribute called `name`
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Overwrite the first attribute called `name` in place, or append it.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Check that the entity can be serialized
    pub fn validate(&self) -> Result<()> {
        match self.entity_type {
            XmlEntityType::CharData if !self.attributes.is_empty() => Err(
                CodecError::InvalidEntity("character data cannot carry attributes".to_string()),
            ),
            XmlEntityType::EndElement if !self.attributes.is_empty() => Err(
                CodecError::InvalidEntity(format!("end element </{}> cannot carry attributes", self.name)),
            ),
            XmlEntityType::CharData => Ok(()),
            _ if self.name.is_empty() => Err(CodecError::InvalidEntity(format!(
                "{:?} has an empty name",
                self.entity_type
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let e = XmlEntity::start_element("root");
        assert_eq!(e.entity_type, XmlEntityType::StartElement);
        assert_eq!(e.name, "root");
        assert!(e.attributes().is_empty());
        assert!(e.is_element());
        assert_eq!(e.text(), None);

        let t = XmlEntity::char_data("Hello");
        assert_eq!(t.text(), Some("Hello"));
        assert!(!t.is_element());
    }

    #[test]
    fn test_set_attribute_overwrites_in_place() {
        let mut e = XmlEntity::start_element("tag")
            .with_attribute("a", "1")
            .with_attribute("b", "2");
        e.set_attribute("a", "3");

        assert_eq!(e.attributes().len(), 2);
        assert_eq!(e.attributes()[0], ("a".to_string(), "3".to_string()));
        assert_eq!(e.attribute_value("a"), Some("3"));
    }

    #[test]
    fn test_duplicate_lookup_returns_first() {
        let mut e = XmlEntity::start_element("tag");
        e.attributes.push(("k".into(), "first".into()));
        e.attributes.push(("k".into(), "second".into()));

        assert_eq!(e.attribute_value("k"), Some("first"));
        assert!(e.attribute_exists("k"));
        assert!(!e.attribute_exists("missing"));
        assert_eq!(e.attribute_value("missing"), None);

        e.set_attribute("k", "third");
        assert_eq!(e.attributes().len(), 2);
        assert_eq!(e.attributes()[1].1, "second");
    }

    #[test]
    fn test_validate() {
        assert!(XmlEntity::start_element("a").with_attribute("x", "y").validate().is_ok());
        assert!(XmlEntity::char_data("").validate().is_ok());

        let mut text = XmlEntity::char_data("t");
        text.attributes.push(("x".into(), "y".into()));
        assert!(matches!(text.validate(), Err(CodecError::InvalidEntity(_))));

        let mut end = XmlEntity::end_element("a");
        end.attributes.push(("x".into(), "y".into()));
        assert!(end.validate().is_err());

        assert!(XmlEntity::complete_element("").validate().is_err());
    }
}
