//! Streaming XML writer

use super::{XmlEntity, XmlEntityType};
use crate::error::Result;
use crate::io::sink::DataSink;
use crate::notification::{NotificationCollection, NotificationType, StreamLocation};
use log::{debug, warn};
use quick_xml::escape::escape;

/// Writes [`XmlEntity`] values to a byte sink.
///
/// Every start element is remembered until its end element is written.
/// [`XmlWriter::flush`] closes whatever is still open, innermost first, and
/// runs automatically when the writer is dropped.
///
/// An end element that does not match the innermost open element is still
/// written, but leaves the open-element stack untouched.
pub struct XmlWriter<S: DataSink> {
    sink: S,
    open_elements: Vec<String>,
    entities_written: usize,
    notifications: NotificationCollection,
}

impl<S: DataSink> XmlWriter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            open_elements: Vec::new(),
            entities_written: 0,
            notifications: NotificationCollection::new(),
        }
    }

    /// Serialize one entity with a single sink write.
    ///
    /// Invalid entities (see [`XmlEntity::validate`]) are rejected before
    /// anything is written.
    pub fn write_entity(&mut self, entity: &XmlEntity) -> Result<()> {
        entity.validate()?;

        let mut out = String::new();
        match entity.entity_type {
            XmlEntityType::StartElement => {
                out.push('<');
                out.push_str(&entity.name);
                push_attributes(&mut out, entity);
                out.push('>');
            }
            XmlEntityType::EndElement => {
                out.push_str("</");
                out.push_str(&entity.name);
                out.push('>');
            }
            XmlEntityType::CompleteElement => {
                out.push('<');
                out.push_str(&entity.name);
                push_attributes(&mut out, entity);
                out.push_str("/>");
            }
            XmlEntityType::CharData => out.push_str(&escape(entity.name.as_str())),
        }

        self.sink.write(out.as_bytes())?;
        self.entities_written += 1;

        match entity.entity_type {
            XmlEntityType::StartElement => self.open_elements.push(entity.name.clone()),
            XmlEntityType::EndElement => self.close_element(&entity.name),
            _ => {}
        }
        Ok(())
    }

    /// Close every open element, innermost first, then flush the sink
    pub fn flush(&mut self) -> Result<()> {
        let mut out = String::new();
        for name in self.open_elements.iter().rev() {
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }

        self.sink.write(out.as_bytes())?;
        if !self.open_elements.is_empty() {
            debug!("closed {} open XML elements on flush", self.open_elements.len());
        }
        self.open_elements.clear();
        self.sink.flush()
    }

    /// Names of the elements written but not yet closed, outermost first
    pub fn open_elements(&self) -> &[String] {
        &self.open_elements
    }

    /// Notifications collected so far
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Get a reference to the inner sink
    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    fn close_element(&mut self, name: &str) {
        if self.open_elements.last().map(String::as_str) == Some(name) {
            self.open_elements.pop();
            return;
        }
        let innermost = self.open_elements.last().map(String::as_str).unwrap_or("");
        warn!("end tag </{}> does not match open element <{}>", name, innermost);
        self.notifications.notify_at(
            NotificationType::Warning,
            StreamLocation::Entity(self.entities_written),
            format!("end tag </{}> does not match open element <{}>", name, innermost),
        );
    }
}

impl<S: DataSink> Drop for XmlWriter<S> {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            warn!("XML writer flush on drop failed: {}", err);
        }
    }
}

fn push_attributes(out: &mut String, entity: &XmlEntity) {
    for (name, value) in entity.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
}
