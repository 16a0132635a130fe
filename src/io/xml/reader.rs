//! Streaming XML reader
//!
//! Bytes are pulled from the [`DataSource`] in fixed-size chunks and fed to
//! a `quick_xml` pull tokenizer. Each tokenizer event is turned into zero or
//! more [`XmlEntity`] values appended to a FIFO queue; the source is only
//! touched again once the queue has been drained.

use super::{XmlEntity, XmlEntityType, XmlReaderConfiguration};
use crate::error::{CodecError, Result};
use crate::io::source::DataSource;
use crate::notification::{NotificationCollection, NotificationType, StreamLocation};
use log::{debug, trace, warn};
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use std::collections::VecDeque;
use std::io::{self, BufRead, Read};

/// Observable state of an [`XmlReader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlReaderState {
    /// Queue empty, more input may still produce entities
    Accumulating,
    /// At least one entity is queued
    EntityAvailable,
    /// Input finished (or failed) and the queue is drained
    Exhausted,
}

/// `BufRead` over a [`DataSource`], refilled one chunk at a time
struct SourceChunks<S: DataSource> {
    source: S,
    chunk: Vec<u8>,
    pos: usize,
    len: usize,
}

impl<S: DataSource> SourceChunks<S> {
    fn new(source: S, chunk_size: usize) -> Self {
        Self {
            source,
            chunk: vec![0u8; chunk_size.max(1)],
            pos: 0,
            len: 0,
        }
    }

    /// Change the refill size. Only called before the first read.
    fn set_chunk_size(&mut self, chunk_size: usize) {
        self.chunk = vec![0u8; chunk_size.max(1)];
        self.pos = 0;
        self.len = 0;
    }
}

impl<S: DataSource> Read for SourceChunks<S> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let count = available.len().min(out.len());
        out[..count].copy_from_slice(&available[..count]);
        self.consume(count);
        Ok(count)
    }
}

impl<S: DataSource> BufRead for SourceChunks<S> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.len {
            self.len = self.source.read(&mut self.chunk).map_err(into_io_error)?;
            self.pos = 0;
            trace!("pulled {} bytes from XML source", self.len);
        }
        Ok(&self.chunk[self.pos..self.len])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.len);
    }
}

fn into_io_error(err: CodecError) -> io::Error {
    match err {
        CodecError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}

/// Reads [`XmlEntity`] values from a byte source.
///
/// Character data between two pieces of markup (text, CDATA sections and
/// character/predefined entity references) is delivered as one
/// [`XmlEntityType::CharData`] entity. Whitespace-only runs are kept unless
/// [`XmlReaderConfiguration::skip_whitespace_text`] is set. Empty elements
/// are reported as a start element followed by an end element.
///
/// A parse error is terminal: the failing call returns the error and every
/// later call returns `Ok(None)`.
pub struct XmlReader<S: DataSource> {
    parser: quick_xml::Reader<SourceChunks<S>>,
    config: XmlReaderConfiguration,
    event_buf: Vec<u8>,
    queue: VecDeque<XmlEntity>,
    pending_text: String,
    /// Last raw text event ended in `\r`, so a leading `\n` in the next one is its pair
    after_cr: bool,
    open_elements: Vec<String>,
    root_closed: bool,
    exhausted: bool,
    notifications: NotificationCollection,
}

impl<S: DataSource> XmlReader<S> {
    /// Create a reader with the default configuration
    pub fn new(source: S) -> Self {
        let config = XmlReaderConfiguration::default();
        let mut parser = quick_xml::Reader::from_reader(SourceChunks::new(source, config.chunk_size));
        parser.config_mut().trim_text(false);

        Self {
            parser,
            config,
            event_buf: Vec::new(),
            queue: VecDeque::new(),
            pending_text: String::new(),
            after_cr: false,
            open_elements: Vec::new(),
            root_closed: false,
            exhausted: false,
            notifications: NotificationCollection::new(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: XmlReaderConfiguration) -> Self {
        self.parser.get_mut().set_chunk_size(config.chunk_size);
        self.config = config;
        self
    }

    /// `true` when the input is finished and every entity has been delivered
    pub fn end(&self) -> bool {
        self.exhausted && self.queue.is_empty()
    }

    pub fn state(&self) -> XmlReaderState {
        if !self.queue.is_empty() {
            XmlReaderState::EntityAvailable
        } else if self.exhausted {
            XmlReaderState::Exhausted
        } else {
            XmlReaderState::Accumulating
        }
    }

    /// Notifications collected so far
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Read the next entity.
    ///
    /// With `skip_cdata`, character data entities are discarded until an
    /// element entity is found. Returns `Ok(None)` once nothing is left.
    pub fn read_entity(&mut self, skip_cdata: bool) -> Result<Option<XmlEntity>> {
        loop {
            while self.queue.is_empty() && !self.exhausted {
                if let Err(err) = self.pull_event() {
                    self.fail(&err);
                    return Err(err);
                }
            }

            match self.queue.pop_front() {
                Some(entity) if skip_cdata && entity.entity_type == XmlEntityType::CharData => {
                    continue
                }
                next => return Ok(next),
            }
        }
    }

    /// Feed one tokenizer event into the queue
    fn pull_event(&mut self) -> Result<()> {
        let mut buf = std::mem::take(&mut self.event_buf);
        let result = match self.parser.read_event_into(&mut buf) {
            Ok(event) => self.handle_event(event),
            Err(err) => Err(self.parse_error(err)),
        };
        buf.clear();
        self.event_buf = buf;
        result
    }

    fn handle_event(&mut self, event: Event<'_>) -> Result<()> {
        if !matches!(event, Event::Text(_)) {
            self.after_cr = false;
        }

        match event {
            Event::Start(e) => {
                let entity = self.element_entity(&e)?;
                self.begin_element(entity)?;
            }
            Event::Empty(e) => {
                let entity = self.element_entity(&e)?;
                let name = entity.name.clone();
                self.begin_element(entity)?;
                self.finish_element(name)?;
            }
            Event::End(e) => {
                let name = self.decode(e.name().as_ref())?.to_string();
                self.finish_element(name)?;
            }
            Event::Text(e) => {
                let raw = self.decode(&e)?;
                let raw = if self.after_cr {
                    raw.strip_prefix('\n').unwrap_or(raw)
                } else {
                    raw
                };
                self.after_cr = raw.ends_with('\r');
                let text = normalize_line_endings(raw);
                self.append_text(&text)?;
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                let text = normalize_line_endings(self.decode(&raw)?);
                self.append_text(&text)?;
            }
            Event::GeneralRef(e) => {
                let raw: &[u8] = e.as_ref();
                let name = self.decode(raw)?.to_string();
                match resolve_reference(&name) {
                    Some(text) => self.append_text(&text)?,
                    None => {
                        return Err(self.structure_error(format!("undefined entity &{};", name)))
                    }
                }
            }
            Event::Comment(_) => trace!("skipping XML comment"),
            Event::PI(_) => trace!("skipping XML processing instruction"),
            Event::Decl(_) => trace!("skipping XML declaration"),
            Event::DocType(_) => {
                self.notifications.notify_at(
                    NotificationType::NotSupported,
                    StreamLocation::Byte(self.parser.buffer_position() as u64),
                    "DOCTYPE declaration skipped",
                );
            }
            Event::Eof => self.finish()?,
        }
        Ok(())
    }

    fn element_entity(&self, e: &BytesStart<'_>) -> Result<XmlEntity> {
        let mut entity = XmlEntity::start_element(self.decode(e.name().as_ref())?);
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.structure_error(err.to_string()))?;
            let key = self.decode(attr.key.as_ref())?;
            let raw = self.decode(&attr.value)?;
            let value = unescape(raw).map_err(|err| self.structure_error(err.to_string()))?;
            entity.attributes.push((key.to_string(), value.into_owned()));
        }
        Ok(entity)
    }

    fn begin_element(&mut self, entity: XmlEntity) -> Result<()> {
        if self.root_closed && self.open_elements.is_empty() {
            return Err(self.structure_error(format!(
                "element <{}> after the document element",
                entity.name
            )));
        }
        self.flush_text();
        self.open_elements.push(entity.name.clone());
        self.queue.push_back(entity);
        Ok(())
    }

    fn finish_element(&mut self, name: String) -> Result<()> {
        self.flush_text();
        self.open_elements.pop();
        if self.open_elements.is_empty() {
            self.root_closed = true;
        }
        self.queue.push_back(XmlEntity::end_element(name));
        Ok(())
    }

    fn append_text(&mut self, text: &str) -> Result<()> {
        if !self.open_elements.is_empty() {
            self.pending_text.push_str(text);
            Ok(())
        } else if text.trim().is_empty() {
            Ok(())
        } else {
            Err(self.structure_error("character data outside the document element".to_string()))
        }
    }

    /// Queue the coalesced character data collected since the last markup
    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        if self.config.skip_whitespace_text && text.trim().is_empty() {
            return;
        }
        self.queue.push_back(XmlEntity::char_data(text));
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(name) = self.open_elements.last() {
            return Err(self.structure_error(format!("unclosed element <{}> at end of input", name)));
        }
        self.flush_text();
        self.exhausted = true;
        debug!("XML source exhausted, {} entities queued", self.queue.len());
        Ok(())
    }

    fn fail(&mut self, err: &CodecError) {
        warn!("XML reader stopped: {}", err);
        match err {
            CodecError::XmlParse { position, message } => self.notifications.notify_at(
                NotificationType::Error,
                StreamLocation::Byte(*position),
                message.clone(),
            ),
            other => self.notifications.notify(NotificationType::Error, other.to_string()),
        }
        self.exhausted = true;
        self.queue.clear();
        self.pending_text.clear();
        self.after_cr = false;
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<&'a str> {
        std::str::from_utf8(bytes).map_err(|err| self.structure_error(err.to_string()))
    }

    fn structure_error(&self, message: String) -> CodecError {
        CodecError::XmlParse {
            position: self.parser.buffer_position() as u64,
            message,
        }
    }

    fn parse_error(&self, err: quick_xml::Error) -> CodecError {
        match err {
            quick_xml::Error::Io(e) => CodecError::Io(io::Error::new(e.kind(), e.to_string())),
            other => self.structure_error(other.to_string()),
        }
    }
}

impl<S: DataSource> Iterator for XmlReader<S> {
    type Item = Result<XmlEntity>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_entity(false).transpose()
    }
}

/// Resolve `#N`, `#xH` and the five predefined entity names
fn resolve_reference(name: &str) -> Option<String> {
    match name.strip_prefix('#') {
        Some(number) => {
            let code = match number.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse::<u32>().ok()?,
            };
            char::from_u32(code).map(String::from)
        }
        None => resolve_predefined_entity(name).map(String::from),
    }
}

/// `\r\n` and lone `\r` in literal text become `\n`.
///
/// Only applied to raw text and CDATA; a `\r` written as `&#13;` is kept.
fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
