//! Incremental decoder for `text/event-stream` bodies.
//!
//! Bytes may arrive split at any point, including inside a line, inside a
//! multi-byte character or between the CR and LF of a line break. Lines end
//! at CR, LF or CRLF; a blank line dispatches the buffered event. A UTF-8
//! byte order mark at the very start of the stream is dropped.

const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// One dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// `event:` field, if the server named the event
    pub event: Option<String>,
    /// `data:` lines joined with `\n`
    pub data: String,
    /// Last `id:` seen on the stream
    pub id: Option<String>,
}

impl SseEvent {
    /// Unnamed and `message` events are the ones a plain message listener sees
    pub fn is_message(&self) -> bool {
        matches!(self.event.as_deref(), None | Some("message"))
    }
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Leading BOM bytes matched before `started`
    bom_matched: usize,
    started: bool,
    line: Vec<u8>,
    after_cr: bool,
    data: Option<String>,
    event: Option<String>,
    last_event_id: Option<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of the body, returning every event it completes
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut events = Vec::new();

        for &byte in chunk {
            if !self.started {
                let matched = self.bom_matched;
                if byte == BOM[matched] {
                    self.bom_matched = matched + 1;
                    if matched + 1 == BOM.len() {
                        self.started = true;
                    }
                    continue;
                }
                // a partial match was ordinary content after all
                self.started = true;
                for &held in &BOM[..matched] {
                    self.push_byte(held, &mut events);
                }
            }
            self.push_byte(byte, &mut events);
        }

        events
    }

    fn push_byte(&mut self, byte: u8, events: &mut Vec<SseEvent>) {
        if self.after_cr {
            self.after_cr = false;
            if byte == b'\n' {
                return;
            }
        }

        match byte {
            b'\n' => self.end_line(events),
            b'\r' => {
                self.after_cr = true;
                self.end_line(events);
            }
            _ => self.line.push(byte),
        }
    }

    fn end_line(&mut self, events: &mut Vec<SseEvent>) {
        let raw = std::mem::take(&mut self.line);
        let line = String::from_utf8_lossy(&raw);

        if line.is_empty() {
            if let Some(event) = self.dispatch() {
                events.push(event);
            }
            return;
        }

        // comment
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (&*line, ""),
        };

        match field {
            "data" => match self.data.as_mut() {
                Some(data) => {
                    data.push('\n');
                    data.push_str(value);
                }
                None => self.data = Some(value.to_string()),
            },
            "event" => self.event = Some(value.to_string()),
            "id" if !value.contains('\0') => self.last_event_id = Some(value.to_string()),
            _ => {}
        }
    }

    /// Events without any data line are dropped, along with their type
    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        let data = self.data.take()?;
        Some(SseEvent { event, data, id: self.last_event_id.clone() })
    }
}
