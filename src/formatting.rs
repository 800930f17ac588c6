// src/formatting.rs

use crate::core::Event;
use crate::notification::message::{Block, TextObject};

/// Maximum number of characters placed in a single preformatted section.
pub const CHUNK_SIZE: usize = 2000;

pub const DEFAULT_TITLE: &str = ":red_circle: podalert detected a crash in pod";
pub const DEFAULT_TEXT: &str = "There is an issue with container in a pod!";
pub const FOOTER: &str = ":bell: Sent by podalert";

/// Lays an [`Event`] out as Slack blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackBlockFormatter {
    cluster_name: String,
    title: Option<String>,
    text: Option<String>,
}

impl SlackBlockFormatter {
    /// Creates a formatter. `None` title or text falls back to the defaults.
    pub fn new(
        cluster_name: impl Into<String>,
        title: Option<String>,
        text: Option<String>,
    ) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            title,
            text,
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(DEFAULT_TEXT)
    }

    /// Builds the full block sequence for an event, footer included.
    pub fn format_event(&self, event: &Event) -> Vec<Block> {
        let mut blocks = vec![
            Block::markdown(self.title()),
            Block::plain(self.text()),
            Block::fields(vec![
                field("Cluster", &self.cluster_name),
                field("Name", &event.pod_name),
                field("Container", &event.container_name),
                field("Namespace", &event.namespace),
                field("Reason", &event.reason),
            ]),
        ];

        push_chunked(&mut blocks, ":mag: *Events*", &event.events);
        push_chunked(&mut blocks, ":memo: *Logs*", &event.logs);

        blocks.push(Block::markdown(FOOTER));
        blocks
    }
}

fn field(label: &str, value: &str) -> TextObject {
    TextObject::markdown(format!("*{}*\n{}", label, value))
}

/// Appends a header and one preformatted section per chunk, unless `body` is blank.
fn push_chunked(blocks: &mut Vec<Block>, header: &str, body: &str) {
    let body = body.trim();
    if body.is_empty() {
        return;
    }

    blocks.push(Block::markdown(header));
    blocks.extend(
        chunks(body, CHUNK_SIZE)
            .into_iter()
            .map(|chunk| Block::markdown(format!("```{}```", chunk))),
    );
}

/// Splits `s` into consecutive pieces of at most `size` characters.
///
/// Counts `char`s rather than bytes, so multi-byte characters are never split.
/// Input of `size` characters or fewer comes back as a single piece.
pub fn chunks(s: &str, size: usize) -> Vec<&str> {
    if size == 0 {
        return vec![s];
    }

    let mut pieces = Vec::with_capacity(s.len() / size + 1);
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in s.char_indices() {
        if count == size {
            pieces.push(&s[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    pieces.push(&s[start..]);
    pieces
}
