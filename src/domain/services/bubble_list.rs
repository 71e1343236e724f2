#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use std::collections::HashMap;
use std::collections::HashSet;

use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use super::Theme;
use crate::domain::models::Author;
use crate::domain::models::Message;

struct BubbleCacheEntry {
    lines: Vec<Line<'static>>,
}

/// Rendered-line cache over the conversation snapshot, keyed by message id.
/// Messages never change once appended, so an entry only goes stale when the
/// width, palette, or trace visibility changes, or when a session replace
/// drops its message.
pub struct BubbleList {
    cache: HashMap<u64, BubbleCacheEntry>,
    line_width: usize,
    lines_len: usize,
    show_traces: bool,
    theme: Theme,
}

impl BubbleList {
    pub fn new(theme: Theme) -> BubbleList {
        return BubbleList {
            cache: HashMap::new(),
            line_width: 0,
            lines_len: 0,
            show_traces: false,
            theme,
        };
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.cache.clear();
    }

    pub fn set_messages(&mut self, messages: &[Message], line_width: usize, show_traces: bool) {
        if self.line_width != line_width || self.show_traces != show_traces {
            self.cache.clear();
            self.line_width = line_width;
            self.show_traces = show_traces;
        }

        let live = messages
            .iter()
            .map(|message| return message.id)
            .collect::<HashSet<u64>>();
        self.cache.retain(|id, _| return live.contains(id));

        let mut lines_len = 0;
        for message in messages.iter() {
            if !self.cache.contains_key(&message.id) {
                let mut align = BubbleAlignment::Left;
                if message.author == Author::User {
                    align = BubbleAlignment::Right;
                }

                let lines = Bubble::new(message, align, self.line_width, self.show_traces)
                    .as_lines(&self.theme);
                self.cache.insert(message.id, BubbleCacheEntry { lines });
            }

            lines_len += self.cache.get(&message.id).unwrap().lines.len();
        }

        self.lines_len = lines_len;
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, scroll: usize) {
        let mut ids: Vec<u64> = self.cache.keys().cloned().collect();
        ids.sort_unstable();

        let lines: Vec<Line> = ids
            .iter()
            .flat_map(|id| {
                return self.cache.get(id).unwrap().lines.to_owned();
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll.try_into().unwrap(), 0)),
            rect,
        );
    }
}
