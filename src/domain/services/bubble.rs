#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use super::Theme;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

// Borders, inner padding, and the scrollbar gutter around the text itself.
const FRAME_WIDTH: usize = 8;

fn pad_to(line: &str, width: usize) -> String {
    let fill = width.saturating_sub(line.chars().count());
    return format!("{line}{fill}", fill = " ".repeat(fill));
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
    show_trace: bool,
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
        show_trace: bool,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
            show_trace,
        };
    }

    fn author_color(&self, theme: &Theme) -> Color {
        if self.message.message_type() == MessageType::Error {
            return theme.error;
        }

        match self.message.author {
            Author::User => return theme.user,
            Author::Agent => return theme.agent,
            Author::Confab => return theme.app,
        }
    }

    pub fn as_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let author = self.message.author.to_string();
        let author_len = author.chars().count();
        let max_text_width = self.window_max_width.saturating_sub(FRAME_WIDTH);

        let content = self.message.as_string_lines(max_text_width);
        let mut trace_lines: Vec<String> = vec![];
        if self.show_trace {
            if let Some(lines) = self.message.trace_string_lines(max_text_width) {
                trace_lines = lines;
            }
        }

        let inner_width = content
            .iter()
            .chain(trace_lines.iter())
            .map(|line| return line.chars().count())
            .max()
            .unwrap_or(0)
            .max(author_len);
        let bubble_width = inner_width + 4;

        let border_style = Style::default().fg(self.author_color(theme));
        let mut text_style = Style::default();
        if self.message.message_type() == MessageType::Error {
            text_style = Style::default().fg(theme.error);
        }
        let trace_style = Style::default().fg(theme.trace);

        let mut lines: Vec<Line> = vec![];

        let top = format!(
            "╭ {author} {fill}╮",
            fill = "─".repeat(inner_width - author_len)
        );
        lines.push(self.framed(vec![Span::styled(top, border_style)], bubble_width));

        for line in content.iter() {
            lines.push(self.framed(
                vec![
                    Span::styled("│ ".to_string(), border_style),
                    Span::styled(pad_to(line, inner_width), text_style),
                    Span::styled(" │".to_string(), border_style),
                ],
                bubble_width,
            ));
        }

        if !trace_lines.is_empty() {
            let divider = format!("├{fill}┤", fill = "─".repeat(inner_width + 2));
            lines.push(self.framed(vec![Span::styled(divider, border_style)], bubble_width));

            for line in trace_lines.iter() {
                lines.push(self.framed(
                    vec![
                        Span::styled("│ ".to_string(), border_style),
                        Span::styled(pad_to(line, inner_width), trace_style),
                        Span::styled(" │".to_string(), border_style),
                    ],
                    bubble_width,
                ));
            }
        }

        let bottom = format!("╰{fill}╯", fill = "─".repeat(inner_width + 2));
        lines.push(self.framed(vec![Span::styled(bottom, border_style)], bubble_width));

        return lines;
    }

    fn framed(&self, mut spans: Vec<Span<'static>>, bubble_width: usize) -> Line<'static> {
        if self.alignment == BubbleAlignment::Right {
            let pad = self.window_max_width.saturating_sub(bubble_width);
            if pad > 0 {
                spans.insert(0, Span::from(" ".repeat(pad)));
            }
        }

        return Line::from(spans);
    }
}
