use crate::models::{Message, Sender};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Ratatui rendering for a single transcript entry. User and bot entries get
/// distinct colors but identical structure, so a backend-reported error
/// string is indistinguishable from a normal reply.
impl Message {
    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let style = self.base_style();
        let mut lines = Vec::new();

        self.render_header(&mut lines, style);
        self.render_content(&mut lines, area, style);
        self.render_footer(&mut lines, style);

        lines
    }

    fn base_style(&self) -> Style {
        Style::default().fg(match self.sender {
            Sender::User => Color::Rgb(255, 223, 128), // warm yellow
            Sender::Bot => Color::Rgb(144, 238, 144),  // soft green
        })
    }

    fn label(&self) -> &'static str {
        match self.sender {
            Sender::User => "You",
            Sender::Bot => "ChatPal",
        }
    }

    fn indent(&self) -> &'static str {
        match self.sender {
            Sender::User => "  ",
            Sender::Bot => "",
        }
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();

        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
            Span::styled(" ".to_string(), style),
            Span::styled(self.label().to_string(), style.add_modifier(Modifier::BOLD)),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let wrap_width = (area.width as usize).saturating_sub(4).max(1);

        for wrapped_line in wrap(&self.content, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled(self.indent().to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped_line.to_string(), style),
            ]));
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn renders_header_body_footer() {
        let message = Message::bot("hello");
        let area = Rect::new(0, 0, 40, 10);

        let lines = message.render(area);
        assert_eq!(lines.len(), 3);
        assert!(text_of(&lines[0]).contains("ChatPal"));
        assert!(text_of(&lines[1]).contains("hello"));
        assert!(text_of(&lines[2]).contains("╰─"));
    }

    #[test]
    fn wraps_long_content_to_panel_width() {
        let message = Message::user("a".repeat(100));
        let area = Rect::new(0, 0, 24, 10);

        let lines = message.render(area);
        // header + several wrapped rows + footer
        assert!(lines.len() > 3);
    }
}
