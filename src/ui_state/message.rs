use ratatui::text::Span;

/// The message text and its wrapping for the current viewport width
pub struct MessageView {
    text: String,
    lines: Vec<String>,
    width: u16,
}

impl MessageView {
    pub fn new(text: &str) -> Self {
        MessageView {
            text: text.replace("\r\n", "\n"),
            lines: Vec::new(),
            width: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the wrapped height may have changed
    pub fn rewrap(&mut self, width: u16) -> bool {
        if width == self.width && !self.lines.is_empty() {
            return false;
        }

        self.width = width;
        self.lines = wrap_text(&self.text, width as usize);
        true
    }
}

/// Greedy word wrap measured in terminal cells. Words wider than `width`
/// are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = cell_width(word);

            if current_width > 0 && current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
                continue;
            }

            if current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for c in word.chars() {
                let c_width = cell_width(c.encode_utf8(&mut [0; 4]));

                // A lone character always gets a line, even if it overflows
                if current_width > 0 && current_width + c_width > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }

                current.push(c);
                current_width += c_width;
            }
        }

        lines.push(current);
    }

    lines
}

fn cell_width(s: &str) -> usize {
    Span::raw(s).width()
}
