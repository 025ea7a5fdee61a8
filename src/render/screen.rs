/// How a line should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Emphasized,
    Muted,
    /// Inverse video, for the current choice in a list.
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    pub style: Style,
}

impl DisplayLine {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::Plain)
    }

    pub fn blank() -> Self {
        Self::plain(String::new())
    }
}

/// A full frame of output, drawn from the top-left after clearing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    lines: Vec<DisplayLine>,
    footer: Option<usize>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: DisplayLine) {
        self.lines.push(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = DisplayLine>) {
        self.lines.extend(lines);
    }

    /// Push the line that carries the render timestamp.
    pub fn push_footer(&mut self, line: DisplayLine) {
        self.footer = Some(self.lines.len());
        self.lines.push(line);
    }

    /// Returns false if the screen has no footer.
    pub fn replace_footer(&mut self, line: DisplayLine) -> bool {
        match self.footer.and_then(|i| self.lines.get_mut(i)) {
            Some(slot) => {
                *slot = line;
                true
            }
            None => false,
        }
    }

    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_footer() {
        let mut screen = Screen::new();
        screen.push(DisplayLine::plain("title"));
        assert!(!screen.replace_footer(DisplayLine::plain("x")));

        screen.push_footer(DisplayLine::plain("12:00"));
        screen.push(DisplayLine::plain("actions"));
        assert!(screen.replace_footer(DisplayLine::plain("PAUSED")));
        assert_eq!(screen.to_plain_text(), "title\nPAUSED\nactions");
    }
}
