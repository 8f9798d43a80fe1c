use unicode_width::UnicodeWidthStr;

/// Single-line editor for the command box. The cursor is a byte offset that
/// always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Terminal columns between the start of the line and the cursor.
    pub fn caret_col(&self) -> u16 {
        UnicodeWidthStr::width(&self.text[..self.cursor]) as u16
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        while self.cursor > 0 && !self.text.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    pub fn right(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        self.cursor += 1;
        while self.cursor < self.text.len() && !self.text.is_char_boundary(self.cursor) {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn insert(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let end = self.cursor;
        self.left();
        self.text.drain(self.cursor..end);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        let start = self.cursor;
        self.right();
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputLine {
        let mut line = InputLine::default();
        s.chars().for_each(|c| line.insert(c));
        line
    }

    #[test]
    fn editing_arabic_text_stays_on_char_boundaries() {
        let mut line = typed("فرع جدة");
        line.left();
        line.left();
        line.backspace();
        assert_eq!(line.as_str(), "فرع دة");
        line.delete();
        assert_eq!(line.as_str(), "فرع ة");
        line.home();
        line.delete();
        assert_eq!(line.as_str(), "رع ة");
        line.end();
        line.right();
        assert_eq!(line.caret_col(), 4);
    }

    #[test]
    fn caret_column_counts_display_width() {
        let mut line = typed("ab漢字");
        assert_eq!(line.caret_col(), 6);
        line.left();
        assert_eq!(line.caret_col(), 4);
        line.home();
        assert_eq!(line.caret_col(), 0);
    }

    #[test]
    fn take_resets_the_cursor() {
        let mut line = typed("/help");
        assert_eq!(line.take(), "/help");
        assert_eq!(line.as_str(), "");
        assert_eq!(line.caret_col(), 0);
        line.backspace();
        line.delete();
        assert_eq!(line.as_str(), "");
    }
}
