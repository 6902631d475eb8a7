use tracing::info;

/// Append-only destination for user-facing status lines.
pub trait LogSink {
    fn append(&mut self, line: &str);
}

/// Newline-delimited in-memory log. Every line is mirrored to `tracing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLog {
    text: String,
}

impl TextLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    #[must_use]
    pub fn last_line(&self) -> Option<&str> {
        self.text.lines().next_back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.lines().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl LogSink for TextLog {
    fn append(&mut self, line: &str) {
        info!(target: "candle_canvas::demo", "{line}");
        self.text.push_str(line);
        self.text.push('\n');
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn append(&mut self, line: &str) {
        (**self).append(line);
    }
}
