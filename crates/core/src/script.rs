/// One entry of a loaded script.
///
/// The variant is decided once, when the record is decoded; renderers match
/// on it instead of re-inspecting optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLine {
    /// Spoken line. `speaker` is `None` when the record carried no name.
    Dialogue { speaker: Option<String>, text: String },
    /// Stage / technical direction (lights, props, blocking).
    Technical { text: String },
    /// Music cue.
    Music { text: String },
}

/// Discriminant of a [`ScriptLine`], for callers that only care about kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Dialogue,
    Technical,
    Music,
}

impl ScriptLine {
    pub fn dialogue(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        ScriptLine::Dialogue {
            speaker: Some(speaker.into()),
            text: text.into(),
        }
    }

    pub fn technical(text: impl Into<String>) -> Self {
        ScriptLine::Technical { text: text.into() }
    }

    pub fn music(text: impl Into<String>) -> Self {
        ScriptLine::Music { text: text.into() }
    }

    pub fn kind(&self) -> LineKind {
        match self {
            ScriptLine::Dialogue { .. } => LineKind::Dialogue,
            ScriptLine::Technical { .. } => LineKind::Technical,
            ScriptLine::Music { .. } => LineKind::Music,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ScriptLine::Dialogue { text, .. }
            | ScriptLine::Technical { text }
            | ScriptLine::Music { text } => text,
        }
    }

    /// Speaker label for display. Empty names count as absent.
    pub fn speaker(&self) -> Option<&str> {
        match self {
            ScriptLine::Dialogue { speaker, .. } => {
                speaker.as_deref().filter(|s| !s.is_empty())
            }
            _ => None,
        }
    }

    /// True for technical and music cues.
    pub fn is_annotation(&self) -> bool {
        !matches!(self, ScriptLine::Dialogue { .. })
    }
}

/// Ordered, immutable sequence of script lines.
///
/// There is no way to push or reorder lines after construction; a reload
/// builds a fresh `Script` and replaces the old one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    pub fn new(lines: Vec<ScriptLine>) -> Self {
        Self { lines }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScriptLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScriptLine> {
        self.lines.iter()
    }

    /// Sub-slice `[start, start + size)`, cut short at the end of the script.
    /// Out-of-range starts yield an empty slice.
    pub fn window(&self, start: usize, size: usize) -> &[ScriptLine] {
        let start = start.min(self.lines.len());
        let end = start.saturating_add(size).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Number of lines of each kind: (dialogue, technical, music).
    pub fn kind_counts(&self) -> (usize, usize, usize) {
        self.lines
            .iter()
            .fold((0, 0, 0), |(d, t, m), line| match line.kind() {
                LineKind::Dialogue => (d + 1, t, m),
                LineKind::Technical => (d, t + 1, m),
                LineKind::Music => (d, t, m + 1),
            })
    }
}

impl From<Vec<ScriptLine>> for Script {
    fn from(lines: Vec<ScriptLine>) -> Self {
        Self::new(lines)
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a ScriptLine;
    type IntoIter = std::slice::Iter<'a, ScriptLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Script {
        Script::new(vec![
            ScriptLine::dialogue("Anna", "Dzień dobry."),
            ScriptLine::technical("Lights fade."),
            ScriptLine::music("Theme A"),
        ])
    }

    #[test]
    fn window_clips_at_end() {
        let script = sample();
        assert_eq!(script.window(1, 5).len(), 2);
        assert_eq!(script.window(0, 2), &script.lines()[0..2]);
    }

    #[test]
    fn window_out_of_range_is_empty() {
        let script = sample();
        assert!(script.window(3, 5).is_empty());
        assert!(script.window(100, 5).is_empty());
        assert!(Script::empty().window(0, 5).is_empty());
    }

    #[test]
    fn window_does_not_overflow() {
        let script = sample();
        assert_eq!(script.window(1, usize::MAX).len(), 2);
    }

    #[test]
    fn empty_speaker_counts_as_absent() {
        let line = ScriptLine::Dialogue {
            speaker: Some(String::new()),
            text: "ok".into(),
        };
        assert_eq!(line.speaker(), None);
        assert_eq!(line.text(), "ok");
    }

    #[test]
    fn annotations_have_no_speaker() {
        assert_eq!(ScriptLine::technical("x").speaker(), None);
        assert!(ScriptLine::music("x").is_annotation());
        assert!(!ScriptLine::dialogue("A", "x").is_annotation());
    }

    #[test]
    fn kind_counts() {
        assert_eq!(sample().kind_counts(), (1, 1, 1));
        assert_eq!(Script::empty().kind_counts(), (0, 0, 0));
    }
}
