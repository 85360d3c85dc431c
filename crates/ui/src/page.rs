use std::fmt;
use std::str::FromStr;

/// The study page shown for the lifetime of the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Review,
    Flashcards,
    Words,
    Sentences,
    Lesson,
    Progress,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Review,
        Page::Flashcards,
        Page::Words,
        Page::Sentences,
        Page::Lesson,
        Page::Progress,
    ];

    /// Name accepted on the command line.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Page::Review => "review",
            Page::Flashcards => "flashcards",
            Page::Words => "words",
            Page::Sentences => "sentences",
            Page::Lesson => "lesson",
            Page::Progress => "progress",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Page::Review => "Spaced Review",
            Page::Flashcards => "Flashcards",
            Page::Words => "Word Builder",
            Page::Sentences => "Sentence Builder",
            Page::Lesson => "Lesson",
            Page::Progress => "My Progress",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl fmt::Display for UnknownPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known = Page::ALL.map(Page::slug).join("|");
        write!(f, "unknown page '{}' (expected {known})", self.0)
    }
}

impl std::error::Error for UnknownPage {}

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Page::ALL
            .into_iter()
            .find(|page| page.slug() == wanted)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}
