use std::time::Instant;

use crate::project::{Project, ProjectFile};
use crate::session::{Event, Key, Phase, TypingSession};
use crate::source::Chunk;
use crate::stats::Statistics;
use crate::typing_policy::TypingPolicy;

/// Emitted by [`Practice::type_key`] when a keystroke finishes a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkCompleted {
    pub file: usize,
    pub chunk: usize,
    pub chunk_id: String,
    pub statistics: Statistics,
    /// This chunk was the last unfinished one in its file.
    pub file_completed: bool,
    pub has_next: bool,
}

/// Which file and chunk the user is on, plus the one live typing session.
///
/// Every selection change replaces the session wholesale.
#[derive(Debug)]
pub struct Practice {
    project: Project,
    file: Option<usize>,
    chunk: usize,
    session: TypingSession,
    auto_advance: bool,
}

impl Practice {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            file: None,
            chunk: 0,
            session: TypingSession::new(""),
            auto_advance: false,
        }
    }

    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn session(&self) -> &TypingSession {
        &self.session
    }

    pub fn selected_file_index(&self) -> Option<usize> {
        self.file
    }

    pub fn selected_file(&self) -> Option<&ProjectFile> {
        self.file.and_then(|i| self.project.file(i))
    }

    pub fn chunk_index(&self) -> usize {
        self.chunk
    }

    pub fn current_chunk(&self) -> Option<&Chunk> {
        self.selected_file().and_then(|f| f.chunks.get(self.chunk))
    }

    pub fn chunk_count(&self) -> usize {
        self.selected_file().map_or(0, |f| f.chunks.len())
    }

    pub fn has_next_chunk(&self) -> bool {
        self.chunk + 1 < self.chunk_count()
    }

    pub fn has_prev_chunk(&self) -> bool {
        self.chunk > 0
    }

    /// Open a file at its first chunk. Returns false for an unknown index.
    pub fn select_file(&mut self, index: usize) -> bool {
        if self.project.file(index).is_none() {
            return false;
        }
        self.file = Some(index);
        self.load_chunk(0);
        log::debug!("selected file {index}");
        true
    }

    pub fn close_file(&mut self) {
        self.file = None;
        self.chunk = 0;
        self.session = TypingSession::new("");
    }

    pub fn select_chunk(&mut self, index: usize) -> bool {
        if index >= self.chunk_count() {
            return false;
        }
        self.load_chunk(index);
        true
    }

    pub fn next_chunk(&mut self) -> bool {
        self.has_next_chunk() && self.select_chunk(self.chunk + 1)
    }

    pub fn prev_chunk(&mut self) -> bool {
        self.has_prev_chunk() && self.select_chunk(self.chunk - 1)
    }

    /// Start the current chunk over.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn statistics(&self) -> Statistics {
        self.session.statistics()
    }

    pub fn type_key(&mut self, key: Key, policy: TypingPolicy) -> Option<ChunkCompleted> {
        self.type_key_at(key, policy, Instant::now())
    }

    /// Feed one keystroke. The first keystroke starts the clock; once a
    /// chunk is done, further keys are ignored unless auto-advance moves on
    /// to the next chunk.
    pub fn type_key_at(
        &mut self,
        key: Key,
        policy: TypingPolicy,
        at: Instant,
    ) -> Option<ChunkCompleted> {
        let file_index = self.file?;

        match self.session.phase() {
            Phase::Completed => {
                if self.auto_advance {
                    self.next_chunk();
                }
                return None;
            }
            Phase::NotStarted => {
                self.session.apply(Event::Begin { at });
            }
            Phase::Active => {}
        }

        if !self.session.apply(Event::Key { key, at, policy }) {
            return None;
        }

        let statistics = self.session.statistics_at(at);
        let chunk_index = self.chunk;
        let has_next = self.has_next_chunk();
        let file = self.project.file_mut(file_index)?;
        let chunk_id = file.chunks.get(chunk_index)?.id.clone();
        let file_completed = file.mark_chunk_completed(&chunk_id);

        log::info!(
            "completed {} {} at {} wpm, {}% accuracy",
            file.display_path(),
            chunk_id,
            statistics.wpm,
            statistics.accuracy
        );

        Some(ChunkCompleted {
            file: file_index,
            chunk: chunk_index,
            chunk_id,
            statistics,
            file_completed,
            has_next,
        })
    }

    fn load_chunk(&mut self, index: usize) {
        self.chunk = index;
        let content = self.current_chunk().map(|c| c.content.as_str()).unwrap_or("");
        let session = TypingSession::new(content);
        self.session = session;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageId;
    use assert_matches::assert_matches;

    const LENIENT: TypingPolicy = TypingPolicy {
        stop_on_error: false,
    };

    fn project() -> Project {
        let long: String = (0..90).map(|i| format!("v{i} = {i};\n")).collect();
        Project::from_files(
            "demo",
            vec![
                ProjectFile::new("b.txt", LanguageId::PlainText, &long),
                ProjectFile::new("a.txt", LanguageId::PlainText, "hi"),
            ],
        )
    }

    fn type_str(practice: &mut Practice, text: &str, at: Instant) -> Option<ChunkCompleted> {
        let mut last = None;
        for c in text.chars() {
            let key = if c == '\n' { Key::Enter } else { Key::Char(c) };
            last = practice.type_key_at(key, LENIENT, at);
        }
        last
    }

    #[test]
    fn nothing_selected_ignores_keys() {
        let mut practice = Practice::new(project());
        assert!(practice.type_key(Key::Char('h'), LENIENT).is_none());
        assert!(practice.current_chunk().is_none());
        assert_eq!(practice.chunk_count(), 0);
    }

    #[test]
    fn selecting_file_opens_first_chunk() {
        let mut practice = Practice::new(project());
        assert!(practice.select_file(1));
        assert_eq!(practice.selected_file().unwrap().name(), "b.txt");
        assert_eq!(practice.chunk_index(), 0);
        assert_eq!(practice.chunk_count(), 3);
        assert!(!practice.select_file(7));
    }

    #[test]
    fn navigation_stays_in_bounds_and_resets_session() {
        let mut practice = Practice::new(project());
        practice.select_file(1);
        let t0 = Instant::now();
        type_str(&mut practice, "v0", t0);
        assert_eq!(practice.session().state().cursor, 2);

        assert!(!practice.prev_chunk());
        assert!(practice.next_chunk());
        assert_eq!(practice.chunk_index(), 1);
        assert_eq!(practice.session().phase(), Phase::NotStarted);

        assert!(practice.next_chunk());
        assert!(!practice.next_chunk());
        assert_eq!(practice.chunk_index(), 2);
        assert!(practice.prev_chunk());
        assert!(!practice.select_chunk(3));
        assert!(practice.select_chunk(0));
    }

    #[test]
    fn first_key_starts_the_clock() {
        let mut practice = Practice::new(project());
        practice.select_file(0);
        let t0 = Instant::now();
        practice.type_key_at(Key::Char('h'), LENIENT, t0);
        assert_eq!(practice.session().state().started_at, Some(t0));
        assert_eq!(practice.session().state().cursor, 1);
    }

    #[test]
    fn finishing_a_chunk_marks_it_complete() {
        let mut practice = Practice::new(project());
        practice.select_file(0);
        let done = type_str(&mut practice, "hi", Instant::now());

        let done = done.unwrap();
        assert_eq!(done.chunk_id, "chunk-0");
        assert!(done.file_completed);
        assert!(!done.has_next);
        assert_eq!(done.statistics.accuracy, 100);
        assert!(practice.project().files()[0].is_completed());
        assert_eq!(practice.project().completed_files(), 1);
    }

    #[test]
    fn completed_chunk_ignores_keys_without_auto_advance() {
        let mut practice = Practice::new(project());
        practice.select_file(1);
        let first = practice.current_chunk().unwrap().content.clone();
        assert_matches!(
            type_str(&mut practice, &first, Instant::now()),
            Some(ChunkCompleted {
                has_next: true,
                file_completed: false,
                ..
            })
        );

        assert!(practice.type_key(Key::Char('x'), LENIENT).is_none());
        assert_eq!(practice.chunk_index(), 0);
    }

    #[test]
    fn auto_advance_moves_on_after_completion() {
        let mut practice = Practice::new(project()).with_auto_advance(true);
        practice.select_file(1);
        let first = practice.current_chunk().unwrap().content.clone();
        type_str(&mut practice, &first, Instant::now());

        assert!(practice.type_key(Key::Char('x'), LENIENT).is_none());
        assert_eq!(practice.chunk_index(), 1);
        assert_eq!(practice.session().phase(), Phase::NotStarted);
        assert!(practice.project().files()[1].is_chunk_completed("chunk-0"));
    }

    #[test]
    fn reset_keeps_chunk_but_clears_session() {
        let mut practice = Practice::new(project());
        practice.select_file(1);
        practice.next_chunk();
        type_str(&mut practice, "v4", Instant::now());
        practice.reset();
        assert_eq!(practice.chunk_index(), 1);
        assert_eq!(practice.session().state().cursor, 0);
    }

    #[test]
    fn close_file_returns_to_no_selection() {
        let mut practice = Practice::new(project());
        practice.select_file(0);
        practice.close_file();
        assert!(practice.selected_file().is_none());
        assert!(practice.type_key(Key::Char('h'), LENIENT).is_none());
    }
}
