use anyhow::Result;

use super::question::{Question, QuestionKind};

/// Where imported questions end up. The importer never touches it; callers
/// decide what to persist.
pub trait QuestionStore {
    fn insert(&mut self, question: Question) -> Result<()>;
    fn select(&self, kind: Option<QuestionKind>) -> Result<Vec<Question>>;
    /// Removes every question with `id`, or everything when `id` is `None`.
    /// Returns how many were removed.
    fn delete(&mut self, id: Option<&str>) -> Result<usize>;
}

/// Replaces the store contents with a fresh import. Returns the number of
/// questions inserted.
pub fn replace_all<S: QuestionStore + ?Sized>(store: &mut S, questions: Vec<Question>) -> Result<usize> {
    store.delete(None)?;
    let mut inserted = 0;
    for question in questions {
        store.insert(question)?;
        inserted += 1;
    }
    Ok(inserted)
}

/// Keeps questions in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    questions: Vec<Question>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionStore for MemoryStore {
    fn insert(&mut self, question: Question) -> Result<()> {
        self.questions.push(question);
        Ok(())
    }

    fn select(&self, kind: Option<QuestionKind>) -> Result<Vec<Question>> {
        Ok(self
            .questions
            .iter()
            .filter(|q| kind.is_none_or(|k| q.kind() == k))
            .cloned()
            .collect())
    }

    fn delete(&mut self, id: Option<&str>) -> Result<usize> {
        let before = self.questions.len();
        match id {
            Some(id) => self.questions.retain(|q| q.id != id),
            None => self.questions.clear(),
        }
        Ok(before - self.questions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::importer::parse_csv;

    fn sample() -> Vec<Question> {
        parse_csv(
            "ID;Type;Question;Choix;Reponse\n\
             1;QCM;Q1;A|B;A\n\
             2;VF;Q2;;Vrai\n\
             2;VF;Q2 bis;;Faux\n",
        )
        .unwrap()
        .questions
    }

    #[test]
    fn test_replace_all() -> Result<()> {
        let mut store = MemoryStore::new();
        assert_eq!(replace_all(&mut store, sample())?, 3);
        assert_eq!(replace_all(&mut store, sample())?, 3);
        assert_eq!(store.len(), 3);
        Ok(())
    }

    #[test]
    fn test_select_by_kind() -> Result<()> {
        let mut store = MemoryStore::new();
        replace_all(&mut store, sample())?;
        assert_eq!(store.select(None)?.len(), 3);
        assert_eq!(store.select(Some(QuestionKind::TrueFalse))?.len(), 2);
        assert!(store.select(Some(QuestionKind::Match))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_delete_duplicate_ids() -> Result<()> {
        let mut store = MemoryStore::new();
        replace_all(&mut store, sample())?;
        assert_eq!(store.delete(Some("2"))?, 2);
        assert_eq!(store.delete(Some("2"))?, 0);
        assert_eq!(store.select(None)?[0].id, "1");
        Ok(())
    }
}
