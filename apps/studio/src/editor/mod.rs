//! Form editors: one draft buffer plus an editing flag per list entity.
//!
//! The list operations are pure functions (`upsert`, `remove`); `Editor<T>`
//! only owns the draft and the mode. The session holds one editor per entity
//! type and applies them to the document's lists.

pub mod handlers;

use uuid::Uuid;

use crate::models::resume::{DateRanged, Entry};

/// Editor state for a single entity type.
#[derive(Debug, Clone)]
pub struct Editor<T> {
    draft: T,
    editing: bool,
}

impl<T: Entry> Default for Editor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entry> Editor<T> {
    pub fn new() -> Self {
        Self {
            draft: T::default(),
            editing: false,
        }
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Replaces the draft's fields. Identity stays owned by the editor.
    pub fn set_draft(&mut self, mut draft: T) {
        draft.set_id(self.draft.id());
        self.draft = draft;
    }

    /// Loads an existing record into the draft and enters editing mode.
    pub fn edit(&mut self, existing: &T) {
        self.draft = existing.clone();
        self.editing = true;
    }

    /// Looks up `id` in `list` and starts editing it. Returns false when absent.
    pub fn edit_by_id(&mut self, list: &[T], id: Uuid) -> bool {
        match list.iter().find(|item| item.id() == id) {
            Some(item) => {
                self.edit(item);
                true
            }
            None => false,
        }
    }

    /// Commits the draft into `list`, then resets the draft and leaves editing mode.
    pub fn save(&mut self, list: &mut Vec<T>) -> Uuid {
        let draft = std::mem::take(&mut self.draft);
        let (next, id) = upsert(list, draft, self.editing);
        *list = next;
        self.editing = false;
        id
    }

    pub fn cancel(&mut self) {
        self.draft = T::default();
        self.editing = false;
    }
}

impl<T: Entry + DateRanged> Editor<T> {
    /// Setting `current` clears the end date; clearing it does not restore one.
    pub fn set_current(&mut self, current: bool) {
        self.draft.set_current(current);
        if current {
            self.draft.end_date_mut().clear();
        }
    }
}

/// Returns the list with `draft` applied and the identity it was stored under.
///
/// In editing mode the element with the draft's identity is replaced in place.
/// Otherwise, or when that identity is gone, the draft is appended under a
/// fresh identity that does not collide with any live one.
pub fn upsert<T: Entry>(list: &[T], mut draft: T, editing: bool) -> (Vec<T>, Uuid) {
    let target = draft.id();
    if editing && !target.is_nil() {
        if let Some(pos) = list.iter().position(|item| item.id() == target) {
            let mut next = list.to_vec();
            next[pos] = draft;
            return (next, target);
        }
    }

    let id = fresh_id(list);
    draft.set_id(id);
    let mut next = list.to_vec();
    next.push(draft);
    (next, id)
}

/// Removes the element with `id`, if present.
pub fn remove<T: Entry>(list: &mut Vec<T>, id: Uuid) -> Option<T> {
    let pos = list.iter().position(|item| item.id() == id)?;
    Some(list.remove(pos))
}

fn fresh_id<T: Entry>(list: &[T]) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if list.iter().all(|item| item.id() != id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Experience, Project, Skill};

    fn skill(name: &str) -> Skill {
        Skill {
            id: Uuid::nil(),
            name: name.to_string(),
        }
    }

    fn seeded_skills(names: &[&str]) -> Vec<Skill> {
        let mut editor = Editor::<Skill>::new();
        let mut list = Vec::new();
        for name in names {
            editor.set_draft(skill(name));
            editor.save(&mut list);
        }
        list
    }

    #[test]
    fn test_save_without_edit_appends_fresh_identity() {
        let mut list = seeded_skills(&["Rust", "Go"]);
        let existing: Vec<Uuid> = list.iter().map(|s| s.id).collect();

        let mut editor = Editor::<Skill>::new();
        editor.set_draft(skill("SQL"));
        let id = editor.save(&mut list);

        assert_eq!(list.len(), 3);
        assert_eq!(list[2].name, "SQL");
        assert_eq!(list[2].id, id);
        assert!(!id.is_nil());
        assert!(!existing.contains(&id));
    }

    #[test]
    fn test_save_after_edit_replaces_in_place() {
        let mut list = seeded_skills(&["Rust", "Go", "SQL"]);
        let before: Vec<Uuid> = list.iter().map(|s| s.id).collect();

        let mut editor = Editor::<Skill>::new();
        editor.edit(&list[1].clone());
        assert!(editor.is_editing());
        editor.set_draft(skill("Golang"));
        let id = editor.save(&mut list);

        assert_eq!(id, before[1]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().map(|s| s.id).collect::<Vec<_>>(), before);
        assert_eq!(list[0].name, "Rust");
        assert_eq!(list[1].name, "Golang");
        assert_eq!(list[2].name, "SQL");
    }

    #[test]
    fn test_save_resets_draft_and_mode() {
        let mut list = seeded_skills(&["Rust"]);
        let mut editor = Editor::<Skill>::new();
        editor.edit(&list[0].clone());
        editor.save(&mut list);

        assert!(!editor.is_editing());
        assert_eq!(editor.draft(), &Skill::default());
    }

    #[test]
    fn test_save_of_deleted_target_does_not_reuse_identity() {
        let mut list = seeded_skills(&["Rust", "Go"]);
        let mut editor = Editor::<Skill>::new();
        let deleted = list[0].id;
        editor.edit(&list[0].clone());
        remove(&mut list, deleted);

        let id = editor.save(&mut list);
        assert_ne!(id, deleted);
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].id, id);
    }

    #[test]
    fn test_set_draft_keeps_identity_under_edit() {
        let list = seeded_skills(&["Rust"]);
        let mut editor = Editor::<Skill>::new();
        editor.edit(&list[0]);

        let mut incoming = skill("Rust 2024");
        incoming.id = Uuid::new_v4();
        editor.set_draft(incoming);
        assert_eq!(editor.draft().id, list[0].id);
    }

    #[test]
    fn test_edit_by_id_missing_leaves_state_alone() {
        let list = seeded_skills(&["Rust"]);
        let mut editor = Editor::<Skill>::new();
        assert!(!editor.edit_by_id(&list, Uuid::new_v4()));
        assert!(!editor.is_editing());
        assert!(editor.edit_by_id(&list, list[0].id));
        assert_eq!(editor.draft().name, "Rust");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut list = seeded_skills(&["Rust", "Go", "SQL"]);
        let target = list[1].id;

        assert!(remove(&mut list, target).is_some());
        assert_eq!(list.len(), 2);
        assert!(remove(&mut list, target).is_none());
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "Rust");
        assert_eq!(list[1].name, "SQL");
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut list = seeded_skills(&["Rust"]);
        assert!(remove(&mut list, Uuid::new_v4()).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_duplicate_skill_names_are_kept() {
        let list = seeded_skills(&["Rust", "Rust"]);
        assert_eq!(list.len(), 2);
        assert_ne!(list[0].id, list[1].id);
    }

    #[test]
    fn test_current_toggle_clears_end_date_and_does_not_restore_it() {
        let mut editor = Editor::<Experience>::new();
        editor.set_draft(Experience {
            start_date: "2020-01".to_string(),
            end_date: "2022-06".to_string(),
            ..Default::default()
        });

        editor.set_current(true);
        assert!(editor.draft().current);
        assert!(editor.draft().end_date.is_empty());

        editor.set_current(false);
        assert!(!editor.draft().current);
        assert!(editor.draft().end_date.is_empty());
    }

    #[test]
    fn test_project_current_toggle() {
        let mut editor = Editor::<Project>::new();
        editor.set_draft(Project {
            end_date: "2023-01".to_string(),
            ..Default::default()
        });
        editor.set_current(true);
        assert!(editor.draft().end_date.is_empty());
    }

    #[test]
    fn test_upsert_is_pure() {
        let list = vec![Education {
            id: Uuid::new_v4(),
            institution: "MIT".to_string(),
            ..Default::default()
        }];
        let (next, _) = upsert(&list, Education::default(), false);
        assert_eq!(list.len(), 1);
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut editor = Editor::<Skill>::new();
        editor.set_draft(skill("Rust"));
        editor.cancel();
        assert_eq!(editor.draft(), &Skill::default());
        assert!(!editor.is_editing());
    }
}
