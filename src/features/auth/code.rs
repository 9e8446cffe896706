//! Six-digit approval code entry model. The route renders one input per slot;
//! this model owns the slot contents and tells the view where focus goes and
//! when the code is ready to submit.

pub const CODE_LEN: usize = 6;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CodeEntry {
    slots: [String; CODE_LEN],
}

/// What the view should do after a slot edit.
#[derive(Clone, Debug, PartialEq)]
pub enum CodeAction {
    None,
    /// Move focus to this slot.
    Focus(usize),
    /// All six slots are filled; submit this code (after the debounce).
    Submit(String),
}

impl CodeEntry {
    pub fn slot(&self, index: usize) -> &str {
        &self.slots[index]
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| !slot.is_empty())
    }

    pub fn code(&self) -> String {
        self.slots.concat()
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
    }

    /// Applies raw input to a slot. Multi-character input keeps only the first
    /// character; non-digits leave the slot unchanged. Filling a slot advances
    /// focus; filling the last slot with the rest complete requests a submit.
    pub fn set_slot(&mut self, index: usize, input: &str) -> CodeAction {
        let Some(first) = input.chars().next() else {
            self.slots[index].clear();
            return CodeAction::None;
        };
        if !first.is_ascii_digit() {
            return CodeAction::None;
        }

        self.slots[index] = first.to_string();
        if index + 1 < CODE_LEN {
            CodeAction::Focus(index + 1)
        } else if self.is_complete() {
            CodeAction::Submit(self.code())
        } else {
            CodeAction::None
        }
    }

    /// Backspace on an empty slot moves focus to the previous one; on a
    /// filled slot the input's own deletion applies first.
    pub fn backspace_target(&self, index: usize) -> Option<usize> {
        if self.slots[index].is_empty() && index > 0 {
            Some(index - 1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_six_digits_advances_then_submits_once() {
        let mut entry = CodeEntry::default();
        let mut submits = Vec::new();

        for (index, digit) in ["1", "2", "3", "4", "5", "6"].iter().enumerate() {
            match entry.set_slot(index, digit) {
                CodeAction::Focus(next) => assert_eq!(next, index + 1),
                CodeAction::Submit(code) => submits.push(code),
                CodeAction::None => panic!("unexpected no-op at slot {index}"),
            }
        }

        assert!(entry.is_complete());
        assert_eq!(submits, vec!["123456".to_string()]);
    }

    #[test]
    fn non_digits_are_rejected_without_clearing() {
        let mut entry = CodeEntry::default();
        entry.set_slot(0, "7");
        assert_eq!(entry.set_slot(0, "x"), CodeAction::None);
        assert_eq!(entry.slot(0), "7");
    }

    #[test]
    fn pasted_input_keeps_the_first_character() {
        let mut entry = CodeEntry::default();
        assert_eq!(entry.set_slot(0, "42"), CodeAction::Focus(1));
        assert_eq!(entry.slot(0), "4");
    }

    #[test]
    fn last_slot_without_the_others_does_not_submit() {
        let mut entry = CodeEntry::default();
        assert_eq!(entry.set_slot(5, "9"), CodeAction::None);
        assert!(!entry.is_complete());
    }

    #[test]
    fn empty_input_clears_the_slot() {
        let mut entry = CodeEntry::default();
        entry.set_slot(2, "3");
        assert_eq!(entry.set_slot(2, ""), CodeAction::None);
        assert_eq!(entry.slot(2), "");
    }

    #[test]
    fn backspace_moves_focus_only_from_an_empty_slot() {
        let mut entry = CodeEntry::default();
        entry.set_slot(0, "1");
        assert_eq!(entry.backspace_target(1), Some(0));
        assert_eq!(entry.backspace_target(0), None);
        entry.set_slot(1, "2");
        assert_eq!(entry.backspace_target(1), None);
    }

    #[test]
    fn clear_resets_every_slot() {
        let mut entry = CodeEntry::default();
        for index in 0..CODE_LEN {
            entry.set_slot(index, "5");
        }
        entry.clear();
        assert_eq!(entry, CodeEntry::default());
    }
}
