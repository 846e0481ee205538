// src/editors/skills.rs
use super::remove_at;
use crate::form::FormStore;
use crate::types::FieldUpdate;

/// Step 3: a flat list of skill names.
#[derive(Debug, Default)]
pub struct SkillsStep {
    input: String,
}

impl SkillsStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Append the trimmed input. Blank input is ignored.
    pub fn add(&mut self, form: &FormStore) -> bool {
        let skill = self.input.trim();
        if skill.is_empty() {
            return false;
        }
        let mut skills = form.with(|p| p.skills.clone());
        skills.push(skill.to_string());
        form.update(FieldUpdate::Skills(skills));
        self.input.clear();
        true
    }

    pub fn remove(&mut self, form: &FormStore, index: usize) -> bool {
        match form.with(|p| remove_at(&p.skills, index)) {
            Some(skills) => {
                form.update(FieldUpdate::Skills(skills));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_clears_input() {
        let form = FormStore::default();
        let mut step = SkillsStep::new();

        step.set_input("  Rust ");
        assert!(step.add(&form));
        assert_eq!(step.input(), "");

        step.set_input("   ");
        assert!(!step.add(&form));

        assert_eq!(form.snapshot().skills, vec!["Rust"]);
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let form = FormStore::default();
        let mut step = SkillsStep::new();
        for _ in 0..2 {
            step.set_input("Rust");
            step.add(&form);
        }
        assert_eq!(form.snapshot().skills.len(), 2);
    }

    #[test]
    fn test_remove_keeps_earlier_entries() {
        let form = FormStore::default();
        let mut step = SkillsStep::new();
        for skill in ["Rust", "Go", "Zig"] {
            step.set_input(skill);
            step.add(&form);
        }

        assert!(step.remove(&form, 1));
        assert_eq!(form.snapshot().skills, vec!["Rust", "Zig"]);
    }
}
