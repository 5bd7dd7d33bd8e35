//! Skills list editor backing the form's skills field.

/// Ordered, duplicate-free list of free-text skills.
///
/// Mirrors the tag editor on the form: adding a duplicate or removing an
/// absent value is a no-op, and render order is insertion order.
#[derive(Debug, Default, Clone)]
pub struct SkillsList {
    skills: Vec<String>,
}

impl SkillsList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a skill. Blank input and duplicates are ignored.
    /// Returns whether the list changed.
    pub fn add(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Remove a skill by value; absent values are a no-op.
    /// Returns whether the list changed.
    pub fn remove(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill);
        self.skills.len() != before
    }

    pub fn clear(&mut self) {
        self.skills.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Insertion-ordered view, as rendered and as persisted.
    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.skills.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut skills = SkillsList::new();
        assert!(skills.add("negotiation"));
        assert!(skills.add("rust"));
        assert!(skills.add("public speaking"));
        assert_eq!(skills.as_slice(), ["negotiation", "rust", "public speaking"]);
    }

    #[test]
    fn test_duplicate_add_is_a_noop() {
        let mut skills = SkillsList::new();
        skills.add("rust");
        assert!(!skills.add("rust"));
        assert!(!skills.add("  rust  "));
        assert_eq!(skills.len(), 1);
    }

    #[test]
    fn test_blank_add_is_a_noop() {
        let mut skills = SkillsList::new();
        assert!(!skills.add("   "));
        assert!(skills.is_empty());
    }

    #[test]
    fn test_remove_absent_is_a_noop() {
        let mut skills = SkillsList::new();
        skills.add("rust");
        assert!(!skills.remove("go"));
        assert_eq!(skills.len(), 1);
        assert!(skills.remove("rust"));
        assert!(skills.is_empty());
    }
}
