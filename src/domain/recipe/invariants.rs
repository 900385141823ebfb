use super::entity::Recipe;
use crate::domain::{DomainError, DomainResult};

/// Validates all Recipe invariants
pub fn validate_recipe(recipe: &Recipe) -> DomainResult<()> {
    if recipe.id.is_nil() {
        return Err(DomainError::InvariantViolation(
            "Recipe id cannot be nil".to_string(),
        ));
    }
    if recipe.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Recipe name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_valid_recipe() {
        let recipe = Recipe::new("Cacio e Pepe".to_string(), "Pasta, Pepper".to_string(), String::new());
        assert!(validate_recipe(&recipe).is_ok());
    }

    #[test]
    fn test_blank_name_fails() {
        let recipe = Recipe::new("   ".to_string(), "Pasta".to_string(), String::new());
        assert!(matches!(
            validate_recipe(&recipe),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_nil_id_fails() {
        let recipe = Recipe::with_id(Uuid::nil(), "Pasta".to_string(), String::new(), String::new());
        assert!(validate_recipe(&recipe).is_err());
    }
}
