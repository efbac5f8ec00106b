use crate::error::{CodeshelfError, Result};
use crate::integrity::has_valid_category;
use crate::model::{
    Category, CodeSnippet, SnippetDraft, SnippetLanguage, SnippetPatch, FALLBACK_CATEGORY,
};

/// Fail with a validation error when `value` is blank.
pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CodeshelfError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Canonical spelling of a known language ("html" -> "HTML").
pub fn canonical_language(language: &str) -> Result<String> {
    let parsed: SnippetLanguage = language.parse()?;
    Ok(parsed.as_str().to_string())
}

/// Category for a new snippet when none was picked: the first category, or
/// the fallback when there are none.
pub fn default_category_name(categories: &[Category]) -> String {
    categories
        .first()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string())
}

fn require_known_category(categories: &[Category], category: &str) -> Result<()> {
    let probe = CodeSnippet {
        category: category.to_string(),
        ..Default::default()
    };
    if has_valid_category(categories, &probe) {
        Ok(())
    } else {
        Err(CodeshelfError::Validation(format!(
            "Unknown category '{}'",
            category
        )))
    }
}

/// Check a new snippet the way the snippet form does: title, description,
/// code and language are required, the language must be known and the
/// category must exist. An empty category picks the default.
pub fn validate_draft(mut draft: SnippetDraft, categories: &[Category]) -> Result<SnippetDraft> {
    require_text("Title", &draft.title)?;
    require_text("Description", &draft.description)?;
    require_text("Code", &draft.code)?;
    require_text("Language", &draft.language)?;
    draft.language = canonical_language(&draft.language)?;

    if draft.category.trim().is_empty() {
        draft.category = default_category_name(categories);
    } else {
        require_known_category(categories, &draft.category)?;
    }
    Ok(draft)
}

/// Same rules as [`validate_draft`], applied to the fields a patch sets.
pub fn validate_patch(mut patch: SnippetPatch, categories: &[Category]) -> Result<SnippetPatch> {
    if let Some(title) = &patch.title {
        require_text("Title", title)?;
    }
    if let Some(description) = &patch.description {
        require_text("Description", description)?;
    }
    if let Some(code) = &patch.code {
        require_text("Code", code)?;
    }
    if let Some(language) = &patch.language {
        patch.language = Some(canonical_language(language)?);
    }
    if let Some(category) = &patch.category {
        require_known_category(categories, category)?;
    }
    Ok(patch)
}

/// Trim `name` and make sure it is non-empty and not already used by another
/// category (case-insensitively). `own_id` is skipped, for renames.
pub fn validate_category_name(
    name: &str,
    categories: &[Category],
    own_id: Option<&str>,
) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CodeshelfError::Validation(
            "Category name is required".to_string(),
        ));
    }
    let lowered = trimmed.to_lowercase();
    let clash = categories
        .iter()
        .filter(|c| Some(c.id.as_str()) != own_id)
        .any(|c| c.name.to_lowercase() == lowered);
    if clash {
        return Err(CodeshelfError::DuplicateCategory(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_categories, CategoryIcon};

    fn draft() -> SnippetDraft {
        SnippetDraft {
            title: "Card".into(),
            description: "A card".into(),
            code: ".card {}".into(),
            language: "css".into(),
            cover_image: String::new(),
            category: String::new(),
        }
    }

    #[test]
    fn test_validate_draft_normalizes_language_and_category() {
        let validated = validate_draft(draft(), &default_categories()).unwrap();
        assert_eq!(validated.language, "CSS");
        assert_eq!(validated.category, "General");
    }

    #[test]
    fn test_validate_draft_requires_fields() {
        for field in ["title", "description", "code", "language"] {
            let mut d = draft();
            match field {
                "title" => d.title = "  ".into(),
                "description" => d.description = String::new(),
                "code" => d.code = "\n".into(),
                _ => d.language = String::new(),
            }
            let err = validate_draft(d, &default_categories()).unwrap_err();
            assert!(matches!(err, CodeshelfError::Validation(_)), "{}", field);
        }
    }

    #[test]
    fn test_validate_draft_rejects_unknown_category_and_language() {
        let mut d = draft();
        d.category = "Nope".into();
        assert!(validate_draft(d, &default_categories()).is_err());

        let mut d = draft();
        d.language = "Rust".into();
        assert!(validate_draft(d, &default_categories()).is_err());
    }

    #[test]
    fn test_fallback_category_always_accepted() {
        let mut d = draft();
        d.category = "General".into();
        let validated = validate_draft(d, &[]).unwrap();
        assert_eq!(validated.category, "General");
    }

    #[test]
    fn test_default_category_name() {
        assert_eq!(default_category_name(&[]), "General");
        let cats = vec![Category::new("9", "Forms", CategoryIcon::Folder)];
        assert_eq!(default_category_name(&cats), "Forms");
    }

    #[test]
    fn test_validate_patch() {
        let cats = default_categories();
        let patch = SnippetPatch {
            language: Some("html".into()),
            ..Default::default()
        };
        assert_eq!(
            validate_patch(patch, &cats).unwrap().language.as_deref(),
            Some("HTML")
        );

        let blank_title = SnippetPatch {
            title: Some(" ".into()),
            ..Default::default()
        };
        assert!(validate_patch(blank_title, &cats).is_err());
    }

    #[test]
    fn test_category_name_uniqueness_is_case_insensitive() {
        let cats = default_categories();
        let err = validate_category_name("general", &cats, None).unwrap_err();
        assert!(matches!(err, CodeshelfError::DuplicateCategory(_)));
        assert_eq!(validate_category_name("  Forms ", &cats, None).unwrap(), "Forms");
        assert!(validate_category_name("", &cats, None).is_err());
    }

    #[test]
    fn test_category_rename_to_own_name_allowed() {
        let cats = default_categories();
        assert_eq!(
            validate_category_name("CHECKOUT", &cats, Some("3")).unwrap(),
            "CHECKOUT"
        );
        assert!(validate_category_name("Checkout", &cats, Some("1")).is_err());
    }
}
