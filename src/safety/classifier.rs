use super::config::DenylistConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Safe,
    Unsafe,
}

impl Verdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe)
    }
}

/// Classify an element by its display text, accessibility label, and
/// identifier string (all possibly empty).
///
/// Deterministic and side-effect-free. An element is safe only if the
/// combined text+label passes the category denylist AND the identifier
/// passes the infrastructural denylist; identifiers are checked even when
/// the text is empty, since icon-only controls carry no visible text.
pub fn classify(text: &str, label: &str, identifier: &str, denylist: &DenylistConfig) -> Verdict {
    let combined = format!("{} {}", text, label).to_lowercase();
    let combined = combined.trim();

    for term in denylist.text_terms() {
        if combined.contains(term) {
            return Verdict::Unsafe;
        }
    }

    let identifier = identifier.to_lowercase();
    for term in &denylist.identifier_terms {
        if identifier.contains(term.as_str()) {
            return Verdict::Unsafe;
        }
    }

    Verdict::Safe
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(text: &str, label: &str, id: &str) -> Verdict {
        classify(text, label, id, &DenylistConfig::default())
    }

    #[test]
    fn benign_elements_are_safe() {
        assert_eq!(verdict("", "", ""), Verdict::Safe);
        assert_eq!(verdict("Next photo", "", ""), Verdict::Safe);
        assert_eq!(verdict("", "Scroll down", "item_row_3"), Verdict::Safe);
        assert_eq!(verdict("새 소식", "", "feed_card"), Verdict::Safe);
    }

    #[test]
    fn denylist_terms_are_unsafe_in_any_case() {
        assert_eq!(verdict("Logout", "", ""), Verdict::Unsafe);
        assert_eq!(verdict("SIGN OUT", "", ""), Verdict::Unsafe);
        assert_eq!(verdict("Delete item", "", ""), Verdict::Unsafe);
        assert_eq!(verdict("", "Uninstall this app", ""), Verdict::Unsafe);
        assert_eq!(verdict("로그아웃", "", ""), Verdict::Unsafe);
        assert_eq!(verdict("회원 탈퇴", "", ""), Verdict::Unsafe);
    }

    #[test]
    fn both_dialog_polarities_are_blocked() {
        assert_eq!(verdict("Confirm", "", ""), Verdict::Unsafe);
        assert_eq!(verdict("Cancel", "", ""), Verdict::Unsafe);
        assert_eq!(verdict("Yes", "", ""), Verdict::Unsafe);
        assert_eq!(verdict("취소", "", ""), Verdict::Unsafe);
    }

    #[test]
    fn committing_verbs_are_blocked() {
        for word in ["Save", "Apply", "Edit", "Change", "Done", "Finish"] {
            assert_eq!(verdict(word, "", ""), Verdict::Unsafe, "word: {word}");
        }
    }

    #[test]
    fn label_alone_can_reject() {
        assert_eq!(verdict("", "Open settings", ""), Verdict::Unsafe);
    }

    #[test]
    fn identifier_rejects_regardless_of_text() {
        assert_eq!(verdict("", "", "btn_logout"), Verdict::Unsafe);
        assert_eq!(verdict("Share", "", "row_delete_icon"), Verdict::Unsafe);
        assert_eq!(verdict("", "", "Account_Menu"), Verdict::Unsafe);
        assert_eq!(verdict("", "", "app_settings_entry"), Verdict::Unsafe);
    }

    #[test]
    fn substring_match_is_intentionally_broad() {
        // "ok" inside a longer word still rejects; the filter is a
        // conservative heuristic, not an exact-word match.
        assert_eq!(verdict("Bookmarks", "", ""), Verdict::Unsafe);
    }

    #[test]
    fn custom_denylist_is_respected() {
        let mut denylist = DenylistConfig::default();
        denylist
            .text_categories
            .insert("custom".to_string(), vec!["purchase".to_string()]);
        assert_eq!(
            classify("Purchase now", "", "", &denylist),
            Verdict::Unsafe
        );
    }
}
