//! Tests for team resolution

#[cfg(test)]
mod tests {
    use crate::auth::team::resolver::{is_org_head, is_team_head, resolve_team_slug};
    use crate::auth::team::types::TeamSlug;

    #[test]
    fn test_exact_table_wins_regardless_of_role() {
        let cases = [
            ("tele-marketing", TeamSlug::Tele),
            ("field-marketing", TeamSlug::Field),
            ("associate-marketing", TeamSlug::Associate),
            ("corporate-marketing", TeamSlug::Corporate),
            ("technical", TeamSlug::Technical),
            ("solutions", TeamSlug::Solution),
            ("quotation-team", TeamSlug::QuotationTeam),
            ("payments-team", TeamSlug::PaymentsTeam),
            ("ipqshead", TeamSlug::Ipqshead),
        ];

        for (department, expected) in cases {
            assert_eq!(resolve_team_slug(department, ""), expected);
            // Role text must not override an exact department match
            assert_eq!(resolve_team_slug(department, "payment collector"), expected);
        }
    }

    #[test]
    fn test_exact_match_tolerates_raw_casing_and_punctuation() {
        assert_eq!(resolve_team_slug("Tele Marketing", ""), TeamSlug::Tele);
        assert_eq!(
            resolve_team_slug("  Quotation  Team ", ""),
            TeamSlug::QuotationTeam
        );
    }

    #[test]
    fn test_misspelled_associate_fragment() {
        assert_eq!(
            resolve_team_slug("Assoicate Mktg Division", ""),
            TeamSlug::Associate
        );
        assert_eq!(resolve_team_slug("assoc desk", ""), TeamSlug::Associate);
    }

    #[test]
    fn test_partial_department_names() {
        assert_eq!(resolve_team_slug("Field Ops", ""), TeamSlug::Field);
        assert_eq!(resolve_team_slug("Corp Sales", ""), TeamSlug::Corporate);
        assert_eq!(resolve_team_slug("Tech Support", ""), TeamSlug::Technical);
    }

    #[test]
    fn test_role_cascade_when_department_unknown() {
        assert_eq!(
            resolve_team_slug("misc", "payment collector"),
            TeamSlug::PaymentsTeam
        );
        assert_eq!(
            resolve_team_slug("", "Senior Quotation Engineer"),
            TeamSlug::QuotationTeam
        );
    }

    #[test]
    fn test_department_fragment_beats_role_fragment() {
        // Department resolves first; role never gets consulted
        assert_eq!(
            resolve_team_slug("field division", "payment collector"),
            TeamSlug::Field
        );
    }

    #[test]
    fn test_default_when_both_unrecognized() {
        assert_eq!(resolve_team_slug("warehouse", "janitor"), TeamSlug::Tele);
        assert_eq!(resolve_team_slug("", ""), TeamSlug::Tele);
    }

    #[test]
    fn test_fragment_order_more_specific_wins_over_tele() {
        // Contains both "tele" and "tech"; "tech" sits earlier in the table
        assert_eq!(resolve_team_slug("teletech", ""), TeamSlug::Technical);
    }

    #[test]
    fn test_is_org_head_requires_both_fields() {
        assert!(is_org_head("IPQS Head", "ipqshead"));
        assert!(is_org_head("ipqshead", "IPQSHead"));
        assert!(!is_org_head("ipqshead", "tele-head"));
        assert!(!is_org_head("tele-marketing", "ipqshead"));
        assert!(!is_org_head("", ""));
    }

    #[test]
    fn test_is_team_head_suffix_fragment() {
        assert!(is_team_head("Tele Head"));
        assert!(is_team_head("field-head"));
        assert!(is_team_head("Acting Solutions Head"));
        assert!(!is_team_head("ipqshead")); // no separator, not a team head
        assert!(!is_team_head("header analyst"));
        assert!(!is_team_head(""));
    }

    #[test]
    fn test_slug_serialization_is_kebab_case() {
        let json = serde_json::to_string(&TeamSlug::QuotationTeam).unwrap();
        assert_eq!(json, "\"quotation-team\"");
        let json = serde_json::to_string(&TeamSlug::Ipqshead).unwrap();
        assert_eq!(json, "\"ipqshead\"");
    }
}
