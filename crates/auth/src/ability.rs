//! Ability engine: computes the rule set for a session user and answers
//! point queries against it.

use serde::Serialize;

use crate::permissions::{Action, PermissionRule, RawRule, RuleParseError, Subject};
use crate::{Category, SessionUser};

// ─────────────────────────────────────────────────────────────────────────────
// Ability Set
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered rules granted to one session (empty when there is no session).
///
/// Immutable once built. Cheap to construct, so callers build one per request
/// instead of sharing a default instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilitySet {
    rules: Vec<PermissionRule>,
}

impl AbilitySet {
    pub fn new(rules: Vec<PermissionRule>) -> Self {
        Self { rules }
    }

    /// The no-permission set used for unauthenticated requests.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[PermissionRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn can(&self, action: Action, subject: Subject, field: Option<&str>) -> bool {
        self.matching_rule(action, subject, field).is_some()
    }

    pub fn cannot(&self, action: Action, subject: Subject, field: Option<&str>) -> bool {
        !self.can(action, subject, field)
    }

    fn matching_rule(
        &self,
        action: Action,
        subject: Subject,
        field: Option<&str>,
    ) -> Option<&PermissionRule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(action, subject, field))
    }

    /// Plain records for the client hydration channel.
    pub fn to_raw_rules(&self) -> Vec<RawRule> {
        self.rules.iter().map(PermissionRule::to_raw).collect()
    }

    /// Rehydrate an evaluator from records produced by [`AbilitySet::to_raw_rules`].
    ///
    /// A record naming an unknown action or subject fails the whole set rather
    /// than being dropped or widened.
    pub fn from_raw_rules(records: impl IntoIterator<Item = RawRule>) -> Result<Self, RuleParseError> {
        let rules = records
            .into_iter()
            .map(PermissionRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Explain why a query is (or would be) granted or denied.
    pub fn explain(&self, action: Action, subject: Subject, field: Option<&str>) -> AbilityExplanation {
        let matched = self.matching_rule(action, subject, field);

        let reason = match matched {
            Some(rule) if rule.action.is_wildcard() && rule.subject.is_wildcard() => {
                format!("granted by wildcard rule '{rule}'")
            }
            Some(rule) => format!("granted by rule '{rule}'"),
            None if self.rules.is_empty() => "no rules granted to this session".to_string(),
            None => match field {
                Some(field) => format!("no rule grants '{action} {subject}.{field}'"),
                None => format!("no rule grants '{action} {subject}'"),
            },
        };

        AbilityExplanation {
            action: action.as_str().to_string(),
            subject: subject.as_str().to_string(),
            field: field.map(str::to_string),
            granted: matched.is_some(),
            matched_rule: matched.map(PermissionRule::to_raw),
            rule_count: self.rules.len(),
            reason,
        }
    }
}

/// Auditable answer to a single `can` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityExplanation {
    pub action: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub granted: bool,
    /// First rule that grants the query, if any.
    pub matched_rule: Option<RawRule>,
    pub rule_count: usize,
    pub reason: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rule construction
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RuleBuilder {
    rules: Vec<PermissionRule>,
}

impl RuleBuilder {
    fn allow(&mut self, actions: &[Action], subject: Subject) -> &mut Self {
        self.rules
            .extend(actions.iter().map(|&action| PermissionRule::new(action, subject)));
        self
    }

    fn build(self) -> AbilitySet {
        AbilitySet::new(self.rules)
    }
}

const CRUD: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

/// Compute the ability set for a session user.
///
/// - no user: empty set
/// - admin: exactly `manage all`, regardless of category
/// - everyone else: base rules plus their category's rules; an unknown or
///   missing category gets the base rules only
pub fn build_abilities(user: Option<&SessionUser>) -> AbilitySet {
    let Some(user) = user else {
        return AbilitySet::empty();
    };

    if user.is_admin() {
        return AbilitySet::new(vec![PermissionRule::new(Action::Manage, Subject::All)]);
    }

    let mut rules = RuleBuilder::default();
    base_rules(&mut rules);

    match user.category {
        Some(Category::Employee) => {}
        Some(Category::Employer) => employer_rules(&mut rules),
        Some(Category::Agency) => agency_rules(&mut rules),
        Some(Category::Unknown) | None => {
            tracing::debug!(
                user_id = %user.id,
                category = ?user.category,
                "no category grants for user; using base rules only"
            );
        }
    }

    rules.build()
}

fn base_rules(rules: &mut RuleBuilder) {
    rules
        .allow(&[Action::Read, Action::Update], Subject::User)
        .allow(&CRUD, Subject::Profile)
        .allow(&CRUD, Subject::Education)
        .allow(&CRUD, Subject::JobHistory)
        .allow(&CRUD, Subject::IdentityDocument)
        .allow(&[Action::Read, Action::Submit], Subject::UserVerification);
}

fn employer_rules(rules: &mut RuleBuilder) {
    rules
        .allow(&[Action::Create, Action::Read, Action::Update], Subject::Organization)
        .allow(&[Action::Invite, Action::Remove, Action::Read], Subject::Member)
        .allow(&[Action::Create, Action::Read, Action::Delete], Subject::Invitation)
        .allow(&[Action::Read], Subject::Dashboard);
}

fn agency_rules(rules: &mut RuleBuilder) {
    rules
        .allow(&CRUD, Subject::Organization)
        .allow(&[Action::Manage], Subject::Member)
        .allow(&[Action::Manage], Subject::Invitation)
        .allow(&[Action::Read], Subject::Dashboard);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use workforce_core::UserId;

    fn user(role: Role, category: Option<Category>) -> SessionUser {
        let mut u = SessionUser::new(UserId::new(), "pat@example.com", "Pat", role);
        u.category = category;
        u
    }

    const CATEGORIES: [Option<Category>; 5] = [
        None,
        Some(Category::Employee),
        Some(Category::Employer),
        Some(Category::Agency),
        Some(Category::Unknown),
    ];

    #[test]
    fn no_user_gets_nothing() {
        let abilities = build_abilities(None);
        assert!(abilities.is_empty());
        assert!(abilities.cannot(Action::Read, Subject::Profile, None));
    }

    #[test]
    fn admin_is_exactly_manage_all_for_every_category() {
        for category in CATEGORIES {
            let abilities = build_abilities(Some(&user(Role::Admin, category)));
            assert_eq!(
                abilities.rules(),
                &[PermissionRule::new(Action::Manage, Subject::All)]
            );
            for action in Action::ALL {
                for subject in Subject::ALL {
                    assert!(abilities.can(action, subject, Some("anything")));
                }
            }
        }
    }

    #[test]
    fn every_non_admin_can_read_and_update_profile() {
        for role in [Role::User, Role::Partner, Role::Unknown] {
            for category in CATEGORIES {
                let abilities = build_abilities(Some(&user(role, category)));
                assert!(abilities.can(Action::Read, Subject::Profile, None));
                assert!(abilities.can(Action::Update, Subject::Profile, None));
                assert!(abilities.can(Action::Submit, Subject::UserVerification, None));
                assert!(abilities.cannot(Action::Approve, Subject::UserVerification, None));
            }
        }
    }

    #[test]
    fn only_agency_can_delete_organizations() {
        for category in CATEGORIES {
            let abilities = build_abilities(Some(&user(Role::User, category)));
            assert_eq!(
                abilities.can(Action::Delete, Subject::Organization, None),
                category == Some(Category::Agency),
                "category {category:?}"
            );
        }
    }

    #[test]
    fn employer_member_grants_are_explicit_not_manage() {
        let abilities = build_abilities(Some(&user(Role::User, Some(Category::Employer))));
        assert!(abilities.cannot(Action::Manage, Subject::Member, None));
        assert!(abilities.can(Action::Invite, Subject::Member, None));
        assert!(abilities.can(Action::Remove, Subject::Member, None));
        assert!(abilities.cannot(Action::Update, Subject::Member, None));
        assert!(abilities.cannot(Action::Update, Subject::Invitation, None));
        assert!(abilities.can(Action::Read, Subject::Dashboard, None));
    }

    #[test]
    fn agency_manages_members_and_invitations() {
        let abilities = build_abilities(Some(&user(Role::Partner, Some(Category::Agency))));
        assert!(abilities.can(Action::Manage, Subject::Member, None));
        assert!(abilities.can(Action::Update, Subject::Invitation, None));
        assert!(abilities.cannot(Action::Manage, Subject::Organization, None));
    }

    #[test]
    fn employee_and_unknown_category_get_base_rules_only() {
        let employee = build_abilities(Some(&user(Role::User, Some(Category::Employee))));
        let unknown = build_abilities(Some(&user(Role::User, Some(Category::Unknown))));
        let missing = build_abilities(Some(&user(Role::User, None)));
        assert_eq!(employee, unknown);
        assert_eq!(employee, missing);
        assert!(employee.cannot(Action::Read, Subject::Dashboard, None));
        assert!(employee.cannot(Action::Delete, Subject::User, None));
    }

    #[test]
    fn explain_names_the_granting_rule() {
        let agency = build_abilities(Some(&user(Role::User, Some(Category::Agency))));
        let explanation = agency.explain(Action::Invite, Subject::Member, None);
        assert!(explanation.granted);
        assert_eq!(explanation.matched_rule.unwrap().action, "manage");
        assert_eq!(explanation.reason, "granted by rule 'manage Member'");

        let denied = agency.explain(Action::Approve, Subject::UserVerification, Some("status"));
        assert!(!denied.granted);
        assert!(denied.matched_rule.is_none());
        assert_eq!(denied.reason, "no rule grants 'approve UserVerification.status'");

        let admin = build_abilities(Some(&user(Role::Admin, None)));
        assert_eq!(
            admin.explain(Action::Delete, Subject::User, None).reason,
            "granted by wildcard rule 'manage all'"
        );

        let anon = build_abilities(None).explain(Action::Read, Subject::Profile, None);
        assert_eq!(anon.reason, "no rules granted to this session");
    }

    #[test]
    fn rehydration_rejects_unknown_subjects() {
        let records = vec![RawRule {
            action: "read".to_string(),
            subject: "Payroll".to_string(),
            field: None,
        }];
        assert!(AbilitySet::from_raw_rules(records).is_err());
    }

    #[test]
    fn serialized_rules_are_plain_json_strings() {
        let abilities = build_abilities(Some(&user(Role::User, Some(Category::Agency))));
        let json = serde_json::to_value(abilities.to_raw_rules()).unwrap();
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), abilities.rules().len());
        assert!(records.iter().all(|r| r["action"].is_string() && r["subject"].is_string()));
        assert!(records.contains(&serde_json::json!({ "action": "manage", "subject": "Member" })));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_action() -> impl Strategy<Value = Action> {
            prop::sample::select(Action::ALL.to_vec())
        }

        fn any_subject() -> impl Strategy<Value = Subject> {
            prop::sample::select(Subject::ALL.to_vec())
        }

        fn any_field() -> impl Strategy<Value = Option<&'static str>> {
            prop::option::of(prop::sample::select(vec!["name", "email", "status"]))
        }

        fn any_session() -> impl Strategy<Value = Option<SessionUser>> {
            let role = prop::sample::select(vec![Role::Admin, Role::User, Role::Partner, Role::Unknown]);
            let category = prop::sample::select(CATEGORIES.to_vec());
            prop::option::of((role, category).prop_map(|(role, category)| user(role, category)))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: `cannot` is exactly the negation of `can`.
            #[test]
            fn cannot_negates_can(
                session in any_session(),
                action in any_action(),
                subject in any_subject(),
                field in any_field(),
            ) {
                let abilities = build_abilities(session.as_ref());
                prop_assert_eq!(
                    abilities.cannot(action, subject, field),
                    !abilities.can(action, subject, field)
                );
            }

            /// Property: serialize + deserialize answers every query identically.
            #[test]
            fn raw_round_trip_preserves_answers(
                session in any_session(),
                action in any_action(),
                subject in any_subject(),
                field in any_field(),
            ) {
                let abilities = build_abilities(session.as_ref());
                let json = serde_json::to_string(&abilities.to_raw_rules()).unwrap();
                let records: Vec<RawRule> = serde_json::from_str(&json).unwrap();
                let rehydrated = AbilitySet::from_raw_rules(records).unwrap();

                prop_assert_eq!(
                    rehydrated.can(action, subject, field),
                    abilities.can(action, subject, field)
                );
            }

            /// Property: building is deterministic for the same user.
            #[test]
            fn build_is_deterministic(session in any_session()) {
                prop_assert_eq!(
                    build_abilities(session.as_ref()),
                    build_abilities(session.as_ref())
                );
            }
        }
    }
}
