//! Catalog of moderation rules.

use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};
use vigil_core::{ContentType, ModerationRule, RulePatch};
use vigil_error::RegistryResult;

/// Mutable catalog of [`ModerationRule`]s shared by the moderators.
///
/// Constructed explicitly and shared as `Arc<RuleRegistry>`. Reads run
/// concurrently; mutations take the write lock. Nothing is persisted.
///
/// The default set restored by [`RuleRegistry::reset_to_defaults`] is empty
/// unless one is supplied with [`RuleRegistry::with_defaults`]: policy
/// categories are left to the generation provider and the security-class
/// checks live in the moderators themselves.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: RwLock<Vec<ModerationRule>>,
    defaults: Vec<ModerationRule>,
}

impl RuleRegistry {
    /// Create a registry with no rules and an empty default set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `defaults`, which resets restore.
    ///
    /// Rules sharing an id collapse into one entry, later fields winning.
    pub fn with_defaults(defaults: Vec<ModerationRule>) -> RegistryResult<Self> {
        let registry = Self::new();
        registry.add_rules(defaults)?;
        Ok(Self {
            defaults: registry.get_rules(),
            rules: registry.rules,
        })
    }

    /// Every rule, enabled or not, in insertion order.
    pub fn get_rules(&self) -> Vec<ModerationRule> {
        self.rules.read().clone()
    }

    /// Enabled rules that apply to `content_type`.
    pub fn get_rules_by_content_type(&self, content_type: ContentType) -> Vec<ModerationRule> {
        self.rules
            .read()
            .iter()
            .filter(|rule| rule.applies_to(content_type))
            .cloned()
            .collect()
    }

    /// Look a rule up by id.
    pub fn get_rule_by_id(&self, id: &str) -> Option<ModerationRule> {
        self.rules.read().iter().find(|rule| rule.id() == id).cloned()
    }

    /// Insert a rule, or overwrite the fields of the rule with the same id.
    #[instrument(skip(self, rule), fields(rule_id = %rule.id()))]
    pub fn add_rule(&self, rule: ModerationRule) -> RegistryResult<()> {
        rule.validate()?;
        Self::upsert(&mut self.rules.write(), rule);
        Ok(())
    }

    /// Add several rules. Every rule is validated before any is inserted.
    #[instrument(skip_all)]
    pub fn add_rules(&self, rules: impl IntoIterator<Item = ModerationRule>) -> RegistryResult<()> {
        let rules: Vec<ModerationRule> = rules.into_iter().collect();
        for rule in &rules {
            rule.validate()?;
        }
        let mut catalog = self.rules.write();
        debug!(count = rules.len(), "Adding rules");
        for rule in rules {
            Self::upsert(&mut catalog, rule);
        }
        Ok(())
    }

    /// Apply a partial update. Returns `false` if the id is unknown or the
    /// patch would leave the rule without content types.
    #[instrument(skip(self, patch))]
    pub fn update_rule(&self, id: &str, patch: &RulePatch) -> bool {
        let mut catalog = self.rules.write();
        let Some(rule) = catalog.iter_mut().find(|rule| rule.id() == id) else {
            debug!("Rule not found");
            return false;
        };
        let applied = rule.apply(patch);
        if !applied {
            warn!("Refused update that would empty the rule's content types");
        }
        applied
    }

    /// Remove a rule. Returns `false` if the id is unknown.
    #[instrument(skip(self))]
    pub fn remove_rule(&self, id: &str) -> bool {
        let mut catalog = self.rules.write();
        let before = catalog.len();
        catalog.retain(|rule| rule.id() != id);
        catalog.len() != before
    }

    /// Enable a rule. Returns `false` if the id is unknown.
    pub fn enable_rule(&self, id: &str) -> bool {
        self.update_rule(id, &RulePatch::new().with_enabled(true))
    }

    /// Disable a rule. Returns `false` if the id is unknown.
    pub fn disable_rule(&self, id: &str) -> bool {
        self.update_rule(id, &RulePatch::new().with_enabled(false))
    }

    /// Replace the catalog with the default set.
    pub fn reset_to_defaults(&self) {
        info!(defaults = self.defaults.len(), "Resetting rules to defaults");
        *self.rules.write() = self.defaults.clone();
    }

    /// Remove every rule.
    pub fn clear_all_rules(&self) {
        info!("Clearing all rules");
        self.rules.write().clear();
    }

    /// Number of rules in the catalog.
    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }

    fn upsert(catalog: &mut Vec<ModerationRule>, rule: ModerationRule) {
        match catalog.iter_mut().find(|existing| existing.id() == rule.id()) {
            Some(existing) => {
                debug!(rule_id = %rule.id(), "Merging into existing rule");
                existing.merge(rule);
            }
            None => catalog.push(rule),
        }
    }
}
