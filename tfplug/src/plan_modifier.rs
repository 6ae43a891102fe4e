//! Attribute plan modifiers and the planning pass that runs them

use crate::schema::{PlanModifier, PlanModifierRequest, PlanModifierResponse, Schema};
use crate::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

/// Marks an attribute as requiring replacement when its value changes
/// on an existing resource. Creation (null prior state) never triggers it.
pub struct RequiresReplace;

impl PlanModifier for RequiresReplace {
    fn description(&self) -> String {
        "If the value of this attribute changes, the resource will be destroyed and recreated."
            .to_string()
    }

    fn modify(&self, request: PlanModifierRequest) -> PlanModifierResponse {
        let requires_replace = match (&request.state_value.value, &request.plan_value.value) {
            (Dynamic::Null, _) | (Dynamic::Unknown, _) | (_, Dynamic::Unknown) => false,
            (state, plan) => state != plan,
        };

        PlanModifierResponse {
            plan_value: request.plan_value,
            requires_replace,
            diagnostics: vec![],
        }
    }
}

/// Keeps the prior state value for a computed attribute whose planned value is unknown
pub struct UseStateForUnknown;

impl PlanModifier for UseStateForUnknown {
    fn description(&self) -> String {
        "Once set, the value of this attribute in state will not change.".to_string()
    }

    fn modify(&self, request: PlanModifierRequest) -> PlanModifierResponse {
        let plan_value = match (&request.plan_value.value, &request.state_value.value) {
            (Dynamic::Unknown, state) if state.is_set() => request.state_value.clone(),
            _ => request.plan_value,
        };

        PlanModifierResponse {
            plan_value,
            requires_replace: false,
            diagnostics: vec![],
        }
    }
}

/// Outcome of running every attribute plan modifier over a proposed state
pub struct PlannedChange {
    pub planned_state: DynamicValue,
    pub requires_replace: Vec<AttributePath>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs each attribute's plan modifiers in declaration order
pub fn plan_resource_change(
    schema: &Schema,
    config: &DynamicValue,
    prior_state: &DynamicValue,
    proposed_new_state: DynamicValue,
) -> PlannedChange {
    let mut planned_state = proposed_new_state;
    let mut requires_replace = vec![];
    let mut diagnostics = vec![];

    for attr in &schema.attributes {
        if attr.plan_modifiers.is_empty() {
            continue;
        }

        let path = AttributePath::new(&attr.name);
        let lookup = |value: &DynamicValue| {
            DynamicValue::new(value.get(&path).cloned().unwrap_or(Dynamic::Null))
        };
        let config_value = lookup(config);
        let state_value = lookup(prior_state);
        let mut plan_value = lookup(&planned_state);
        let mut replace = false;

        for modifier in &attr.plan_modifiers {
            let response = modifier.modify(PlanModifierRequest {
                config_value: config_value.clone(),
                state_value: state_value.clone(),
                plan_value,
                path: path.clone(),
            });
            plan_value = response.plan_value;
            replace |= response.requires_replace;
            diagnostics.extend(response.diagnostics);
        }

        if replace {
            tracing::debug!("attribute {} requires replacement", attr.name);
            requires_replace.push(path.clone());
        }

        if let Err(e) = planned_state.set_value(&path, plan_value.value) {
            diagnostics.push(
                Diagnostic::error("Failed to apply planned value", e.to_string())
                    .with_attribute(path),
            );
        }
    }

    PlannedChange {
        planned_state,
        requires_replace,
        diagnostics,
    }
}
