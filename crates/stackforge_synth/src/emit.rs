//! Plan emitter: topological ordering and reference resolution.

use crate::plan::{OutputBinding, Plan, ResolvedResource};
use indexmap::IndexMap;
use stackforge_core::{ComposeError, ComposeResult, ConfigMap, ConfigValue, LogicalId, Token};
use stackforge_graph::Composer;

/// Emit the final plan from a validated composer
///
/// Resources come out in topological order over the edge set, with ties
/// among independent resources broken by ascending registration order,
/// so emission is deterministic for a fixed declaration sequence and
/// idempotent on an unchanged graph. Every deferred token is
/// substituted with its symbolic `${id.attribute}` placeholder; a
/// provisioner later swaps placeholders for concrete values.
///
/// # Errors
///
/// Returns `UnresolvedReference` for a token naming an attribute its
/// referent cannot expose, `NotFound`/`InvalidAttribute` for outputs
/// against missing resources or unsupported attributes, and
/// `DuplicateId` for a reused output name.
pub fn emit(composer: &Composer, outputs: &[OutputBinding]) -> ComposeResult<Plan> {
    let order = topo_order(composer)?;

    // Walk in dependency order, materializing attribute tables so each
    // resource only ever references already-resolved predecessors.
    let mut attribute_tables: IndexMap<LogicalId, IndexMap<String, String>> = IndexMap::new();
    let mut resources = Vec::with_capacity(order.len());

    for id in &order {
        let descriptor = composer.get(id)?;

        let mut config = ConfigMap::new();
        for (key, value) in &descriptor.config {
            config.insert(key.clone(), substitute(value, id, &attribute_tables)?);
        }

        let mut attributes = IndexMap::new();
        for attribute in descriptor.kind.attributes() {
            let token = Token::new(id.clone(), *attribute);
            attributes.insert((*attribute).to_string(), token.placeholder());
        }
        attribute_tables.insert(id.clone(), attributes.clone());

        resources.push(ResolvedResource {
            id: id.clone(),
            kind: descriptor.kind,
            config,
            attributes,
        });
    }

    let mut resolved_outputs = IndexMap::new();
    for binding in outputs {
        let descriptor = composer.get(&binding.source)?;
        if !descriptor.kind.exposes(&binding.attribute) {
            return Err(ComposeError::InvalidAttribute {
                name: binding.name.clone(),
                source: binding.source.clone(),
                kind: descriptor.kind.name().to_string(),
                attribute: binding.attribute.clone(),
            });
        }
        let value = attribute_tables[&binding.source][&binding.attribute].clone();
        if resolved_outputs.insert(binding.name.clone(), value).is_some() {
            return Err(ComposeError::DuplicateId {
                id: LogicalId::from(binding.name.as_str()),
            });
        }
    }

    tracing::debug!(
        resources = resources.len(),
        outputs = resolved_outputs.len(),
        "emitted plan"
    );
    Ok(Plan {
        resources,
        outputs: resolved_outputs,
    })
}

/// Kahn's algorithm with registration-order tie-breaking
fn topo_order(composer: &Composer) -> ComposeResult<Vec<LogicalId>> {
    let registry = composer.registry();

    // remaining[i] counts unemitted dependencies of the i-th descriptor
    let mut remaining: IndexMap<&LogicalId, usize> =
        registry.iter().map(|d| (&d.id, 0)).collect();
    for edge in composer.edges() {
        if let Some(count) = remaining.get_mut(&edge.from) {
            *count += 1;
        }
    }

    let mut order = Vec::with_capacity(remaining.len());
    let mut emitted = vec![false; remaining.len()];

    for _ in 0..remaining.len() {
        // First ready descriptor in registration order wins the tie
        let next = remaining
            .iter()
            .enumerate()
            .find(|(i, (_, count))| !emitted[*i] && **count == 0)
            .map(|(i, (&id, _))| (i, id));

        let Some((index, id)) = next else {
            // Unreachable after validate(); kept as a hard stop
            let stuck = remaining
                .iter()
                .enumerate()
                .filter(|(i, _)| !emitted[*i])
                .map(|(_, (&id, _))| id.clone())
                .collect();
            return Err(ComposeError::CycleDetected { path: stuck });
        };

        emitted[index] = true;
        for edge in composer.edges() {
            if edge.to == *id {
                if let Some(count) = remaining.get_mut(&edge.from) {
                    *count -= 1;
                }
            }
        }
        order.push(id.clone());
    }

    Ok(order)
}

/// Replace every `Ref` token with its symbolic placeholder
fn substitute(
    value: &ConfigValue,
    from: &LogicalId,
    attribute_tables: &IndexMap<LogicalId, IndexMap<String, String>>,
) -> ComposeResult<ConfigValue> {
    match value {
        ConfigValue::Ref(token) => {
            let placeholder = attribute_tables
                .get(&token.source)
                .and_then(|attrs| attrs.get(&token.attribute))
                .ok_or_else(|| ComposeError::UnresolvedReference {
                    from: from.clone(),
                    to: token.source.clone(),
                    attribute: token.attribute.clone(),
                })?;
            Ok(ConfigValue::String(placeholder.clone()))
        }
        ConfigValue::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(substitute(item, from, attribute_tables)?);
            }
            Ok(ConfigValue::List(out))
        }
        ConfigValue::Map(map) => {
            let mut out = ConfigMap::new();
            for (key, item) in map {
                out.insert(key.clone(), substitute(item, from, attribute_tables)?);
            }
            Ok(ConfigValue::Map(out))
        }
        other => Ok(other.clone()),
    }
}
