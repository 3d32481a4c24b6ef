//! Relationship resolver: config references become graph edges.
//!
//! A descriptor's config may hold `Ref` tokens naming another
//! resource's generated attribute. Each token becomes a
//! `ConfigReference` edge so that the emitter orders the referenced
//! resource first; the token itself stays in the config until emission
//! substitutes it. Runs over the whole registry at synthesis time, so
//! declaration order never matters.

use stackforge_core::{ComposeError, ComposeResult, Token};
use stackforge_graph::{Composer, Edge, EdgeKind};

/// Record a `ConfigReference` edge for every `Ref` token in the graph
///
/// Identical references are collapsed to one edge, so resolving an
/// already-resolved composer is a no-op.
///
/// # Errors
///
/// Returns `DanglingReference` if any token names an unregistered
/// resource; no edge is recorded for the offending token.
pub fn resolve_references(composer: &mut Composer) -> ComposeResult<()> {
    let mut pending: Vec<Edge> = Vec::new();

    for descriptor in composer.registry().iter() {
        let mut tokens: Vec<&Token> = Vec::new();
        for value in descriptor.config.values() {
            value.for_each_token(&mut |token| tokens.push(token));
        }

        for token in tokens {
            if !composer.registry().contains(&token.source) {
                return Err(ComposeError::DanglingReference {
                    from: descriptor.id.clone(),
                    to: token.source.clone(),
                });
            }

            let edge = Edge::new(
                descriptor.id.clone(),
                token.source.clone(),
                EdgeKind::ConfigReference {
                    attribute: token.attribute.clone(),
                },
            );
            if !composer.edges().contains(&edge) && !pending.contains(&edge) {
                pending.push(edge);
            }
        }
    }

    tracing::debug!(edges = pending.len(), "resolved config references");
    for edge in pending {
        composer.add_edge(edge)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackforge_core::{ConfigMap, ConfigValue, LogicalId};
    use stackforge_graph::ResourceKind;

    fn compute_referencing(table: &str) -> ConfigMap {
        let mut env = ConfigMap::new();
        env.insert(
            "SESSIONS_TABLE".to_string(),
            ConfigValue::reference(table, "table_name"),
        );
        let mut config = ConfigMap::new();
        config.insert("environment".to_string(), ConfigValue::Map(env));
        config
    }

    #[test]
    fn test_reference_creates_edge() {
        let mut composer = Composer::new();
        composer
            .register(LogicalId::from("T1"), ResourceKind::Table, ConfigMap::new())
            .unwrap();
        composer
            .register(
                LogicalId::from("C1"),
                ResourceKind::ComputeUnit,
                compute_referencing("T1"),
            )
            .unwrap();

        resolve_references(&mut composer).unwrap();

        assert_eq!(composer.edges().len(), 1);
        let edge = &composer.edges()[0];
        assert_eq!(edge.from, LogicalId::from("C1"));
        assert_eq!(edge.to, LogicalId::from("T1"));
        assert_eq!(
            edge.kind,
            EdgeKind::ConfigReference {
                attribute: "table_name".to_string()
            }
        );
    }

    #[test]
    fn test_dangling_reference_creates_no_edge() {
        let mut composer = Composer::new();
        composer
            .register(
                LogicalId::from("C1"),
                ResourceKind::ComputeUnit,
                compute_referencing("Missing"),
            )
            .unwrap();

        let err = resolve_references(&mut composer).unwrap_err();
        assert_eq!(
            err,
            ComposeError::DanglingReference {
                from: LogicalId::from("C1"),
                to: LogicalId::from("Missing"),
            }
        );
        assert!(composer.edges().is_empty());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut composer = Composer::new();
        composer
            .register(LogicalId::from("T1"), ResourceKind::Table, ConfigMap::new())
            .unwrap();
        composer
            .register(
                LogicalId::from("C1"),
                ResourceKind::ComputeUnit,
                compute_referencing("T1"),
            )
            .unwrap();

        resolve_references(&mut composer).unwrap();
        resolve_references(&mut composer).unwrap();
        assert_eq!(composer.edges().len(), 1);
    }

    #[test]
    fn test_forward_declaration_order_is_fine() {
        // C1 is registered before the table it references
        let mut composer = Composer::new();
        composer
            .register(
                LogicalId::from("C1"),
                ResourceKind::ComputeUnit,
                compute_referencing("T1"),
            )
            .unwrap();
        composer
            .register(LogicalId::from("T1"), ResourceKind::Table, ConfigMap::new())
            .unwrap();

        resolve_references(&mut composer).unwrap();
        assert_eq!(composer.edges().len(), 1);
    }
}
