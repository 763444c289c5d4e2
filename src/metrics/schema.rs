//! Graph schema derived from the registry.

use crate::metrics::data::{Graph, GraphDefinition, MetricSchema};
use crate::metrics::registry::Registry;

/// Build the graph definition for a registry.
///
/// Pure function of the registry: one graph keyed by the graph name, one
/// entry per metric in declaration order.
pub fn graph_definition(registry: &Registry) -> GraphDefinition {
    let metrics = registry
        .metrics()
        .iter()
        .map(|spec| MetricSchema {
            name: spec.name.clone(),
            label: spec.name.clone(),
            diff: spec.is_differential,
            stacked: spec.is_stacked,
        })
        .collect();

    let mut definition = GraphDefinition::default();
    definition.graphs.insert(
        registry.graph_name.clone(),
        Graph {
            label: registry.graph_name.clone(),
            unit: registry.graph_unit.clone(),
            metrics,
        },
    );
    definition
}
