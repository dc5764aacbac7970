//! Domain dependency ordering.

use std::collections::BTreeSet;

use crate::diagnostic::GeneratorError;
use crate::protocol::ProtocolDefinition;

/// Orders domains so that every domain comes after the domains it depends on.
///
/// Returns positions into [`ProtocolDefinition::domains`]. Among domains that
/// are ready at the same time the one declared first wins, so the order only
/// changes when the schema does.
pub fn dependency_order(protocol: &ProtocolDefinition) -> Result<Vec<usize>, GeneratorError> {
    let domains = protocol.domains();
    let count = domains.len();

    let mut dependencies: Vec<BTreeSet<usize>> = Vec::with_capacity(count);
    for domain in domains {
        let mut edges = BTreeSet::new();
        for dependency in &domain.dependencies {
            let position = protocol
                .position(dependency)
                .ok_or_else(|| GeneratorError::UnknownDependency {
                    domain: domain.name.clone(),
                    dependency: dependency.clone(),
                })?;
            edges.insert(position);
        }
        dependencies.push(edges);
    }

    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (domain, edges) in dependencies.iter().enumerate() {
        for &dependency in edges {
            dependents[dependency].push(domain);
        }
    }

    let mut pending: Vec<usize> = dependencies.iter().map(BTreeSet::len).collect();
    let mut ready: BTreeSet<usize> = (0..count).filter(|&i| pending[i] == 0).collect();
    let mut order = Vec::with_capacity(count);

    while let Some(next) = ready.pop_first() {
        order.push(next);
        for &dependent in &dependents[next] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() < count {
        let placed: BTreeSet<usize> = order.iter().copied().collect();
        let cycle = find_cycle(&dependencies, &placed)
            .into_iter()
            .map(|i| domains[i].name.clone())
            .collect();
        return Err(GeneratorError::CyclicDependency { cycle });
    }

    Ok(order)
}

/// Walks unplaced dependencies from the first unplaced domain until a domain
/// repeats. Every unplaced domain has at least one unplaced dependency, so
/// the walk always closes a cycle.
fn find_cycle(dependencies: &[BTreeSet<usize>], placed: &BTreeSet<usize>) -> Vec<usize> {
    let Some(start) = (0..dependencies.len()).find(|i| !placed.contains(i)) else {
        return Vec::new();
    };

    let mut path = vec![start];
    let mut current = start;
    loop {
        let Some(&next) = dependencies[current].iter().find(|d| !placed.contains(d)) else {
            return path;
        };
        if let Some(at) = path.iter().position(|&p| p == next) {
            let mut cycle = path.split_off(at);
            cycle.push(next);
            return cycle;
        }
        path.push(next);
        current = next;
    }
}
