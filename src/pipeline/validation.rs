// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet, VecDeque};

use crate::errors::{ConfigError, ConfigErrorKind};

/// Rejects repeated operator IDs.
pub(crate) fn validate_unique_ids<'a, I>(ids: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::new(id, ConfigErrorKind::DuplicateId(id.to_string())));
        }
    }
    Ok(())
}

/// Orders operators so every operator precedes its outputs (Kahn's algorithm).
///
/// `nodes` pairs each operator ID with its output IDs. Returns indices into
/// `nodes`; ties keep configuration order. Output IDs that name no node are
/// ignored here.
pub(crate) fn topological_order(nodes: &[(String, Vec<String>)]) -> Result<Vec<usize>, ConfigError> {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, (id, _))| (id.as_str(), i))
        .collect();

    let mut in_degree = vec![0usize; nodes.len()];
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (from, (_, outputs)) in nodes.iter().enumerate() {
        for to in outputs.iter().filter_map(|id| index.get(id.as_str())) {
            adjacency[from].push(*to);
            in_degree[*to] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|i| in_degree[*i] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &neighbor in &adjacency[node] {
            in_degree[neighbor] -= 1;
            if in_degree[neighbor] == 0 {
                queue.push_back(neighbor);
            }
        }
    }

    if order.len() < nodes.len() {
        let mut cycle: Vec<String> = (0..nodes.len())
            .filter(|i| in_degree[*i] > 0)
            .map(|i| nodes[i].0.clone())
            .collect();
        cycle.sort();
        let operator_id = cycle.first().cloned().unwrap_or_default();
        return Err(ConfigError::new(
            operator_id,
            ConfigErrorKind::CyclicOutputs(cycle),
        ));
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, outputs: &[&str]) -> (String, Vec<String>) {
        (
            id.to_string(),
            outputs.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_topological_order() {
        struct TestCase {
            name: &'static str,
            nodes: Vec<(String, Vec<String>)>,
            expected: Result<Vec<usize>, Vec<&'static str>>,
        }

        let cases = vec![
            TestCase {
                name: "empty",
                nodes: vec![],
                expected: Ok(vec![]),
            },
            TestCase {
                name: "single",
                nodes: vec![node("a", &[])],
                expected: Ok(vec![0]),
            },
            TestCase {
                name: "linear chain configured backwards",
                nodes: vec![node("c", &[]), node("b", &["c"]), node("a", &["b"])],
                expected: Ok(vec![2, 1, 0]),
            },
            TestCase {
                name: "diamond",
                nodes: vec![
                    node("in", &["left", "right"]),
                    node("left", &["out"]),
                    node("right", &["out"]),
                    node("out", &[]),
                ],
                expected: Ok(vec![0, 1, 2, 3]),
            },
            TestCase {
                name: "simple cycle",
                nodes: vec![node("a", &["b"]), node("b", &["a"])],
                expected: Err(vec!["a", "b"]),
            },
            TestCase {
                name: "self loop",
                nodes: vec![node("in", &["loop"]), node("loop", &["loop"])],
                expected: Err(vec!["loop"]),
            },
            TestCase {
                name: "cycle downstream of a valid prefix",
                nodes: vec![
                    node("in", &["x"]),
                    node("x", &["y"]),
                    node("y", &["z"]),
                    node("z", &["x"]),
                ],
                expected: Err(vec!["x", "y", "z"]),
            },
        ];

        for case in cases {
            let result = topological_order(&case.nodes).map_err(|e| e.kind);
            let expected = case.expected.map_err(|ids| {
                ConfigErrorKind::CyclicOutputs(ids.into_iter().map(str::to_string).collect())
            });
            assert_eq!(result, expected, "case: {}", case.name);
        }
    }

    #[test]
    fn test_cycle_error_names_operators() {
        let err = topological_order(&[node("a", &["b"]), node("b", &["a"])]).unwrap_err();
        assert_eq!(err.operator_id, "a");
        assert!(err.to_string().contains("a, b"));
    }

    #[test]
    fn test_duplicate_ids() {
        assert!(validate_unique_ids(["a", "b", "c"]).is_ok());
        let err = validate_unique_ids(["a", "b", "a"]).unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::DuplicateId("a".to_string()));
    }
}
